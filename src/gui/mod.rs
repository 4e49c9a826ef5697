pub mod actions;
pub mod app;
pub mod error_banner;
pub mod message_overlay;
pub mod popup;
pub mod settings;
pub mod sidebar;
pub mod theme;
pub mod views;
pub mod vocabulary_list;

pub use actions::{
    ActionQueue,
    UiAction,
};
pub use app::LexiApp;
