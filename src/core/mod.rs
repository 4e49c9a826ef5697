pub mod errors;
pub mod highlight;
pub mod models;
pub mod selection;
pub mod state;
pub mod tasks;

pub use errors::LexiError;
pub use models::{
    HistoryEntry,
    VocabularyEntry,
    View,
};
pub use state::{
    Action,
    AppState,
    Dirty,
};
