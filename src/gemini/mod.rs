pub mod api;
pub mod types;

pub use api::{
    GeminiClient,
    GeminiConfig,
    DEFAULT_BASE_URL,
    DEFAULT_MODEL,
    IMAGE_EXTENSIONS,
};
