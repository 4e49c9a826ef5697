use thiserror::Error;

pub const QUOTA_MESSAGE: &str =
    "You exceeded your current quota, please check your plan and billing details.";

pub const IMAGE_EXTRACTION_MESSAGE: &str =
    "Failed to read text from image. The file might be corrupted or in an unsupported format.";

#[derive(Error, Debug)]
pub enum LexiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("No Gemini API key configured")]
    MissingApiKey,

    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned an empty response")]
    EmptyResponse,

    #[error("{}", IMAGE_EXTRACTION_MESSAGE)]
    ImageExtraction,

    #[error("Failed to load unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Quota(String),

    #[error("Failed to get definition for \"{0}\".")]
    DefinitionFailed(String),

    #[error("LexiError: {0}")]
    Custom(String),
}

impl LexiError {
    /// True when the upstream signalled resource exhaustion.
    pub fn is_quota(&self) -> bool {
        match self {
            LexiError::Quota(_) => true,
            LexiError::Api { status, message } => {
                *status == 429
                    || message.contains("RESOURCE_EXHAUSTED")
                    || message.to_lowercase().contains("quota")
            }
            other => {
                let text = other.to_string();
                text.contains("RESOURCE_EXHAUSTED") || text.to_lowercase().contains("quota")
            }
        }
    }
}

impl From<std::io::Error> for LexiError {
    fn from(error: std::io::Error) -> Self {
        LexiError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LexiError {
    fn from(error: reqwest::Error) -> Self {
        LexiError::Reqwest(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_detection() {
        assert!(LexiError::Quota(QUOTA_MESSAGE.to_string()).is_quota());
        assert!(LexiError::Api { status: 429, message: "Too many requests".into() }.is_quota());
        assert!(LexiError::Api {
            status: 400,
            message: "RESOURCE_EXHAUSTED: try later".into()
        }
        .is_quota());
        assert!(LexiError::Custom("Daily Quota exceeded".into()).is_quota());

        assert!(!LexiError::Api { status: 500, message: "internal".into() }.is_quota());
        assert!(!LexiError::EmptyResponse.is_quota());
    }

    #[test]
    fn test_definition_failed_message() {
        let err = LexiError::DefinitionFailed("serendipity".to_string());
        assert_eq!(err.to_string(), "Failed to get definition for \"serendipity\".");
    }
}
