use std::{
    path::Path,
    time::Duration,
};

use base64::{
    engine::general_purpose::STANDARD,
    Engine as _,
};
use reqwest::Client;

use super::types::{
    definition_schema,
    ApiErrorBody,
    Content,
    DefinitionPayload,
    GenerateContentRequest,
    GenerateContentResponse,
    GenerationConfig,
    Part,
};
use crate::core::{
    errors::QUOTA_MESSAGE,
    LexiError,
    VocabularyEntry,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const OCR_PROMPT: &str = "Extract all text from this image. Return only the raw text content, with no additional commentary or formatting.";

const DEFINITION_INSTRUCTION: &str = "You are an expert linguist and vocabulary assistant. For the given word, provide a concise definition in English, its pronunciation in IPA format, and a clear example sentence demonstrating its usage. Return the result as a single JSON object, adhering to the provided schema.";

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, LexiError> {
        if config.api_key.trim().is_empty() {
            return Err(LexiError::MissingApiKey);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LexiError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LexiError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Reads the image at `path` and asks the model for its raw text.
    pub async fn extract_text_from_image(&self, path: &Path) -> Result<String, LexiError> {
        let result: Result<String, LexiError> = async {
            let mime_type = image_mime_type(path)?;
            let bytes = tokio::fs::read(path).await?;
            let request = ocr_request(&bytes, mime_type);
            let response = self.generate(&request).await?;
            response.text().ok_or(LexiError::EmptyResponse)
        }
        .await;

        result.map_err(|e| {
            log::error!("Error extracting text from image {}: {}", path.display(), e);
            LexiError::ImageExtraction
        })
    }

    pub async fn fetch_word_definition(&self, word: &str) -> Result<VocabularyEntry, LexiError> {
        let result: Result<VocabularyEntry, LexiError> = async {
            let response = self.generate(&definition_request(word)).await?;
            let text = response.text().ok_or(LexiError::EmptyResponse)?;
            parse_definition(&text)
        }
        .await;

        result.map_err(|e| {
            log::error!("Error fetching definition for \"{}\": {}", word, e);
            classify_definition_error(word, e)
        })
    }
}

pub fn ocr_request(image: &[u8], mime_type: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![
            Part::inline(mime_type, STANDARD.encode(image)),
            Part::text(OCR_PROMPT),
        ])],
        system_instruction: None,
        generation_config: None,
    }
}

pub fn definition_request(word: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text(format!(
            "Please provide a detailed definition for the word: \"{}\"",
            word
        ))])],
        system_instruction: Some(Content::system(DEFINITION_INSTRUCTION)),
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: definition_schema(),
        }),
    }
}

pub fn parse_definition(text: &str) -> Result<VocabularyEntry, LexiError> {
    let payload: DefinitionPayload = serde_json::from_str(text.trim())?;
    Ok(payload.into())
}

fn api_error(status: u16, body: &str) -> LexiError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            let detail = parsed.error;
            let message = if detail.status.is_empty() {
                detail.message
            } else {
                format!("{}: {}", detail.status, detail.message)
            };
            LexiError::Api { status, message }
        }
        Err(_) => LexiError::Api { status, message: body.trim().to_string() },
    }
}

/// Quota errors keep an upstream message that already mentions the quota;
/// everything else collapses to a per-word failure.
pub fn classify_definition_error(word: &str, error: LexiError) -> LexiError {
    if !error.is_quota() {
        return LexiError::DefinitionFailed(word.to_string());
    }
    match error {
        LexiError::Quota(message) => LexiError::Quota(message),
        LexiError::Api { message, .. } if message.to_lowercase().contains("quota") => {
            LexiError::Quota(message)
        }
        _ => LexiError::Quota(QUOTA_MESSAGE.to_string()),
    }
}

pub fn image_mime_type(path: &Path) -> Result<&'static str, LexiError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        "bmp" => Ok("image/bmp"),
        _ => Err(LexiError::UnsupportedFileType(path.display().to_string())),
    }
}

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "heic", "heif", "bmp"];

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(key: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: format!("{}/", DEFAULT_BASE_URL),
            timeout: None,
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(GeminiClient::new(config("  ")), Err(LexiError::MissingApiKey)));

        let client = GeminiClient::new(config("secret")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_definition_request_shape() {
        let value = serde_json::to_value(definition_request("sun")).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            "Please provide a detailed definition for the word: \"sun\""
        );
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"],
            serde_json::json!(["word", "definition", "usage"])
        );
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("IPA"));
        assert!(value["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn test_ocr_request_inlines_base64_image() {
        let value = serde_json::to_value(ocr_request(b"abc", "image/png")).unwrap();
        let parts = &value["contents"][0]["parts"];

        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], OCR_PROMPT);
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_parse_response_and_definition() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"word\": \"sun\", \"pronunciation\": \"/sʌn/\", "},
                              {"text": "\"definition\": \"The star.\", \"usage\": \"The sun rises.\"}"}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let entry = parse_definition(&response.text().unwrap()).unwrap();

        assert_eq!(entry.word, "sun");
        assert_eq!(entry.pronunciation.as_deref(), Some("/sʌn/"));
        assert_eq!(entry.definition, "The star.");
        assert_eq!(entry.usage, "The sun rises.");
        assert_eq!(entry.save_count, 1);
    }

    #[test]
    fn test_empty_candidates_have_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.text().is_none());
        assert!(parse_definition("not json").is_err());
    }

    #[test]
    fn test_api_error_classification() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}}"#;
        let error = api_error(429, body);
        match classify_definition_error("sun", error) {
            LexiError::Quota(message) => assert!(message.contains("check quota")),
            other => panic!("expected quota error, got {:?}", other),
        }

        let exhausted = LexiError::Api { status: 400, message: "RESOURCE_EXHAUSTED".into() };
        assert_eq!(classify_definition_error("sun", exhausted).to_string(), QUOTA_MESSAGE);

        let server = api_error(500, "upstream exploded");
        assert_eq!(
            classify_definition_error("sun", server).to_string(),
            "Failed to get definition for \"sun\"."
        );
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type(&PathBuf::from("scan.PNG")).unwrap(), "image/png");
        assert_eq!(image_mime_type(&PathBuf::from("photo.jpeg")).unwrap(), "image/jpeg");
        assert!(matches!(
            image_mime_type(&PathBuf::from("notes.txt")),
            Err(LexiError::UnsupportedFileType(_))
        ));
        assert!(image_mime_type(&PathBuf::from("no_extension")).is_err());
    }
}
