use crate::core::{
    selection::LookupFailure,
    VocabularyEntry,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    TextExtracted(Result<String, String>),
    DefinitionFetched {
        generation: u64,
        word: String,
        result: Result<VocabularyEntry, LookupFailure>,
    },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::TextExtracted(_) => "text_extraction",
            TaskResult::DefinitionFetched { .. } => "definition_lookup",
        }
    }
}
