use std::{
    path::PathBuf,
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        selection::LookupFailure,
        LexiError,
    },
    gemini::GeminiClient,
};

/// Counts a task as in flight until the task's thread drops it, panics included.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Runs Gemini calls off the UI thread and hands results back through a channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    in_flight: Arc<AtomicUsize>,
}

impl TaskManager {
    pub fn new() -> Result<Self, LexiError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, in_flight: Arc::new(AtomicUsize::new(0)) })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    pub fn has_pending(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed) > 0
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, InFlight) {
        (self.sender.clone(), self.runtime.clone(), InFlight::start(&self.in_flight))
    }

    pub fn extract_text(&self, client: Arc<GeminiClient>, path: PathBuf) {
        let (sender, runtime, in_flight) = self.task_context();

        thread::spawn(move || {
            let _in_flight = in_flight;
            log::info!("Extracting text from {}", path.display());
            let result = runtime
                .block_on(client.extract_text_from_image(&path))
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::TextExtracted(result));
        });
    }

    pub fn fetch_definition(&self, client: Arc<GeminiClient>, word: String, generation: u64) {
        let (sender, runtime, in_flight) = self.task_context();

        thread::spawn(move || {
            let _in_flight = in_flight;
            let result = runtime
                .block_on(client.fetch_word_definition(&word))
                .map_err(|e| LookupFailure::from_error(&word, &e));

            let _ = sender.send(TaskResult::DefinitionFetched { generation, word, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_released_when_task_panics() {
        let manager = TaskManager::new().unwrap();
        let (_sender, _runtime, in_flight) = manager.task_context();
        assert!(manager.has_pending());

        let handle = thread::spawn(move || {
            let _in_flight = in_flight;
            panic!("lookup thread died");
        });
        assert!(handle.join().is_err());
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_in_flight_released_after_result_is_sent() {
        let mut manager = TaskManager::new().unwrap();
        let (sender, _runtime, in_flight) = manager.task_context();

        thread::spawn(move || {
            let _in_flight = in_flight;
            let _ = sender.send(TaskResult::TextExtracted(Ok("text".to_string())));
        })
        .join()
        .unwrap();

        assert_eq!(manager.poll_results().len(), 1);
        assert!(!manager.has_pending());
    }
}
