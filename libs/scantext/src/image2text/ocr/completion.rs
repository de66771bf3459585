use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::error::RecognitionFailed;
use super::flatten::flatten;
use super::types::{FlatTextList, RecognitionResult};

type Outcome = Result<FlatTextList, RecognitionFailed>;

/// Creates a linked completion handle and the pending side awaited by the
/// caller.
pub fn channel() -> (Completion, Pending) {
    let (tx, rx) = oneshot::channel();
    let completion = Completion {
        slot: Arc::new(Mutex::new(Some(tx))),
    };
    (completion, Pending { rx })
}

/// Handle given to an engine for reporting the outcome of one request.
///
/// Clones share the same cell, so success and failure callbacks may each hold
/// one. Only the first `succeed` or `fail` reaches the caller.
#[derive(Clone, Debug)]
pub struct Completion {
    slot: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

impl Completion {
    /// Flattens `result` while it is still borrowed and delivers the strings.
    /// Returns `false` if the request was already completed or the caller
    /// stopped waiting, in which case nothing is delivered.
    pub fn succeed(&self, result: &RecognitionResult) -> bool {
        match self.take_sender() {
            Some(tx) => tx.send(Ok(flatten(result))).is_ok(),
            None => {
                log::debug!("Ignoring success callback for an already completed request");
                false
            }
        }
    }

    /// Returns `false` if the request was already completed or the caller
    /// stopped waiting, in which case nothing is delivered.
    pub fn fail(&self, err: impl Into<anyhow::Error>) -> bool {
        match self.take_sender() {
            Some(tx) => tx.send(Err(RecognitionFailed::new(err))).is_ok(),
            None => {
                log::debug!("Ignoring failure callback for an already completed request");
                false
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.lock_slot().is_none()
    }

    fn take_sender(&self) -> Option<oneshot::Sender<Outcome>> {
        self.lock_slot().take()
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<Outcome>>> {
        // a panic while holding the lock cannot leave the Option half-written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Caller side of a request. Resolves once, with whichever callback won.
#[derive(Debug)]
pub struct Pending {
    rx: oneshot::Receiver<Outcome>,
}

impl Pending {
    pub async fn wait(self) -> Outcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(RecognitionFailed::new(anyhow::anyhow!(
                "engine dropped the request without reporting a result"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image2text::ocr::types::{TextBlock, TextLine};

    fn hello() -> RecognitionResult {
        RecognitionResult::new(vec![TextBlock::new(vec![TextLine::from_words(["hello"])])])
    }

    #[tokio::test]
    async fn test_success_resolves_with_flattened_text() {
        let (completion, pending) = channel();
        assert!(completion.succeed(&hello()));
        assert_eq!(pending.wait().await.unwrap(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_failure_resolves_with_error() {
        let (completion, pending) = channel();
        assert!(completion.fail(anyhow::anyhow!("bad pixels")));
        let err = pending.wait().await.unwrap_err();
        assert!(err.to_string().contains("bad pixels"));
    }

    #[tokio::test]
    async fn test_second_callback_is_ignored() {
        let (completion, pending) = channel();
        let on_failure = completion.clone();

        assert!(completion.succeed(&hello()));
        assert!(on_failure.is_completed());
        assert!(!on_failure.fail(anyhow::anyhow!("late failure")));
        assert!(!completion.succeed(&RecognitionResult::empty()));

        assert_eq!(pending.wait().await.unwrap(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_dropped_completion_is_a_failure() {
        let (completion, pending) = channel();
        drop(completion);
        assert!(pending.wait().await.is_err());
    }

    #[tokio::test]
    async fn test_completion_after_caller_gave_up() {
        let (completion, pending) = channel();
        drop(pending);
        assert!(!completion.succeed(&hello()));
        assert!(completion.is_completed());
    }

    #[tokio::test]
    async fn test_failure_after_caller_gave_up() {
        let (completion, pending) = channel();
        let on_success = completion.clone();
        drop(pending);

        assert!(!completion.fail(anyhow::anyhow!("too late")));
        assert!(!on_success.succeed(&hello()));
    }

    #[tokio::test]
    async fn test_completes_from_another_thread() {
        let (completion, pending) = channel();
        let worker = std::thread::spawn(move || completion.succeed(&hello()));
        assert_eq!(pending.wait().await.unwrap(), vec!["hello"]);
        assert!(worker.join().unwrap());
    }
}
