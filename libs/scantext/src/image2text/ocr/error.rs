/// The only way a recognition request can fail. Engine details stay in the
/// wrapped error and are meant for logs.
#[derive(Debug, thiserror::Error)]
#[error("text recognition failed: {0:#}")]
pub struct RecognitionFailed(anyhow::Error);

impl RecognitionFailed {
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self(err.into())
    }

    pub fn detail(&self) -> &anyhow::Error {
        &self.0
    }
}
