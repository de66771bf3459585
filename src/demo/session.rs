use anyhow::Result;
use scantext::image2text::FlatTextList;

use crate::samples::Source;

/// Caller-held replacement for a global busy flag: which request is in
/// flight, and the texts of the last finished one.
#[derive(Debug, Default)]
pub struct ScanSession {
    processing: Option<Source>,
    found_texts: FlatTextList,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    /// Whether the sample buttons would be enabled.
    pub fn can_select(&self) -> bool {
        !self.is_processing()
    }

    pub fn select(&mut self, source: Source) -> Result<()> {
        if let Some(current) = &self.processing {
            anyhow::bail!("Still processing {}", current.label());
        }
        self.found_texts.clear();
        self.processing = Some(source);
        Ok(())
    }

    /// Stores the texts of the request in flight and frees the session.
    pub fn complete(&mut self, texts: FlatTextList) -> Option<Source> {
        let finished = self.processing.take();
        if finished.is_none() {
            log::warn!("Dropping {} texts, no request was in flight", texts.len());
            return None;
        }
        self.found_texts = texts;
        finished
    }

    pub fn found_texts(&self) -> &[String] {
        &self.found_texts
    }
}
