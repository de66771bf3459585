use super::types::{FlatTextList, RecognitionResult};

/// Copies every element's text out of `result`, block by block, line by line.
/// Text is passed through untouched; empty levels contribute nothing.
pub fn flatten(result: &RecognitionResult) -> FlatTextList {
    result
        .blocks
        .iter()
        .flat_map(|block| &block.lines)
        .flat_map(|line| &line.elements)
        .map(|element| element.text.clone())
        .collect()
}
