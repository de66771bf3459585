use anyhow::Result;
use image::DynamicImage;
use rusty_tesseract::{Args, DataOutput, Image};
use std::collections::HashMap;

use super::completion::Completion;
use super::engine::OcrEngine;
use super::types::{OcrConfig, RecognitionResult, TextBlock, TextElement, TextLine};

// tesseract's TSV level for individual words
const WORD_LEVEL: i32 = 5;

pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn args(&self) -> Args {
        Args {
            lang: self.config.lang.clone(),
            config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
            dpi: self.config.dpi.map(|v| v as i32),
            psm: self.config.psm.map(|v| v as i32),
            oem: self.config.oem.map(|v| v as i32),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(OcrConfig::default())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn submit(&self, image: &DynamicImage, completion: Completion) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                completion.fail(anyhow::anyhow!("Tesseract needs a tokio runtime: {}", e));
                return;
            }
        };

        // tesseract reads its own copy; the caller's image is left alone
        let image = image.clone();
        let args = self.args();

        handle.spawn_blocking(move || match perform_ocr_tesseract(&image, &args) {
            Ok(result) => {
                log::debug!(
                    "Tesseract found {} blocks, {} words",
                    result.blocks.len(),
                    result.element_count()
                );
                completion.succeed(&result);
            }
            Err(e) => {
                completion.fail(e);
            }
        });
    }
}

fn perform_ocr_tesseract(image: &DynamicImage, args: &Args) -> Result<RecognitionResult> {
    let ocr_image = Image::from_dynamic_image(image)
        .map_err(|e| anyhow::anyhow!("Failed to hand image to tesseract: {}", e))?;

    let data_output = rusty_tesseract::image_to_data(&ocr_image, args)
        .map_err(|e| anyhow::anyhow!("Tesseract failed: {}", e))?;

    Ok(data_output_to_result(&data_output))
}

/// One word row of tesseract's TSV output, reduced to what the hierarchy needs.
#[derive(Debug, Clone)]
struct WordRow {
    level: i32,
    block_num: i32,
    par_num: i32,
    line_num: i32,
    text: String,
}

fn data_output_to_result(data_output: &DataOutput) -> RecognitionResult {
    group_words(data_output.data.iter().map(|row| WordRow {
        level: row.level,
        block_num: row.block_num,
        par_num: row.par_num,
        line_num: row.line_num,
        text: row.text.clone(),
    }))
}

/// Builds blocks from `block_num` and lines from `(par_num, line_num)`,
/// keeping tesseract's row order. Non-word rows and blank words are dropped.
fn group_words(rows: impl IntoIterator<Item = WordRow>) -> RecognitionResult {
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current_block: Option<i32> = None;
    let mut current_line: Option<(i32, i32)> = None;

    for row in rows {
        if row.level != WORD_LEVEL || row.text.trim().is_empty() {
            continue;
        }

        if current_block != Some(row.block_num) {
            blocks.push(TextBlock::default());
            current_block = Some(row.block_num);
            current_line = None;
        }
        let Some(block) = blocks.last_mut() else {
            continue;
        };

        let line_key = (row.par_num, row.line_num);
        if current_line != Some(line_key) {
            block.lines.push(TextLine::default());
            current_line = Some(line_key);
        }
        if let Some(line) = block.lines.last_mut() {
            line.elements.push(TextElement::new(row.text));
        }
    }

    RecognitionResult::new(blocks)
}
