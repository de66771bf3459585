// OCR module structure
mod completion;
mod engine;
mod error;
mod flatten;
mod ocr_tesseract;
mod types;

pub use completion::{channel, Completion, Pending};
pub use engine::OcrEngine;
pub use error::RecognitionFailed;
pub use flatten::flatten;
pub use ocr_tesseract::TesseractEngine;
pub use types::{
    FlatTextList, OcrConfig, OcrModel, RecognitionResult, TextBlock, TextElement, TextLine,
};

use image::DynamicImage;

pub fn engine_for(config: &OcrConfig) -> Box<dyn OcrEngine> {
    match config.ocr_model {
        OcrModel::Tesseract | OcrModel::Default => Box::new(TesseractEngine::new(config.clone())),
    }
}

/// Submits `image` to `engine` and suspends until the engine reports back.
pub async fn try_recognize(
    engine: &dyn OcrEngine,
    image: &DynamicImage,
) -> Result<FlatTextList, RecognitionFailed> {
    let (completion, pending) = channel();
    log::debug!(
        "Submitting {}x{} image to {}",
        image.width(),
        image.height(),
        engine.name()
    );
    engine.submit(image, completion);
    pending.wait().await
}

/// Like [`try_recognize`], but a failure is logged once and comes back as an
/// empty list, so it looks the same as an image without text.
pub async fn recognize(engine: &dyn OcrEngine, image: &DynamicImage) -> FlatTextList {
    match try_recognize(engine, image).await {
        Ok(texts) => texts,
        Err(e) => {
            log::error!("Text recognition failed on {}: {:#}", engine.name(), e.detail());
            Vec::new()
        }
    }
}
