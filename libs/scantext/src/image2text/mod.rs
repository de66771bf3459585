pub mod ocr;
pub use ocr::{
    channel, engine_for, flatten, recognize, try_recognize, Completion,
    FlatTextList, OcrConfig, OcrEngine, OcrModel, Pending, RecognitionFailed, RecognitionResult,
    TesseractEngine, TextBlock, TextElement, TextLine,
};
