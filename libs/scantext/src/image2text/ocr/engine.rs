use image::DynamicImage;

use super::completion::Completion;

/// A text recognizer driven by callbacks.
///
/// `submit` must return promptly. The work may run anywhere, but it has to end
/// with `completion.succeed(..)` or `completion.fail(..)`; dropping every clone
/// of the completion without calling either is reported as a failure.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn submit(&self, image: &DynamicImage, completion: Completion);
}
