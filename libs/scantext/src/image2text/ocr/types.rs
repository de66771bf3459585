use serde::{Deserialize, Serialize};

/// Element-level strings in reading order, one per recognized element.
pub type FlatTextList = Vec<String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OcrModel {
    #[serde(alias = "tesseract", alias = "TESSERACT")]
    Tesseract,
    #[serde(alias = "default", alias = "DEFAULT")]
    Default,
}

impl std::fmt::Display for OcrModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrModel::Tesseract => write!(f, "Tesseract"),
            OcrModel::Default => write!(f, "Default"),
        }
    }
}

impl From<&str> for OcrModel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tesseract" => OcrModel::Tesseract,
            _ => OcrModel::Default,
        }
    }
}

impl From<String> for OcrModel {
    fn from(s: String) -> Self {
        OcrModel::from(s.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub ocr_model: OcrModel,
    pub lang: String,
    pub dpi: Option<u32>, // dots per inch
    pub psm: Option<u32>, // page segmentation mode
    pub oem: Option<u32>, // OCR engine mode
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            ocr_model: OcrModel::Default,
            lang: Self::get_default_lang(),
            dpi: None,
            psm: None,
            oem: None,
        }
    }
}

impl OcrConfig {
    pub fn get_default_lang() -> String {
        "eng".to_string()
    }

    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

/// Leaf of the recognition hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
}

impl TextElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub elements: Vec<TextElement>,
}

impl TextLine {
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self { elements }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(TextElement::new).collect())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }
}

/// What an engine hands to its success callback: blocks, then lines, then
/// elements, each in the engine's reading order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub blocks: Vec<TextBlock>,
}

impl RecognitionResult {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn element_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|block| &block.lines)
            .map(|line| line.elements.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_ocr_model_from_str() {
        assert_eq!(OcrModel::from("Tesseract"), OcrModel::Tesseract);
        assert_eq!(OcrModel::from("native"), OcrModel::Default);
        assert_eq!(OcrModel::from(String::from("default")), OcrModel::Default);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: OcrConfig = serde_json::from_str(r#"{ "psm": 6 }"#).unwrap();
        assert_eq!(config.ocr_model, OcrModel::Default);
        assert_eq!(config.lang, "eng");
        assert_eq!(config.psm, Some(6));
        assert_eq!(config.dpi, None);
    }

    #[test]
    fn test_config_model_names_ignore_case() {
        for raw in ["Tesseract", "tesseract", "TESSERACT"] {
            let json = format!(r#"{{ "ocr_model": "{}" }}"#, raw);
            let config: OcrConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.ocr_model, OcrModel::Tesseract, "{}", raw);
        }
        let config: OcrConfig = serde_json::from_str(r#"{ "ocr_model": "default" }"#).unwrap();
        assert_eq!(config.ocr_model, OcrModel::Default);
    }

    #[test]
    fn test_config_from_json_file() {
        let file = config_file(r#"{ "ocr_model": "tesseract", "lang": "swe", "dpi": 300 }"#);

        let config = OcrConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.ocr_model, OcrModel::Tesseract);
        assert_eq!(config.lang, "swe");
        assert_eq!(config.dpi, Some(300));
        assert_eq!(config.psm, None);
    }

    #[test]
    fn test_config_from_malformed_json_file() {
        let file = config_file(r#"{ "lang": "#);

        let err = OcrConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"), "{}", err);
    }

    #[test]
    fn test_config_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = OcrConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"), "{}", err);
    }

    #[test]
    fn test_element_count() {
        let result = RecognitionResult::new(vec![
            TextBlock::new(vec![TextLine::from_words(["a", "b"]), TextLine::default()]),
            TextBlock::default(),
            TextBlock::new(vec![TextLine::from_words(["c"])]),
        ]);
        assert_eq!(result.element_count(), 3);
        assert_eq!(RecognitionResult::empty().element_count(), 0);
    }
}
