pub mod image2text;
pub mod logger;
