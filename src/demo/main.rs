use anyhow::Result;
use clap::Parser;
use scantext::image2text::{engine_for, recognize, FlatTextList, OcrConfig, OcrEngine, OcrModel};
use scantext::logger::init_logger_exe;
use std::path::{Path, PathBuf};

mod samples;
use crate::samples::{Sample, Source};

mod session;
use crate::session::ScanSession;

#[derive(Parser)]
#[command(version, about = "A CLI tool to list the words found in an image", long_about = None)]
struct Cli {
    #[arg(long, value_enum, help = "bundled sample to process (repeatable)")]
    sample: Vec<Sample>,
    #[arg(long, help = "process every bundled sample, one after the other")]
    all: bool,
    #[arg(long, help = "input image file (repeatable)")]
    image: Vec<PathBuf>,
    #[arg(long, help = "directory holding the bundled samples", default_value = "assets")]
    assets_dir: PathBuf,
    #[arg(long, help = "OCR settings as JSON")]
    config: Option<PathBuf>,
    #[arg(long, help = "OCR model (tesseract, default), overrides the config file")]
    model: Option<String>,
    #[arg(long, help = "recognition language, overrides the config file")]
    lang: Option<String>,
    #[arg(long, help = "print each result as a JSON array", default_value_t = false)]
    json: bool,
}

impl Cli {
    fn sources(&self) -> Vec<Source> {
        let samples: Vec<Sample> = if self.all {
            Sample::ALL.to_vec()
        } else {
            self.sample.clone()
        };

        samples
            .into_iter()
            .map(Source::Sample)
            .chain(self.image.iter().cloned().map(Source::File))
            .collect()
    }

    fn ocr_config(&self) -> Result<OcrConfig> {
        let mut config = match &self.config {
            Some(path) => OcrConfig::from_json_file(path)?,
            None => OcrConfig::default(),
        };
        if let Some(model) = &self.model {
            config.ocr_model = OcrModel::from(model.as_str());
        }
        if let Some(lang) = &self.lang {
            config.lang = lang.clone();
        }
        Ok(config)
    }
}

async fn run_source(
    engine: &dyn OcrEngine,
    session: &mut ScanSession,
    source: Source,
    assets_dir: &Path,
) -> Result<()> {
    session.select(source.clone())?;
    log::info!("{}", source.label());

    let texts: FlatTextList = match source.load(assets_dir) {
        Ok(image) => recognize(engine, &image).await,
        Err(e) => {
            log::error!("{}", e);
            Vec::new()
        }
    };

    log::info!("Found {} texts", texts.len());
    session.complete(texts);
    Ok(())
}

fn render(label: &str, texts: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(texts)?);
        return Ok(());
    }

    println!("== {}", label);
    for text in texts {
        println!("{}", text);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger_exe();

    let cli = Cli::parse();
    let sources = cli.sources();
    if sources.is_empty() {
        anyhow::bail!("Nothing to process, pass --sample, --all or --image");
    }

    let config = cli.ocr_config()?;
    log::debug!("OCR model: {}, lang: {}", config.ocr_model, config.lang);
    let engine = engine_for(&config);

    let mut session = ScanSession::new();
    for source in sources {
        let label = source.label();
        run_source(engine.as_ref(), &mut session, source, &cli.assets_dir).await?;
        render(&label, session.found_texts(), cli.json)?;
    }

    Ok(())
}
