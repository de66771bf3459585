use anyhow::Result;
use clap::ValueEnum;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// The bundled images offered by the demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    CerealPackage,
    Map,
    ShampooBottle,
}

impl Sample {
    pub const ALL: [Sample; 3] = [Sample::CerealPackage, Sample::Map, Sample::ShampooBottle];

    pub fn label(&self) -> &'static str {
        match self {
            Sample::CerealPackage => "Process Cereal Package",
            Sample::Map => "Process Map",
            Sample::ShampooBottle => "Process Shampoo Bottle",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Sample::CerealPackage => "img1.png",
            Sample::Map => "img2.png",
            Sample::ShampooBottle => "img3.png",
        }
    }

    pub fn path_in(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.file_name())
    }
}

/// What the user picked: a bundled sample or an arbitrary file.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Sample(Sample),
    File(PathBuf),
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Sample(sample) => sample.label().to_string(),
            Source::File(path) => format!("Process {}", path.display()),
        }
    }

    pub fn path(&self, assets_dir: &Path) -> PathBuf {
        match self {
            Source::Sample(sample) => sample.path_in(assets_dir),
            Source::File(path) => path.clone(),
        }
    }

    pub fn load(&self, assets_dir: &Path) -> Result<DynamicImage> {
        let path = self.path(assets_dir);
        image::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load image from {}: {}", path.display(), e))
    }
}
