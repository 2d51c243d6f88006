//! 一枚の画像を, 指定した大きさで印刷できるようにページ単位に分割する.

use std::path::PathBuf;

use log::info;

pub mod basis;
pub mod dimension;
pub mod error;
pub mod grid;
pub mod image;
pub mod render;
pub mod tile;

#[cfg(test)]
mod tests;

use crate::{
    basis::{OutputSize, OutputSpec, PageLayout, Target},
    error::{Error, Result},
    image::SourceImage,
    tile::PageGrid,
};

/// `Config` はコマンドライン引数から組み立てた一回の実行の設定.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub target: Target,
    pub layout: PageLayout,
    pub dpi: Option<f64>,
    pub output_dir: PathBuf,
}

/// `Summary` は実行結果.
#[derive(Debug)]
pub struct Summary {
    pub size: OutputSize,
    pub pages_wide: u32,
    pub pages_high: u32,
    pub written: Vec<PathBuf>,
}

/// 画像を読み込み, 出力サイズを決めて, 全ページを書き出す.
///
/// ページの割り付けは書き出しの前にすべて検査するので, 割り付けに失敗した場合は何も書かない.
pub fn run(config: &Config) -> Result<Summary> {
    config.layout.validate()?;
    if let Some(dpi) = config.dpi {
        basis::positive("dpi", dpi)?;
    }

    let source = SourceImage::open(&config.input)?;
    let size = dimension::resolve(config.target, source.width(), source.height())?;
    info!(
        "output image size will be {:.1} high and {:.1} wide",
        size.height, size.width
    );

    let source = match config.dpi {
        Some(dpi) => source.resample(size, dpi)?,
        None => source,
    };

    let spec = OutputSpec {
        size,
        layout: config.layout,
    };
    let pages = PageGrid::new(&spec, source.width(), source.height())?;
    info!(
        "splitting into {} pages ({} wide x {} high)",
        pages.len(),
        pages.pages_wide(),
        pages.pages_high()
    );

    std::fs::create_dir_all(&config.output_dir).map_err(|source| Error::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;
    let written = render::render_all(&source, &pages, &config.output_dir)?;

    Ok(Summary {
        size,
        pages_wide: pages.pages_wide(),
        pages_high: pages.pages_high(),
        written,
    })
}
