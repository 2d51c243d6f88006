use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// `ErrorKind` はエラーを入力の問題, 分割形状の問題, 出力の問題のどれかに分類する.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Geometry,
    Output,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("error loading input file \"{}\", please make sure it exists and is in a supported image format", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error loading input file \"{}\", please make sure it exists and is in a supported image format", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{name} must be a positive number, but found {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("margin {margin} leaves no usable area on a {page_width}x{page_height} page")]
    NoUsableArea {
        margin: f64,
        page_width: f64,
        page_height: f64,
    },

    #[error("a page would be {width:.0}x{height:.0}px, which is more than {max} pixels. try a smaller page size")]
    PageTooLarge { width: f64, height: f64, max: u64 },

    #[error("too few pixels per page: page {page} would be {width}x{height}px. try a smaller output size, larger pages, or a higher --dpi")]
    DegenerateTile { page: usize, width: u32, height: u32 },

    #[error("failed to create output directory \"{}\"", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save page to \"{}\"", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. }
            | Error::Decode { .. }
            | Error::InvalidValue { .. }
            | Error::NoUsableArea { .. }
            | Error::PageTooLarge { .. } => ErrorKind::Input,
            Error::DegenerateTile { .. } => ErrorKind::Geometry,
            Error::CreateDir { .. } | Error::Save { .. } => ErrorKind::Output,
        }
    }
}
