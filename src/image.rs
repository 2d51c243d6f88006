use {
    crate::{
        basis::{positive, OutputSize, MAX_IMAGE_PIXELS},
        error::{Error, Result},
    },
    image::{imageops::FilterType, io::Reader, ColorType, ImageFormat, RgbImage},
    log::info,
    std::{fs::File, io::BufReader, path::Path},
};

/// `SourceImage` は分割元の画像を表す. 読み込み時に 8 ビット RGB に正規化する.
pub struct SourceImage {
    pub(crate) pixels: RgbImage,
    pub(crate) format: Option<ImageFormat>,
    pub(crate) color: ColorType,
}

impl SourceImage {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;
        let reader = Reader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|source| Error::Open {
                path: path.to_owned(),
                source,
            })?;
        let format = reader.format();
        let decoded = reader.decode().map_err(|source| Error::Decode {
            path: path.to_owned(),
            source,
        })?;
        let color = decoded.color();

        let image = Self {
            pixels: decoded.to_rgb8(),
            format,
            color,
        };

        info!(
            "loaded image {}: {} {}x{} {:?}",
            path.display(),
            image.format_name(),
            image.width(),
            image.height(),
            image.color
        );

        Ok(image)
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self {
            pixels,
            format: None,
            color: ColorType::Rgb8,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn format_name(&self) -> String {
        match self.format {
            Some(f) => format!("{:?}", f).to_uppercase(),
            None => "UNKNOWN".to_owned(),
        }
    }

    /// 出力サイズ `size` を `dpi` で割り付けたピクセル数に拡大縮小する.
    ///
    /// 結果が 1px 未満になる場合や `MAX_IMAGE_PIXELS` を超える場合は `dpi` が不正とする.
    pub fn resample(self, size: OutputSize, dpi: f64) -> Result<Self> {
        let dpi = positive("dpi", dpi)?;
        let width = (size.width * dpi).trunc();
        let height = (size.height * dpi).trunc();
        if width < 1.0 || height < 1.0 || width * height > MAX_IMAGE_PIXELS as f64 {
            return Err(Error::InvalidValue { name: "dpi", value: dpi });
        }
        let (width, height) = (width as u32, height as u32);

        info!("resizing output image to {}x{}px", width, height);

        let pixels = image::imageops::resize(&self.pixels, width, height, FilterType::Lanczos3);
        Ok(Self { pixels, ..self })
    }
}
