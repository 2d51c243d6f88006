use crate::error::{Error, Result};

/// `Target` は利用者が指定した出力サイズの一辺を表す. もう一辺は原画像の縦横比から求める.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Height(f64),
    Width(f64),
}

/// `OutputSize` は出力ポスター全体の物理単位での大きさを表す.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSize {
    pub width: f64,
    pub height: f64,
}

/// `MarginMode` はページの寸法から余白をいくつ差し引くかを表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginMode {
    /// 左上の一辺だけ余白を取る. 使える幅は `page - margin`.
    Single,
    /// 両辺に余白を取る. 使える幅は `page - 2 * margin`.
    Double,
}

impl MarginMode {
    fn edges(self) -> f64 {
        match self {
            MarginMode::Single => 1.0,
            MarginMode::Double => 2.0,
        }
    }
}

impl Default for MarginMode {
    fn default() -> Self {
        MarginMode::Single
    }
}

/// `PageLayout` は印刷する用紙一枚の寸法と余白を表す.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub margin_mode: MarginMode,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 8.5,
            page_height: 11.0,
            margin: 0.5,
            margin_mode: MarginMode::default(),
        }
    }
}

impl PageLayout {
    pub fn validate(&self) -> Result<()> {
        positive("page_width", self.page_width)?;
        positive("page_height", self.page_height)?;
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidValue {
                name: "margin",
                value: self.margin,
            });
        }
        if self.usable_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(Error::NoUsableArea {
                margin: self.margin,
                page_width: self.page_width,
                page_height: self.page_height,
            });
        }
        Ok(())
    }

    pub fn usable_width(&self) -> f64 {
        self.page_width - self.margin * self.margin_mode.edges()
    }

    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin * self.margin_mode.edges()
    }
}

/// `OutputSpec` は出力サイズと用紙レイアウトの組. 単位はすべて同じ物理単位.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSpec {
    pub size: OutputSize,
    pub layout: PageLayout,
}

/// 一枚の画像として確保してよいピクセル数の上限. RGB8 で約 3 GiB.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 30;

/// 有限の正の値であることを確かめる.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidValue { name, value })
    }
}

#[test]
fn test_usable_size() {
    let layout = PageLayout::default();
    assert_eq!(layout.usable_width(), 8.0);
    assert_eq!(layout.usable_height(), 10.5);

    let layout = PageLayout {
        margin_mode: MarginMode::Double,
        ..PageLayout::default()
    };
    assert_eq!(layout.usable_width(), 7.5);
    assert_eq!(layout.usable_height(), 10.0);
}

#[test]
fn test_validate_layout() {
    assert!(PageLayout::default().validate().is_ok());

    let borderless = PageLayout {
        margin: 0.0,
        ..PageLayout::default()
    };
    assert!(borderless.validate().is_ok());

    let negative_margin = PageLayout {
        margin: -0.5,
        ..PageLayout::default()
    };
    assert!(matches!(
        negative_margin.validate(),
        Err(Error::InvalidValue { name: "margin", .. })
    ));

    let zero_page = PageLayout {
        page_width: 0.0,
        ..PageLayout::default()
    };
    assert!(matches!(
        zero_page.validate(),
        Err(Error::InvalidValue {
            name: "page_width",
            ..
        })
    ));

    // 片側なら 4.0 残るが両側だと 0 になる
    let eaten = PageLayout {
        page_width: 8.0,
        margin: 4.0,
        margin_mode: MarginMode::Double,
        ..PageLayout::default()
    };
    assert!(matches!(eaten.validate(), Err(Error::NoUsableArea { .. })));
    let single = PageLayout {
        margin_mode: MarginMode::Single,
        ..eaten
    };
    assert!(single.validate().is_ok());
}
