use log::debug;

use crate::{
    basis::{positive, OutputSpec, MAX_IMAGE_PIXELS},
    error::{Error, Result},
    grid::{Grid, Pos, VecOnGrid},
};


/// 分割数を数えるときに浮動小数点誤差として無視する割合.
const COUNT_TOLERANCE: f64 = 1e-9;

/// `CropRect` は一枚のページに載せる原画像上の矩形を表す. `right` と `bottom` は含まない.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_degenerate(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }
}

/// `Page` は出力する一枚のページを表す. `number` は 1 始まり.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub pos: Pos,
    pub crop: CropRect,
}

/// `PageGrid` は原画像をページへ割り付けた結果を表す.
#[derive(Debug)]
pub struct PageGrid {
    cells: VecOnGrid<CropRect>,
    scale: f64,
    canvas_width: u32,
    canvas_height: u32,
    margin_px: u32,
}

impl PageGrid {
    /// `source_width` x `source_height` px の原画像を `spec` の出力サイズとページに割り付ける.
    ///
    /// 一つでも幅か高さが 0 のページがあれば何も返さずに失敗する.
    pub fn new(spec: &OutputSpec, source_width: u32, source_height: u32) -> Result<Self> {
        let layout = &spec.layout;
        layout.validate()?;
        positive("width", spec.size.width)?;
        positive("height", spec.size.height)?;

        let usable_width = layout.usable_width();
        let usable_height = layout.usable_height();
        debug!(
            "usable page area: {:.3} x {:.3}",
            usable_width, usable_height
        );

        let columns = axis_bounds(spec.size.width, usable_width, source_width);
        let rows = axis_bounds(spec.size.height, usable_height, source_height);
        let (columns, rows) = match (columns, rows) {
            (Ok(columns), Ok(rows)) => (columns, rows),
            // 列 `x` が 0px なら, その列の 1 行目のページを報告する
            (Err(x), rows) => {
                let pages_high = page_count(spec.size.height, usable_height);
                return Err(Error::DegenerateTile {
                    page: ((x - 1) as f64 * pages_high + 1.0) as usize,
                    width: 0,
                    height: rows.ok().map_or(0, |r| r[0].1 - r[0].0),
                });
            }
            (Ok(columns), Err(y)) => {
                return Err(Error::DegenerateTile {
                    page: y as usize,
                    width: columns[0].1 - columns[0].0,
                    height: 0,
                });
            }
        };
        let grid = Grid::new(columns.len() as u32, rows.len() as u32);

        let cells = VecOnGrid::try_from_fn(grid, |pos| {
            let (left, right) = columns[pos.x() as usize];
            let (top, bottom) = rows[pos.y() as usize];
            let crop = CropRect {
                left,
                top,
                right,
                bottom,
            };

            if crop.is_degenerate() {
                return Err(Error::DegenerateTile {
                    page: grid.page_number(pos),
                    width: crop.width(),
                    height: crop.height(),
                });
            }

            debug!("page {} {:?}: {:?}", grid.page_number(pos), pos, crop);
            Ok(crop)
        })?;

        let scale = source_height as f64 / spec.size.height;
        debug!("pixel density: {:.3} px per unit", scale);

        let canvas_width = (layout.page_width * scale).ceil();
        let canvas_height = (layout.page_height * scale).ceil();
        if canvas_width * canvas_height > MAX_IMAGE_PIXELS as f64 {
            return Err(Error::PageTooLarge {
                width: canvas_width,
                height: canvas_height,
                max: MAX_IMAGE_PIXELS,
            });
        }

        Ok(Self {
            cells,
            scale,
            canvas_width: canvas_width as u32,
            canvas_height: canvas_height as u32,
            margin_px: (layout.margin * scale) as u32,
        })
    }

    pub fn grid(&self) -> Grid {
        self.cells.grid()
    }

    pub fn pages_wide(&self) -> u32 {
        self.grid().width()
    }

    pub fn pages_high(&self) -> u32 {
        self.grid().height()
    }

    pub fn len(&self) -> usize {
        self.grid().len()
    }

    /// 原画像のピクセル数を出力の物理単位で割ったもの.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// ページ一枚分のキャンバスのピクセル数 `(width, height)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// 切り抜きを貼り付けるキャンバス上のオフセット. 縦横共通.
    pub fn margin_px(&self) -> u32 {
        self.margin_px
    }

    pub fn crop(&self, pos: Pos) -> Option<&CropRect> {
        self.cells.get(pos)
    }

    /// ページ番号順に全ページを返す.
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        let grid = self.grid();
        self.cells.iter_with_pos().map(move |(pos, crop)| Page {
            number: grid.page_number(pos),
            pos,
            crop: *crop,
        })
    }
}

/// 一つの軸について, ページごとの原画像上のピクセル区間 `[start, end)` を求める.
///
/// ページ数がピクセル数を超える場合はどこかのページが必ず 0px になるので, 区間を並べる前に
/// 最初に 0px になるページの番号 (1 始まり) を `Err` で返す.
fn axis_bounds(total: f64, usable: f64, pixels: u32) -> std::result::Result<Vec<(u32, u32)>, u32> {
    let count = page_count(total, usable);
    let to_px = |unit: f64| (unit * pixels as f64 / total) as u32;
    let interval = |i: u32| (to_px((i - 1) as f64 * usable), to_px((i as f64 * usable).min(total)));

    if count > pixels as f64 {
        // pixels + 1 個の区間を [0, pixels] に並べると必ずどれかが空になる
        let empty = (1..=pixels.saturating_add(1))
            .find(|&i| {
                let (start, end) = interval(i);
                start == end
            })
            .unwrap_or(1);
        return Err(empty);
    }

    let count = count as u32;
    let bounds = (1..=count)
        .map(|i| {
            if i == count {
                (interval(i).0, pixels)
            } else {
                interval(i)
            }
        })
        .collect();
    Ok(bounds)
}

/// `ceil(total / usable)`. 整数との差が誤差程度ならその整数とみなす.
///
/// `u32` に収まらないこともあるので `f64` のまま返す.
fn page_count(total: f64, usable: f64) -> f64 {
    let ratio = total / usable;
    let nearest = ratio.round();
    let count = if (ratio - nearest).abs() <= ratio * COUNT_TOLERANCE {
        nearest
    } else {
        ratio.ceil()
    };
    count.max(1.0)
}
