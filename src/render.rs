use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use log::info;

use crate::{
    error::{Error, Result},
    image::SourceImage,
    tile::{Page, PageGrid},
};

/// ページの余白の色.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// `page` の番号から出力ファイル名を決める.
pub fn page_file_name(page: &Page) -> String {
    format!("page_{}.png", page.number)
}

/// 一枚のページを描く. 白いキャンバスの余白分ずらした位置に切り抜きをそのまま貼る.
pub fn render_page(source: &SourceImage, pages: &PageGrid, page: &Page) -> RgbImage {
    let (width, height) = pages.canvas_size();
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let crop = page.crop;
    let piece = imageops::crop_imm(
        source.pixels(),
        crop.left,
        crop.top,
        crop.width(),
        crop.height(),
    );
    // はみ出した分は replace が切り捨てる
    imageops::replace(&mut canvas, &piece, pages.margin_px(), pages.margin_px());

    canvas
}

/// 全ページを `out_dir` に書き出し, 書いたパスをページ番号順に返す.
pub fn render_all(source: &SourceImage, pages: &PageGrid, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let total = pages.len();
    let mut written = Vec::with_capacity(total);

    for page in pages.pages() {
        let path = out_dir.join(page_file_name(&page));
        render_page(source, pages, &page)
            .save(&path)
            .map_err(|source| Error::Save {
                path: path.clone(),
                source,
            })?;

        info!("saved page {}/{} to {}", page.number, total, path.display());
        written.push(path);
    }

    Ok(written)
}
