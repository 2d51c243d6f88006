use std::path::Path;

use image::{Rgb, RgbImage};

use crate::{
    basis::{MarginMode, PageLayout, Target},
    error::{Error, ErrorKind},
    run, Config,
};

fn write_gradient(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
    .save(path)
    .unwrap();
}

fn config(input: &Path, output_dir: &Path, target: Target) -> Config {
    Config {
        input: input.to_owned(),
        target,
        layout: PageLayout::default(),
        dpi: None,
        output_dir: output_dir.to_owned(),
    }
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn splits_into_letter_pages() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("poster.png");
    write_gradient(&input, 1000, 500);
    let out = dir.path().join("pages");

    let summary = run(&config(&input, &out, Target::Width(10.0))).unwrap();
    assert_eq!(summary.size.height, 5.0);
    assert_eq!((summary.pages_wide, summary.pages_high), (2, 1));
    assert_eq!(summary.written.len(), 2);
    assert_eq!(
        summary.pages_wide as usize * summary.pages_high as usize,
        files_in(&out)
    );
}

#[test]
fn double_margin_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("poster.png");
    write_gradient(&input, 1000, 500);
    let out = dir.path().join("pages");

    let mut config = config(&input, &out, Target::Width(16.0));
    config.layout = PageLayout {
        margin_mode: MarginMode::Double,
        ..PageLayout::default()
    };
    let summary = run(&config).unwrap();
    assert_eq!((summary.pages_wide, summary.pages_high), (3, 1));
    assert_eq!(files_in(&out), 3);
}

#[test]
fn output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("poster.png");
    write_gradient(&input, 640, 480);

    let first = run(&config(&input, &dir.path().join("a"), Target::Height(20.0))).unwrap();
    let second = run(&config(&input, &dir.path().join("b"), Target::Height(20.0))).unwrap();

    assert_eq!(first.written.len(), second.written.len());
    for (a, b) in first.written.iter().zip(&second.written) {
        assert_eq!(a.file_name(), b.file_name());
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }
}

#[test]
fn degenerate_request_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    write_gradient(&input, 3, 3);
    let out = dir.path().join("pages");

    let err = run(&config(&input, &out, Target::Width(30.0))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
    assert_eq!(files_in(&out), 0);
}

#[test]
fn dpi_gives_pixels_to_a_tiny_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    write_gradient(&input, 3, 3);
    let out = dir.path().join("pages");

    let mut config = config(&input, &out, Target::Width(30.0));
    config.dpi = Some(10.0);
    let summary = run(&config).unwrap();

    // 300x300px を 8.0 x 10.5 のページに並べる
    assert_eq!((summary.pages_wide, summary.pages_high), (4, 3));
    assert_eq!(files_in(&out), 12);
    let page = image::open(&summary.written[0]).unwrap().to_rgb8();
    assert_eq!(page.dimensions(), (85, 110));
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pages");
    let err = run(&config(
        &dir.path().join("nothing.png"),
        &out,
        Target::Width(10.0),
    ))
    .unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert_eq!(files_in(&out), 0);
}

#[test]
fn rejects_non_positive_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("poster.png");
    write_gradient(&input, 100, 100);
    let out = dir.path().join("pages");

    let err = run(&config(&input, &out, Target::Height(0.0))).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { name: "height", .. }));

    let mut bad_page = config(&input, &out, Target::Height(5.0));
    bad_page.layout.page_height = -11.0;
    let err = run(&bad_page).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue {
            name: "page_height",
            ..
        }
    ));

    let mut bad_dpi = config(&input, &out, Target::Height(5.0));
    bad_dpi.dpi = Some(-72.0);
    let err = run(&bad_dpi).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { name: "dpi", .. }));

    // dpi は画像を開く前に検査される
    let mut before_decode = config(&dir.path().join("nothing.png"), &out, Target::Height(5.0));
    before_decode.dpi = Some(0.0);
    let err = run(&before_decode).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { name: "dpi", .. }));

    assert_eq!(files_in(&out), 0);
}
