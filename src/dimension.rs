use crate::{
    basis::{positive, OutputSize, Target},
    error::Result,
};

/// 指定された一辺と原画像のピクセル縦横比から, 出力サイズのもう一辺を求める.
pub fn resolve(target: Target, source_width: u32, source_height: u32) -> Result<OutputSize> {
    let source_width = source_width as f64;
    let source_height = source_height as f64;

    let size = match target {
        Target::Height(height) => {
            let height = positive("height", height)?;
            OutputSize {
                width: height * (source_width / source_height),
                height,
            }
        }
        Target::Width(width) => {
            let width = positive("width", width)?;
            OutputSize {
                width,
                height: width * (source_height / source_width),
            }
        }
    };

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::prelude::*;

    #[test]
    fn from_width() {
        let size = resolve(Target::Width(10.0), 1000, 500).unwrap();
        assert_eq!(size.width, 10.0);
        assert_eq!(size.height, 5.0);
    }

    #[test]
    fn from_height() {
        let size = resolve(Target::Height(30.0), 1000, 500).unwrap();
        assert_eq!(size.width, 60.0);
        assert_eq!(size.height, 30.0);
    }

    #[test]
    fn keeps_aspect_ratio() {
        // fixed rng for stabilize test results
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..1000 {
            let w = rng.gen_range(1..5000u32);
            let h = rng.gen_range(1..5000u32);
            let given = rng.gen_range(0.1..200.0);
            let target = if rng.gen() {
                Target::Height(given)
            } else {
                Target::Width(given)
            };

            let size = resolve(target, w, h).unwrap();
            let expected = h as f64 / w as f64;
            let actual = size.height / size.width;
            assert!(
                (actual - expected).abs() <= expected * 1e-12,
                "{:?} on {}x{}: {} != {}",
                target,
                w,
                h,
                actual,
                expected
            );
        }
    }

    #[test]
    fn rejects_non_positive() {
        assert!(matches!(
            resolve(Target::Width(0.0), 10, 10),
            Err(Error::InvalidValue { name: "width", .. })
        ));
        assert!(matches!(
            resolve(Target::Height(-3.0), 10, 10),
            Err(Error::InvalidValue { name: "height", .. })
        ));
        assert!(resolve(Target::Height(f64::NAN), 10, 10).is_err());
    }
}
