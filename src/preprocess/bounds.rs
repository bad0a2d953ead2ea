/// Upper bounds for the drawn raster surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        PreprocessConfig { max_width: 400, max_height: 533 }
    }
}

/// Computes the surface size for an image of `width × height`.
///
/// The width bound is applied first; the height bound is then applied to the
/// already-scaled result, so a tall image can end up narrower than
/// `max_width`. Both passes scale the two dimensions by the same factor, which
/// keeps the aspect ratio. Fractional results are truncated the way a raster
/// surface truncates its assigned size, and never drop below one pixel.
pub fn fit_dimensions(width: u32, height: u32, config: &PreprocessConfig) -> (u32, u32) {
    let max_width  = f64::from(config.max_width);
    let max_height = f64::from(config.max_height);
    let mut w = f64::from(width);
    let mut h = f64::from(height);

    if w > max_width {
        h *= max_width / w;
        w = max_width;
    }

    if h > max_height {
        w *= max_height / h;
        h = max_height;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn fit(w: u32, h: u32) -> (u32, u32) {
        fit_dimensions(w, h, &PreprocessConfig::default())
    }

    #[test]
    fn wide_image_is_scaled_by_width_only() {
        assert_eq!(fit(800, 600), (400, 300));
    }

    #[test]
    fn tall_image_is_scaled_by_height_only() {
        assert_eq!(fit(300, 1200), (133, 533));
    }

    #[test]
    fn image_within_bounds_is_unchanged() {
        assert_eq!(fit(200, 200), (200, 200));
        assert_eq!(fit(400, 533), (400, 533));
    }

    #[test]
    fn height_pass_compounds_on_width_pass() {
        // 1000x5000 -> 400x2000 -> 106.6x533
        assert_eq!(fit(1000, 5000), (106, 533));
    }

    #[test]
    fn very_wide_image_keeps_a_thin_strip() {
        assert_eq!(fit(4000, 100), (400, 10));
    }

    #[test]
    fn degenerate_sizes_keep_one_pixel() {
        assert_eq!(fit(1, 100_000), (1, 533));
        assert_eq!(fit(100_000, 1), (400, 1));
    }

    #[test]
    fn custom_bounds_are_honoured() {
        let config = PreprocessConfig { max_width: 100, max_height: 100 };
        assert_eq!(fit_dimensions(300, 150, &config), (100, 50));
        assert_eq!(fit_dimensions(150, 300, &config), (50, 100));
    }

    #[test]
    fn random_oversized_images_fit_and_keep_their_ratio() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let w0: u32 = rng.gen_range(401..6000);
            let h0: u32 = rng.gen_range(534..6000);
            let (w, h) = fit(w0, h0);

            assert!(w <= 400, "{}x{} -> {}x{}", w0, h0, w, h);
            assert!(h <= 533, "{}x{} -> {}x{}", w0, h0, w, h);

            // Truncation costs at most one pixel on each side.
            let ratio = f64::from(w0) / f64::from(h0);
            let expected_w = f64::from(h) * ratio;
            assert!(
                (f64::from(w) - expected_w).abs() <= 1.0 + ratio,
                "{}x{} -> {}x{} drifts from ratio {}", w0, h0, w, h, ratio
            );
        }
    }
}
