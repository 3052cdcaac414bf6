/// A centered square region of a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl CropBox {
    /// Centers a square whose side is `relative` times the shorter edge.
    ///
    /// Returns `None` for an empty frame or when the side rounds down to zero.
    pub fn centered(width: u32, height: u32, relative: f64) -> Option<Self> {
        if width == 0 || height == 0 || !(relative > 0.0) {
            return None;
        }

        let shorter = width.min(height);
        let size = ((f64::from(shorter) * relative.min(1.0)).floor() as u32).min(shorter);
        if size == 0 {
            return None;
        }

        Some(Self {
            x: (width - size) / 2,
            y: (height - size) / 2,
            size,
        })
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x.saturating_add(self.size) <= width && self.y.saturating_add(self.size) <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_frame_centers_half_of_height() {
        let crop = CropBox::centered(640, 480, 0.5).unwrap();
        assert_eq!(crop, CropBox { x: 200, y: 120, size: 240 });
    }

    #[test]
    fn portrait_frame_centers_half_of_width() {
        let crop = CropBox::centered(480, 640, 0.5).unwrap();
        assert_eq!(crop, CropBox { x: 120, y: 200, size: 240 });
    }

    #[test]
    fn full_relative_size_takes_the_shorter_edge() {
        let crop = CropBox::centered(300, 200, 1.0).unwrap();
        assert_eq!(crop, CropBox { x: 50, y: 0, size: 200 });
    }

    #[test]
    fn degenerate_frames_have_no_box() {
        assert!(CropBox::centered(0, 480, 0.5).is_none());
        assert!(CropBox::centered(1, 1, 0.5).is_none());
        assert!(CropBox::centered(100, 100, 0.0).is_none());
    }

    #[test]
    fn box_stays_within_bounds_for_odd_sizes() {
        for (width, height) in [(1, 3), (7, 5), (641, 479), (1920, 1080), (3, 1000)] {
            for relative in [0.33, 0.5, 0.9, 1.0] {
                if let Some(crop) = CropBox::centered(width, height, relative) {
                    assert!(crop.fits_within(width, height), "{width}x{height} @ {relative}");
                }
            }
        }
    }
}
