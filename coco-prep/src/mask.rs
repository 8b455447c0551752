//! Boolean rasters and black-out compositing.

use bbox::{Rect, TLWH};
use image::{Rgb, RgbImage};

/// A boolean raster over an image canvas.
///
/// Supports rectangle union (`paint_rect`) and set difference (`minus`);
/// `apply` blacks out the covered pixels of an RGB buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Union with a rectangle, clamped to the canvas. Pixels are covered on
    /// the half-open ranges `[floor(l), floor(r)) × [floor(t), floor(b))`.
    pub fn paint_rect(&mut self, rect: &TLWH<f64>) {
        let left = rect.l().floor().clamp(0.0, self.width as f64) as usize;
        let right = rect.r().floor().clamp(0.0, self.width as f64) as usize;
        let top = rect.t().floor().clamp(0.0, self.height as f64) as usize;
        let bottom = rect.b().floor().clamp(0.0, self.height as f64) as usize;

        for y in top..bottom {
            let row = y * self.width;
            self.bits[row + left..row + right].fill(true);
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Set difference: the pixels covered by `self` but not by `other`.
    pub fn minus(&self, other: &Self) -> Self {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let bits = self
            .bits
            .iter()
            .zip(&other.bits)
            .map(|(&kept, &removed)| kept && !removed)
            .collect();
        Self {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    /// Black out every covered pixel of `image`.
    pub fn apply(&self, image: &mut RgbImage) {
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            if self.contains(x as usize, y as usize) {
                *pixel = Rgb([0, 0, 0]);
            }
        }
    }

    /// Number of covered pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_covers_half_open_range() {
        let mut mask = Mask::new(10, 8);
        mask.paint_rect(&TLWH::from_xywh([2.0, 1.0, 3.0, 4.0]));
        assert_eq!(mask.count(), 12);
        assert!(mask.contains(2, 1));
        assert!(mask.contains(4, 4));
        assert!(!mask.contains(5, 1));
        assert!(!mask.contains(2, 5));
    }

    #[test]
    fn paint_clamps_to_canvas() {
        let mut mask = Mask::new(4, 4);
        mask.paint_rect(&TLWH::from_xywh([-5.0, -5.0, 100.0, 100.0]));
        assert_eq!(mask.count(), 16);

        let mut outside = Mask::new(4, 4);
        outside.paint_rect(&TLWH::from_xywh([10.0, 0.0, 3.0, 3.0]));
        assert_eq!(outside.count(), 0);
    }

    #[test]
    fn minus_is_set_difference() {
        let mut suppress = Mask::new(6, 6);
        suppress.paint_rect(&TLWH::from_xywh([0.0, 0.0, 6.0, 6.0]));
        let mut keep = Mask::new(6, 6);
        keep.paint_rect(&TLWH::from_xywh([2.0, 2.0, 2.0, 2.0]));

        let blacked = suppress.minus(&keep);
        assert_eq!(blacked.count(), 36 - 4);
        assert!(!blacked.contains(2, 2));
        assert!(!blacked.contains(3, 3));
        assert!(blacked.contains(0, 0));
    }

    #[test]
    fn apply_blacks_out_covered_pixels() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([200, 100, 50]));
        let mut mask = Mask::new(4, 4);
        mask.paint_rect(&TLWH::from_xywh([1.0, 1.0, 2.0, 2.0]));
        mask.apply(&mut image);

        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 100, 50]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(3, 3), &Rgb([200, 100, 50]));
    }
}
