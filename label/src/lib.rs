//! Labeled bounding boxes and YOLO label-line rendering.

use bbox::{CyCxHW, Rect, TLWH};

#[derive(Debug, Clone, PartialEq)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
}

/// A label in pixel units.
pub type PixelLabel = Label<TLWH<f64>, usize>;

/// A label in unit-interval units, the form written to label files.
pub type RatioLabel = Label<CyCxHW<f64>, usize>;

impl RatioLabel {
    /// Render one label line: `<class> <cx> <cy> <w> <h>`, space-separated,
    /// no trailing whitespace.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.class,
            format_g(self.rect.cx()),
            format_g(self.rect.cy()),
            format_g(self.rect.w()),
            format_g(self.rect.h()),
        )
    }

    /// The value tuple compared for exact-equality dedup.
    pub fn to_tuple(&self) -> [f64; 5] {
        [
            self.class as f64,
            self.rect.cx(),
            self.rect.cy(),
            self.rect.w(),
            self.rect.h(),
        ]
    }
}

/// `%g`-style float formatting: six significant digits, trailing zeros
/// stripped, scientific notation when the exponent falls outside `[-4, 5]`.
pub fn format_g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let exp = value.abs().log10().floor() as i32;
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp).max(0) as usize;
        strip_zeros(format!("{:.*}", decimals, value))
    } else {
        let mantissa = value / 10f64.powi(exp);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(format!("{:.5}", mantissa)), sign, exp.abs())
    }
}

fn strip_zeros(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}
