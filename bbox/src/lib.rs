//! Safe bounding box types for pixel- and ratio-space rectangles.

mod common;

pub use rect::*;
pub mod rect;

pub use tlwh::*;
pub mod tlwh;

pub use cycxhw::*;
pub mod cycxhw;

pub use hw::*;
pub mod hw;

pub mod prelude {
    pub use crate::rect::Rect;
}
