use super::{CyCxHW, Rect, HW};
use crate::common::*;

/// Bounding box in top-left/width/height format, the serialized COCO form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLWH<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) w: T,
    pub(crate) h: T,
}

impl<T> TLWH<T> {
    pub fn try_cast<V>(self) -> Option<TLWH<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(TLWH {
            t: V::from(self.t)?,
            l: V::from(self.l)?,
            w: V::from(self.w)?,
            h: V::from(self.h)?,
        })
    }

    pub fn cast<V>(self) -> TLWH<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> TLWH<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Build from serialized COCO order `[x, y, w, h]`.
    pub fn try_from_xywh(xywh: [T; 4]) -> Result<Self> {
        let [x, y, w, h] = xywh;
        let zero = T::zero();
        ensure!(w >= zero && h >= zero, "w and h must be non-negative");
        Ok(Self { t: y, l: x, w, h })
    }

    pub fn from_xywh(xywh: [T; 4]) -> Self {
        Self::try_from_xywh(xywh).unwrap()
    }

    /// Intersect with the canvas `[0, w] × [0, h]`. Extents floor at zero.
    pub fn clamp_to(&self, canvas: &HW<T>) -> Self {
        let zero = T::zero();
        let l = partial_clamp(self.l, zero, canvas.w());
        let r = partial_clamp(self.r(), zero, canvas.w());
        let t = partial_clamp(self.t, zero, canvas.h());
        let b = partial_clamp(self.b(), zero, canvas.h());
        Self {
            t,
            l,
            w: r - l,
            h: b - t,
        }
    }

    /// Express in center format relative to the canvas size, mapping the
    /// canvas onto the unit square.
    pub fn to_ratio_cycxhw(&self, canvas: &HW<T>) -> CyCxHW<T> {
        CyCxHW {
            cy: self.cy() / canvas.h(),
            cx: self.cx() / canvas.w(),
            h: self.h / canvas.h(),
            w: self.w / canvas.w(),
        }
    }
}

fn partial_clamp<T>(value: T, lo: T, hi: T) -> T
where
    T: PartialOrd,
{
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

impl<T> Rect for TLWH<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.t + self.h
    }

    fn r(&self) -> Self::Type {
        self.l + self.w
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.t + self.h / two
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.l + self.w / two
    }

    fn h(&self) -> Self::Type {
        self.h
    }

    fn w(&self) -> Self::Type {
        self.w
    }
}

impl<T> From<CyCxHW<T>> for TLWH<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: CyCxHW<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&CyCxHW<T>> for TLWH<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: &CyCxHW<T>) -> Self {
        Self {
            t: from.t(),
            l: from.l(),
            w: from.w(),
            h: from.h(),
        }
    }
}
