use super::{Rect, HW, TLWH};
use crate::common::*;

/// Bounding box in center/extent format, the YOLO label form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CyCxHW<T> {
    pub(crate) cy: T,
    pub(crate) cx: T,
    pub(crate) h: T,
    pub(crate) w: T,
}

impl<T> CyCxHW<T> {
    pub fn try_cast<V>(self) -> Option<CyCxHW<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(CyCxHW {
            cy: V::from(self.cy)?,
            cx: V::from(self.cx)?,
            h: V::from(self.h)?,
            w: V::from(self.w)?,
        })
    }

    pub fn cast<V>(self) -> CyCxHW<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn try_from_cycxhw(cycxhw: [T; 4]) -> Result<Self> {
        let [cy, cx, h, w] = cycxhw;
        let zero = T::zero();
        ensure!(h >= zero && w >= zero, "h and w must be non-negative");
        Ok(Self { cy, cx, h, w })
    }

    pub fn from_cycxhw(cycxhw: [T; 4]) -> Self {
        Self::try_from_cycxhw(cycxhw).unwrap()
    }

    /// Scale a unit-square box back to pixel space.
    pub fn to_pixel_tlwh(&self, canvas: &HW<T>) -> TLWH<T> {
        let scaled = Self {
            cy: self.cy * canvas.h(),
            cx: self.cx * canvas.w(),
            h: self.h * canvas.h(),
            w: self.w * canvas.w(),
        };
        TLWH::from(&scaled)
    }
}

impl<T> Rect for CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy - self.h / two
    }

    fn l(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx - self.w / two
    }

    fn b(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy + self.h / two
    }

    fn r(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx + self.w / two
    }

    fn cy(&self) -> Self::Type {
        self.cy
    }

    fn cx(&self) -> Self::Type {
        self.cx
    }

    fn h(&self) -> Self::Type {
        self.h
    }

    fn w(&self) -> Self::Type {
        self.w
    }
}

impl<T> From<TLWH<T>> for CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: TLWH<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&TLWH<T>> for CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: &TLWH<T>) -> Self {
        Self {
            cy: from.cy(),
            cx: from.cx(),
            h: from.h(),
            w: from.w(),
        }
    }
}
