//! Category-id to class-index remapping.

/// Class-id mapping applied when writing label files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMap {
    /// `category_id - 1`, no table lookup.
    Identity,
    /// The fixed COCO 91-category (paper) to 80-class (2014 challenge) table.
    Coco91To80,
}

/// 91-slot table indexed by `category_id - 1`; `None` marks the 11 categories
/// absent from the 80-class subset.
#[rustfmt::skip]
const COCO_91_TO_80: [Option<u8>; 91] = [
    Some(0), Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7),
    Some(8), Some(9), Some(10), None, Some(11), Some(12), Some(13), Some(14),
    Some(15), Some(16), Some(17), Some(18), Some(19), Some(20), Some(21),
    Some(22), Some(23), None, Some(24), Some(25), None, None, Some(26),
    Some(27), Some(28), Some(29), Some(30), Some(31), Some(32), Some(33),
    Some(34), Some(35), Some(36), Some(37), Some(38), Some(39), None,
    Some(40), Some(41), Some(42), Some(43), Some(44), Some(45), Some(46),
    Some(47), Some(48), Some(49), Some(50), Some(51), Some(52), Some(53),
    Some(54), Some(55), Some(56), Some(57), Some(58), Some(59), None,
    Some(60), None, None, Some(61), None, Some(62), Some(63), Some(64),
    Some(65), Some(66), Some(67), Some(68), Some(69), Some(70), Some(71),
    Some(72), None, Some(73), Some(74), Some(75), Some(76), Some(77),
    Some(78), Some(79), None,
];

impl ClassMap {
    /// Map a 1-indexed category id to a 0-indexed class, or `None` when the
    /// category has no slot in the target space.
    pub fn map(&self, category_id: u32) -> Option<usize> {
        let slot = category_id.checked_sub(1)? as usize;
        match self {
            Self::Identity => Some(slot),
            Self::Coco91To80 => COCO_91_TO_80.get(slot).copied().flatten().map(usize::from),
        }
    }
}
