//! COCO body keypoints.

use crate::common::*;

pub const NUM_KEYPOINTS: usize = 17;

/// Keypoint slot indices used by the crop planner.
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Absent,
    Occluded,
    Visible,
}

impl Visibility {
    pub fn try_from_flag(flag: f64) -> Result<Self> {
        let visibility = if flag == 0.0 {
            Self::Absent
        } else if flag == 1.0 {
            Self::Occluded
        } else if flag == 2.0 {
            Self::Visible
        } else {
            bail!("invalid keypoint visibility flag {}", flag);
        };
        Ok(visibility)
    }

    /// Occluded keypoints still carry a usable position.
    pub fn is_labeled(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub visibility: Visibility,
}

/// Parse a flat `x, y, visibility` triple list into the 17 keypoint slots.
pub fn parse_keypoints(flat: &[f64]) -> Result<Vec<Keypoint>> {
    ensure!(
        flat.len() == NUM_KEYPOINTS * 3,
        "expected {} keypoint values, found {}",
        NUM_KEYPOINTS * 3,
        flat.len()
    );
    flat.chunks_exact(3)
        .map(|triple| {
            Ok(Keypoint {
                x: triple[0],
                y: triple[1],
                visibility: Visibility::try_from_flag(triple[2])?,
            })
        })
        .try_collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_triples() {
        let mut flat = vec![0.0; NUM_KEYPOINTS * 3];
        flat[LEFT_HIP * 3] = 120.0;
        flat[LEFT_HIP * 3 + 1] = 110.0;
        flat[LEFT_HIP * 3 + 2] = 2.0;

        let keypoints = parse_keypoints(&flat).unwrap();
        assert_eq!(keypoints.len(), NUM_KEYPOINTS);
        assert_eq!(keypoints[LEFT_HIP].visibility, Visibility::Visible);
        assert!(keypoints[LEFT_HIP].visibility.is_labeled());
        assert!(!keypoints[RIGHT_HIP].visibility.is_labeled());
    }

    #[test]
    fn occluded_counts_as_labeled() {
        assert!(Visibility::try_from_flag(1.0).unwrap().is_labeled());
    }

    #[test]
    fn bad_lengths_and_flags_rejected() {
        assert!(parse_keypoints(&[1.0, 2.0, 3.0]).is_err());
        let mut flat = vec![0.0; NUM_KEYPOINTS * 3];
        flat[2] = 5.0;
        assert!(parse_keypoints(&flat).is_err());
    }
}
