//! Lower-body crop planning from keypoint visibility.

use crate::{
    common::*,
    dataset::Annotation,
    keypoint::{self, Keypoint, LEFT_HIP, LEFT_KNEE, RIGHT_HIP, RIGHT_KNEE},
};
use bbox::{Rect, TLWH};

/// Left expansion and right extent of the keep region, as fractions of the
/// visible lower-body keypoint span.
const LEFT_EXPAND: f64 = 0.2;
const RIGHT_EXTENT: f64 = 1.4;

/// The region of one annotation kept in the synthetic image.
#[derive(Debug, Clone, PartialEq)]
pub struct CropPlan {
    pub keep_rect: TLWH<f64>,
    pub qualifies: bool,
}

/// Decide whether an annotation's lower body is visible enough to crop, and
/// derive the kept region.
///
/// Qualification requires a labeled hip and a labeled knee (either side).
/// Qualified plans keep the span of the labeled keypoints from the hips
/// down, expanded leftwards by 20% of the span width, right edge capped at
/// `x_min + 1.4 * span` and the image border, bottom edge pinned to the
/// bbox bottom. Unqualified plans keep the original bbox untouched.
pub fn plan_crop(annotation: &Annotation, image_width: f64) -> Result<CropPlan> {
    let bbox = TLWH::try_from_xywh(annotation.bbox)
        .with_context(|| format!("annotation {} has a malformed bbox", annotation.id))?;

    if annotation.keypoints.is_empty() {
        return Ok(CropPlan {
            keep_rect: bbox,
            qualifies: false,
        });
    }
    let keypoints = keypoint::parse_keypoints(&annotation.keypoints)?;

    let labeled = |slot: usize| keypoints[slot].visibility.is_labeled();
    let qualifies =
        (labeled(LEFT_HIP) || labeled(RIGHT_HIP)) && (labeled(LEFT_KNEE) || labeled(RIGHT_KNEE));
    if !qualifies {
        return Ok(CropPlan {
            keep_rect: bbox,
            qualifies: false,
        });
    }

    let lower: Vec<&Keypoint> = keypoints[LEFT_HIP..]
        .iter()
        .filter(|kp| kp.visibility.is_labeled())
        .collect();
    let x_min = lower.iter().map(|kp| kp.x).fold(f64::INFINITY, f64::min);
    let x_max = lower.iter().map(|kp| kp.x).fold(f64::NEG_INFINITY, f64::max);
    let y_min = lower.iter().map(|kp| kp.y).fold(f64::INFINITY, f64::min);
    let span = x_max - x_min;

    let left = (x_min - LEFT_EXPAND * span).max(0.0);
    let right = (x_min + RIGHT_EXTENT * span).min(image_width);
    let keep_rect = TLWH::from_xywh([
        left,
        y_min,
        (right - left).max(0.0),
        (bbox.b() - y_min).max(0.0),
    ]);

    Ok(CropPlan {
        keep_rect,
        qualifies: true,
    })
}
