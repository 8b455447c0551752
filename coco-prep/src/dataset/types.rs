use crate::common::*;
use bbox::HW;

/// One image record of a COCO annotation file.
///
/// Fields the pipelines do not interpret (`license`, `coco_url`, ...) are
/// captured in `extra` so re-serialization round-trips the source schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Image {
    pub fn size(&self) -> HW<f64> {
        HW::from_hw([self.height as f64, self.width as f64])
    }
}

/// One labeled instance: a bounding box, optionally with body keypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    pub image_id: u64,
    pub category_id: u32,
    /// `[x, y, w, h]`, top-left origin, pixel units.
    pub bbox: [f64; 4],
    #[serde(default)]
    pub iscrowd: u8,
    /// Flat `x, y, visibility` triples; empty or exactly 17 triples.
    #[serde(default)]
    pub keypoints: Vec<f64>,
    #[serde(default)]
    pub num_keypoints: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A loaded annotation file: the mutable working set of the augmentation
/// pipeline, read-only for the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<serde_json::Value>,
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<serde_json::Value>,
}
