//! Annotation conversion to per-image YOLO label files.

use crate::{
    class_map::ClassMap,
    common::*,
    dataset::{Annotation, Image},
};
use bbox::{CyCxHW, HW};
use label::RatioLabel;

/// Convert a COCO `[x, y, w, h]` pixel box to a unit-interval center-format
/// box. Returns `None` when the normalized extent degenerates
/// (`w <= 0 || h <= 0`).
pub fn normalize_bbox(bbox: [f64; 4], canvas: &HW<f64>) -> Option<CyCxHW<f64>> {
    let [x, y, w, h] = bbox;
    let cx = (x + w / 2.0) / canvas.w();
    let cy = (y + h / 2.0) / canvas.h();
    let w = w / canvas.w();
    let h = h / canvas.h();
    (w > 0.0 && h > 0.0).then(|| CyCxHW::from_cycxhw([cy, cx, h, w]))
}

/// Normalize, remap and dedup one image's annotations.
///
/// Crowd annotations, degenerate boxes and unmapped categories are dropped;
/// exact duplicates keep their first occurrence.
pub fn collect_labels(
    annotations: &[&Annotation],
    canvas: &HW<f64>,
    class_map: ClassMap,
) -> Vec<RatioLabel> {
    let mut accepted: Vec<RatioLabel> = vec![];
    for ann in annotations {
        if ann.iscrowd != 0 {
            continue;
        }
        let rect = match normalize_bbox(ann.bbox, canvas) {
            Some(rect) => rect,
            None => continue,
        };
        let class = match class_map.map(ann.category_id) {
            Some(class) => class,
            None => continue,
        };
        let label = RatioLabel { rect, class };
        let tuple = label.to_tuple();
        if accepted.iter().any(|prev| prev.to_tuple() == tuple) {
            continue;
        }
        accepted.push(label);
    }
    accepted
}

/// Writes one label file per image plus a manifest line per processed image.
///
/// Label files and the manifest are opened in append mode so repeated
/// invocations extend them, matching the training-set assembly workflow.
#[derive(Debug)]
pub struct LabelWriter {
    label_dir: PathBuf,
    manifest: BufWriter<File>,
    img_dir_prefix: PathBuf,
    class_map: ClassMap,
}

impl LabelWriter {
    pub fn new(
        label_dir: impl Into<PathBuf>,
        manifest_file: impl AsRef<Path>,
        img_dir_prefix: impl Into<PathBuf>,
        class_map: ClassMap,
    ) -> Result<Self> {
        let label_dir = label_dir.into();
        let manifest_file = manifest_file.as_ref();
        fs::create_dir_all(&label_dir)
            .with_context(|| format!("failed to create label dir '{}'", label_dir.display()))?;
        let manifest = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(manifest_file)
                .with_context(|| {
                    format!("failed to open manifest file '{}'", manifest_file.display())
                })?,
        );
        Ok(Self {
            label_dir,
            manifest,
            img_dir_prefix: img_dir_prefix.into(),
            class_map,
        })
    }

    /// Write the label file for one image and record the image in the
    /// manifest. The manifest line is written even when every box was
    /// filtered out; downstream treats such images as negative examples.
    ///
    /// Returns the number of label lines written.
    pub fn write_labels(&mut self, image: &Image, annotations: &[&Annotation]) -> Result<usize> {
        let labels = collect_labels(annotations, &image.size(), self.class_map);

        let label_path = self
            .label_dir
            .join(Path::new(&image.file_name).with_extension("txt"));
        let mut file = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&label_path)
                .with_context(|| {
                    format!("failed to open label file '{}'", label_path.display())
                })?,
        );
        labels
            .iter()
            .try_for_each(|label| writeln!(file, "{}", label.to_line()))?;
        file.flush()?;

        writeln!(
            self.manifest,
            "{}",
            self.img_dir_prefix.join(&image.file_name).display()
        )?;
        self.manifest.flush()?;
        Ok(labels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bbox::Rect;

    fn canvas() -> HW<f64> {
        HW::from_hw([480.0, 640.0])
    }

    fn annotation(id: u64, category_id: u32, bbox: [f64; 4], iscrowd: u8) -> Annotation {
        Annotation {
            id,
            image_id: 1,
            category_id,
            bbox,
            iscrowd,
            keypoints: vec![],
            num_keypoints: 0,
            extra: Default::default(),
        }
    }

    #[test]
    fn normalize_reference_box() {
        let rect = normalize_bbox([100.0, 50.0, 40.0, 160.0], &canvas()).unwrap();
        assert_abs_diff_eq!(rect.cx(), 0.1875, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.cy(), 0.2708, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.w(), 0.0625, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.h(), 0.3333, epsilon = 1e-4);
    }

    #[test]
    fn normalize_round_trip() {
        let bbox = [3.0, 7.0, 11.0, 13.0];
        let rect = normalize_bbox(bbox, &canvas()).unwrap();
        let back = rect.to_pixel_tlwh(&canvas());
        assert_abs_diff_eq!(back.l(), bbox[0], epsilon = 1e-6);
        assert_abs_diff_eq!(back.t(), bbox[1], epsilon = 1e-6);
        assert_abs_diff_eq!(back.w(), bbox[2], epsilon = 1e-6);
        assert_abs_diff_eq!(back.h(), bbox[3], epsilon = 1e-6);
    }

    #[test]
    fn normalize_rejects_degenerate() {
        assert!(normalize_bbox([10.0, 10.0, 0.0, 5.0], &canvas()).is_none());
        assert!(normalize_bbox([10.0, 10.0, 5.0, 0.0], &canvas()).is_none());
        assert!(normalize_bbox([10.0, 10.0, -3.0, 5.0], &canvas()).is_none());
        // sub-pixel boxes stay positive after normalization
        assert!(normalize_bbox([10.0, 10.0, 0.25, 0.25], &canvas()).is_some());
    }

    #[test]
    fn collect_filters_and_dedups() {
        let crowd = annotation(1, 1, [0.0, 0.0, 10.0, 10.0], 1);
        let first = annotation(2, 1, [100.0, 50.0, 40.0, 160.0], 0);
        let duplicate = annotation(3, 1, [100.0, 50.0, 40.0, 160.0], 0);
        let degenerate = annotation(4, 1, [5.0, 5.0, 0.0, 9.0], 0);
        let unmapped = annotation(5, 12, [5.0, 5.0, 9.0, 9.0], 0);
        let other = annotation(6, 2, [1.0, 2.0, 3.0, 4.0], 0);

        let annotations: Vec<&Annotation> =
            vec![&crowd, &first, &duplicate, &degenerate, &unmapped, &other];
        let labels = collect_labels(&annotations, &canvas(), ClassMap::Coco91To80);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].class, 0);
        assert_eq!(labels[1].class, 1);
    }

    #[test]
    fn dedup_is_order_independent_on_sets() {
        let a = annotation(1, 1, [100.0, 50.0, 40.0, 160.0], 0);
        let b = annotation(2, 1, [10.0, 20.0, 30.0, 40.0], 0);
        let a2 = annotation(3, 1, [100.0, 50.0, 40.0, 160.0], 0);

        let forward = collect_labels(&[&a, &b, &a2], &canvas(), ClassMap::Identity);
        let reverse = collect_labels(&[&a2, &b, &a], &canvas(), ClassMap::Identity);

        let lines = |labels: &[RatioLabel]| {
            let mut lines: Vec<_> = labels.iter().map(RatioLabel::to_line).collect();
            lines.sort();
            lines
        };
        assert_eq!(lines(&forward), lines(&reverse));
    }
}
