//! Synthetic lower-body image/annotation generation.

use crate::{
    common::*,
    crop::{self, CropPlan},
    dataset::{Annotation, AnnotationIndex, CocoDataset, Image},
    mask::Mask,
};
use bbox::{RectNum, TLWH};

/// Counter state for synthetic record ids.
///
/// Seeded once from the dataset snapshot at the start of a run and advanced
/// monotonically, so every synthetic id is strictly greater than all
/// pre-existing ids and unique across the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAlloc {
    next_image_id: u64,
    next_annotation_id: u64,
}

impl IdAlloc {
    pub fn from_dataset(dataset: &CocoDataset) -> Self {
        Self {
            next_image_id: dataset.max_image_id() + 1,
            next_annotation_id: dataset.max_annotation_id() + 1,
        }
    }

    fn alloc_image_id(&mut self) -> u64 {
        let id = self.next_image_id;
        self.next_image_id += 1;
        id
    }

    fn alloc_annotation_id(&mut self) -> u64 {
        let id = self.next_annotation_id;
        self.next_annotation_id += 1;
        id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentStats {
    pub images_created: usize,
    pub annotations_created: usize,
}

/// Append synthetic records to `dataset`, writing composite images next to
/// their sources in `image_dir`.
///
/// Images are visited in ascending original id so two runs over the same
/// input allocate identical ids and file names. An image contributes one
/// synthetic record set iff at least one of its annotations qualifies for a
/// lower-body crop; every qualifying annotation is copied with
/// `bbox = keep_rect` under the new image id.
pub fn augment(dataset: &mut CocoDataset, image_dir: impl AsRef<Path>) -> Result<AugmentStats> {
    let image_dir = image_dir.as_ref();
    let index = AnnotationIndex::build(dataset);
    let mut alloc = IdAlloc::from_dataset(dataset);

    let image_indices = {
        let mut indices: Vec<usize> = (0..dataset.images.len()).collect();
        indices.sort_by_key(|&index| dataset.images[index].id);
        indices
    };

    let mut new_images: Vec<Image> = vec![];
    let mut new_annotations: Vec<Annotation> = vec![];

    for image_index in image_indices {
        let image = &dataset.images[image_index];
        let ann_indices = index.lookup(image.id);
        if ann_indices.is_empty() {
            continue;
        }

        let plans: Vec<(usize, CropPlan)> = ann_indices
            .iter()
            .map(|&ann_index| -> Result<_> {
                let plan = crop::plan_crop(&dataset.annotations[ann_index], image.width as f64)?;
                Ok((ann_index, plan))
            })
            .try_collect()?;
        if !plans.iter().any(|(_, plan)| plan.qualifies) {
            continue;
        }

        let (keep, suppress) = build_masks(dataset, &plans, image);

        let source_path = image_dir.join(&image.file_name);
        let mut pixels = image::open(&source_path)
            .with_context(|| format!("failed to read image file '{}'", source_path.display()))?
            .to_rgb8();
        suppress.minus(&keep).apply(&mut pixels);

        let new_image_id = alloc.alloc_image_id();
        let file_name = synthetic_file_name(&image.file_name, new_image_id);
        let target_path = image_dir.join(&file_name);
        pixels
            .save(&target_path)
            .with_context(|| format!("failed to write image file '{}'", target_path.display()))?;
        info!(
            "image {}: wrote augmented image '{}'",
            image.id,
            target_path.display()
        );

        new_images.push(Image {
            id: new_image_id,
            file_name,
            width: image.width,
            height: image.height,
            extra: image.extra.clone(),
        });
        plans
            .iter()
            .filter(|(_, plan)| plan.qualifies)
            .for_each(|(ann_index, plan)| {
                let mut ann = dataset.annotations[*ann_index].clone();
                ann.id = alloc.alloc_annotation_id();
                ann.image_id = new_image_id;
                ann.bbox = plan.keep_rect.xywh();
                new_annotations.push(ann);
            });
    }

    let stats = AugmentStats {
        images_created: new_images.len(),
        annotations_created: new_annotations.len(),
    };
    dataset.images.extend(new_images);
    dataset.annotations.extend(new_annotations);
    Ok(stats)
}

/// Build the keep/suppress rasters for one image.
///
/// The keep mask unions every plan's keep rect (the original bbox for
/// non-qualifying annotations); the suppress mask unions the original bboxes
/// of qualifying annotations only.
fn build_masks(dataset: &CocoDataset, plans: &[(usize, CropPlan)], image: &Image) -> (Mask, Mask) {
    let mut keep = Mask::new(image.width as usize, image.height as usize);
    let mut suppress = Mask::new(image.width as usize, image.height as usize);
    for (ann_index, plan) in plans {
        keep.paint_rect(&plan.keep_rect);
        if plan.qualifies {
            let [x, y, w, h] = dataset.annotations[*ann_index].bbox;
            suppress.paint_rect(&TLWH::from_xywh([x, y, w.max(0.0), h.max(0.0)]));
        }
    }
    (keep, suppress)
}

/// Derive the synthetic image file name: the trailing `_`-separated segment
/// is replaced by the new id zero-padded to 12 digits, keeping the original
/// extension.
pub fn synthetic_file_name(file_name: &str, image_id: u64) -> String {
    let extension = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("jpg");
    let stem_end = file_name.len() - extension.len() - 1;
    let prefix = match file_name[..stem_end].rfind('_') {
        Some(position) => &file_name[..=position],
        None => "",
    };
    format!("{}{:012}.{}", prefix, image_id, extension)
}

/// The augmented annotation file path: the input path with an `_augm` marker
/// before the `.json` extension.
pub fn augmented_annotation_path(annotation_file: &Path) -> PathBuf {
    let stem = annotation_file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("annotations");
    annotation_file.with_file_name(format!("{}_augm.json", stem))
}
