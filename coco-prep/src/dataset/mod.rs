//! COCO dataset loading, validation and storage.

mod index;
mod types;

pub use index::*;
pub use types::*;

use crate::{common::*, keypoint};

impl CocoDataset {
    /// Load and validate an annotation file. Any schema violation is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(
            File::open(path)
                .with_context(|| format!("failed to open annotation file '{}'", path.display()))?,
        );
        let dataset: Self = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse annotation file '{}'", path.display()))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// One-shot validation of the invariants the pipelines rely on.
    pub fn validate(&self) -> Result<()> {
        let image_ids: HashSet<_> = self.images.iter().map(|image| image.id).collect();
        ensure!(
            image_ids.len() == self.images.len(),
            "duplicate image ids in dataset"
        );

        let mut annotation_ids = HashSet::with_capacity(self.annotations.len());
        self.annotations.iter().try_for_each(|ann| {
            ensure!(
                annotation_ids.insert(ann.id),
                "duplicate annotation id {}",
                ann.id
            );
            ensure!(
                image_ids.contains(&ann.image_id),
                "annotation {} references missing image {}",
                ann.id,
                ann.image_id
            );
            if !ann.keypoints.is_empty() {
                keypoint::parse_keypoints(&ann.keypoints)
                    .with_context(|| format!("annotation {} has malformed keypoints", ann.id))?;
            }
            Ok(())
        })
    }

    /// Serialize the dataset to `path`, pretty-printed like the source files.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create annotation file '{}'", path.display()))?,
        );
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("failed to write annotation file '{}'", path.display()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn image_map(&self) -> HashMap<u64, &Image> {
        self.images.iter().map(|image| (image.id, image)).collect()
    }

    pub fn max_image_id(&self) -> u64 {
        self.images.iter().map(|image| image.id).max().unwrap_or(0)
    }

    pub fn max_annotation_id(&self) -> u64 {
        self.annotations.iter().map(|ann| ann.id).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(id: u64, image_id: u64) -> Annotation {
        Annotation {
            id,
            image_id,
            category_id: 1,
            bbox: [0.0, 0.0, 10.0, 10.0],
            iscrowd: 0,
            keypoints: vec![],
            num_keypoints: 0,
            extra: Default::default(),
        }
    }

    fn image(id: u64) -> Image {
        Image {
            id,
            file_name: format!("{:012}.jpg", id),
            width: 640,
            height: 480,
            extra: Default::default(),
        }
    }

    #[test]
    fn unresolved_image_id_is_fatal() {
        let dataset = CocoDataset {
            info: None,
            licenses: None,
            images: vec![image(1)],
            annotations: vec![annotation(1, 2)],
            categories: None,
        };
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn malformed_keypoints_are_fatal() {
        let mut ann = annotation(1, 1);
        ann.keypoints = vec![1.0, 2.0, 3.0];
        let dataset = CocoDataset {
            info: None,
            licenses: None,
            images: vec![image(1)],
            annotations: vec![ann],
            categories: None,
        };
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn valid_dataset_passes() {
        let dataset = CocoDataset {
            info: None,
            licenses: None,
            images: vec![image(1), image(2)],
            annotations: vec![annotation(1, 1), annotation(2, 1), annotation(3, 2)],
            categories: None,
        };
        assert!(dataset.validate().is_ok());
        assert_eq!(dataset.max_image_id(), 2);
        assert_eq!(dataset.max_annotation_id(), 3);
    }
}
