use super::CocoDataset;
use crate::common::*;

/// Image-id → annotation grouping.
///
/// Groups hold indices into `dataset.annotations` in their original relative
/// order; group iteration follows the order image ids first appear in the
/// annotation list.
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    groups: IndexMap<u64, Vec<usize>>,
}

impl AnnotationIndex {
    pub fn build(dataset: &CocoDataset) -> Self {
        let mut groups: IndexMap<u64, Vec<usize>> = IndexMap::new();
        dataset
            .annotations
            .iter()
            .enumerate()
            .for_each(|(index, ann)| {
                groups.entry(ann.image_id).or_default().push(index);
            });
        Self { groups }
    }

    /// Annotation indices for one image; empty if the image has none.
    pub fn lookup(&self, image_id: u64) -> &[usize] {
        self.groups
            .get(&image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &[usize])> + '_ {
        self.groups
            .iter()
            .map(|(&image_id, indices)| (image_id, indices.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Annotation, CocoDataset, Image};
    use super::*;

    #[test]
    fn groups_preserve_order() {
        let annotation = |id, image_id| Annotation {
            id,
            image_id,
            category_id: 1,
            bbox: [0.0, 0.0, 1.0, 1.0],
            iscrowd: 0,
            keypoints: vec![],
            num_keypoints: 0,
            extra: Default::default(),
        };
        let image = |id| Image {
            id,
            file_name: format!("{:012}.jpg", id),
            width: 10,
            height: 10,
            extra: Default::default(),
        };

        let dataset = CocoDataset {
            info: None,
            licenses: None,
            images: vec![image(1), image(2), image(3)],
            annotations: vec![
                annotation(10, 2),
                annotation(11, 1),
                annotation(12, 2),
                annotation(13, 1),
            ],
            categories: None,
        };

        let index = AnnotationIndex::build(&dataset);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(2), &[0, 2]);
        assert_eq!(index.lookup(1), &[1, 3]);
        assert_eq!(index.lookup(3), &[] as &[usize]);

        // first-appearance group order
        let order: Vec<_> = index.iter().map(|(image_id, _)| image_id).collect();
        assert_eq!(order, vec![2, 1]);
    }
}
