use anyhow::{ensure, Context, Result};
use clap::Parser;
use coco_prep::{
    augment,
    class_map::ClassMap,
    convert::LabelWriter,
    dataset::{AnnotationIndex, CocoDataset},
};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
/// COCO person-keypoints dataset preparation
enum Opts {
    /// Convert COCO annotations to per-image YOLO label files
    Convert {
        /// annotation JSON file
        #[clap(long)]
        annotation_file: PathBuf,
        /// directory receiving one label file per image
        #[clap(long)]
        label_dir: PathBuf,
        /// manifest listing processed image paths, opened in append mode
        #[clap(long)]
        manifest_file: PathBuf,
        /// prefix joined with image file names in manifest lines
        #[clap(long, default_value = "")]
        image_dir_prefix: PathBuf,
        /// remap 91-category ids onto the 80-class space
        #[clap(long)]
        cls91to80: bool,
    },
    /// Synthesize lower-body-cropped images and annotations
    Augment {
        /// annotation JSON file; the augmented copy gets an `_augm` suffix
        #[clap(long)]
        annotation_file: PathBuf,
        /// directory holding the source images; composites are written here
        #[clap(long)]
        image_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Convert {
            annotation_file,
            label_dir,
            manifest_file,
            image_dir_prefix,
            cls91to80,
        } => {
            convert(
                &annotation_file,
                label_dir,
                &manifest_file,
                image_dir_prefix,
                cls91to80,
            )?;
        }
        Opts::Augment {
            annotation_file,
            image_dir,
        } => {
            run_augment(&annotation_file, &image_dir)?;
        }
    }

    Ok(())
}

fn convert(
    annotation_file: &Path,
    label_dir: PathBuf,
    manifest_file: &Path,
    image_dir_prefix: PathBuf,
    cls91to80: bool,
) -> Result<()> {
    let dataset = CocoDataset::load(annotation_file)?;
    let index = AnnotationIndex::build(&dataset);
    let images = dataset.image_map();
    let class_map = if cls91to80 {
        ClassMap::Coco91To80
    } else {
        ClassMap::Identity
    };
    let mut writer = LabelWriter::new(label_dir, manifest_file, image_dir_prefix, class_map)?;

    let mut total_labels = 0;
    for (image_id, ann_indices) in index.iter() {
        let image = images
            .get(&image_id)
            .with_context(|| format!("no image record for id {}", image_id))?;
        let annotations: Vec<_> = ann_indices
            .iter()
            .map(|&ann_index| &dataset.annotations[ann_index])
            .collect();
        total_labels += writer.write_labels(image, &annotations)?;
    }

    info!(
        "converted {} images from '{}' ({} label lines)",
        index.len(),
        annotation_file.display(),
        total_labels
    );
    Ok(())
}

fn run_augment(annotation_file: &Path, image_dir: &Path) -> Result<()> {
    ensure!(
        image_dir.is_dir(),
        "image dir '{}' does not exist",
        image_dir.display()
    );

    let mut dataset = CocoDataset::load(annotation_file)?;
    let stats = augment::augment(&mut dataset, image_dir)?;

    let output_file = augment::augmented_annotation_path(annotation_file);
    dataset.save(&output_file)?;
    info!(
        "wrote '{}' with {} synthetic images and {} synthetic annotations",
        output_file.display(),
        stats.images_created,
        stats.annotations_created
    );
    Ok(())
}
