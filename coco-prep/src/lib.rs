//! COCO person-keypoints dataset preparation toolkit.
//!
//! Two pipelines over a loaded dataset: conversion of annotations to
//! per-image YOLO label files, and synthesis of augmented images that keep
//! only the lower-body region of people whose hip and knee keypoints are
//! visible.

mod common;

pub mod augment;
pub mod class_map;
pub mod convert;
pub mod crop;
pub mod dataset;
pub mod keypoint;
pub mod mask;
