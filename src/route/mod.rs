//! Route definitions and segmentation

pub mod builder;
pub mod coordinate;
pub mod segmenter;
