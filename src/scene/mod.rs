//! Scene graph descriptors for the AR host

pub mod assembler;
pub mod document;
pub mod geometry;
