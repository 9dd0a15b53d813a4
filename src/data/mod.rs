//! Extraction pipeline: XML game files in, one normalized JSON dataset out.

pub mod dataset;
pub mod extract;
pub mod lookup;
pub mod model;
pub mod tables;
pub mod text;
pub mod validate;
pub mod xml;
