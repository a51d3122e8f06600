pub mod entity;
pub mod error;

pub use entity::{Dataset, LabeledExample};
pub use error::{DatasetError, Result};
