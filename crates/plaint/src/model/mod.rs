pub mod error;
pub mod metadata;
pub mod service;
pub mod store;

pub use error::{ModelError, Result};
pub use metadata::{ModelId, ModelMetadata};
pub use service::{Classification, ClassifierService};
pub use store::ModelStore;
