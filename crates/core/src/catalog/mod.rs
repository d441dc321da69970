//! The ordered catalog core: entity contracts and the generic service.

mod error;
mod movable;
mod service;

pub use error::{CatalogError, Result};
pub use movable::{assign_missing_id, is_contiguous, CopyStrategy, Entity, Movable};
pub use service::OrderedCatalog;
