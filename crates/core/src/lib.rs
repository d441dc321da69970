//! Core of the mediashelf catalog manager.
//!
//! - [`storage`]: the repository contract every backend implements
//! - [`cache`]: the look-aside cache contract and cached-list encoding
//! - [`catalog`]: the generic ordered catalog service
//! - [`media`]: catalog entity types, their copy strategies and one catalog
//!   constructor per type

pub mod cache;
pub mod catalog;
pub mod media;
pub mod storage;
