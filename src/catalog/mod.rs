//! # Catalog Module
//!
//! Turns a CMSIS-Pack `.pdsc` device descriptor into a flat, ordered
//! [`Catalog`] of sub-family groups and their devices.
//!
//! ## Pipeline
//!
//! | Step | Item |
//! |------|------|
//! | Locate the file in a workspace root | [`loader::locate_source`] |
//! | Read and parse the XML | [`document::PackageDocument::from_xml`] |
//! | Flatten families into groups | [`builder::build_catalog`] |
//!
//! Only `package/devices/family/subFamily/device` is read. Families are
//! discarded after flattening; a device without a `<description>` gets
//! [`NO_DESCRIPTION`].

pub mod builder;
pub mod document;
pub mod error;
pub mod loader;
pub mod model;

pub use builder::build_catalog;
pub use document::PackageDocument;
pub use error::CatalogError;
pub use loader::{discover_pdsc_files, load_catalog, locate_source, DEFAULT_SOURCE_FILE};
pub use model::{Catalog, DeviceDescriptor, DeviceKey, SubFamilyGroup, NO_DESCRIPTION};
