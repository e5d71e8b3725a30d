//! pdsc-picker - browse the devices of a CMSIS-Pack `.pdsc` descriptor
//!
//! This library provides the catalog builder that flattens a package
//! description into sub-family groups, the filter/selector that drives live
//! search and selection, and the terminal UI built on top of them.

pub mod catalog;
pub mod selector;
pub mod ui;
