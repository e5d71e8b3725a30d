//! # Package Document Model
//!
//! Raw `serde` structures mirroring the `package/devices/family/subFamily/device`
//! slice of a CMSIS-Pack description. Only the nodes the catalog needs are
//! modeled; everything else in the file (processor, memory, debug, books, …)
//! is skipped by the deserializer.
//!
//! Absence is always explicit: a missing attribute is `None`, a missing
//! repeated child is an empty `Vec`.

#![allow(clippy::doc_markdown)] // XML element names are not Rust items

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::catalog::error::CatalogError;

/// Name of the only root element accepted as a package description.
pub const PACKAGE_ELEMENT: &str = "package";

/// A parsed `.pdsc` document.
#[derive(Debug, Default)]
pub struct PackageDocument {
    /// Local name of the document's root element.
    pub root: String,
    pub package: PackageNode,
}

impl PackageDocument {
    /// Parse XML text into the package model.
    ///
    /// # Errors
    /// Returns [`CatalogError::XmlSyntax`] for malformed XML and
    /// [`CatalogError::Xml`] when the tree does not fit the model.
    pub fn from_xml(xml: &str) -> Result<Self, CatalogError> {
        let root = root_element_name(xml)?.unwrap_or_default();
        if root.is_empty() {
            return Ok(Self::default());
        }
        let package: PackageNode = quick_xml::de::from_str(xml)?;
        Ok(Self { root, package })
    }
}

/// The `<package>` root.
#[derive(Debug, Default, Deserialize)]
pub struct PackageNode {
    #[serde(rename = "vendor", default)]
    pub vendor: Option<String>,

    #[serde(rename = "name", default)]
    pub name: Option<String>,

    #[serde(rename = "devices", default)]
    pub devices: Vec<DevicesNode>,
}

/// A `<devices>` block.
#[derive(Debug, Default, Deserialize)]
pub struct DevicesNode {
    #[serde(rename = "family", default)]
    pub families: Vec<FamilyNode>,
}

/// A `<family Dfamily=".." Dvendor="..">` element.
#[derive(Debug, Default, Deserialize)]
pub struct FamilyNode {
    #[serde(rename = "@Dfamily", default)]
    pub name: Option<String>,

    #[serde(rename = "@Dvendor", default)]
    pub vendor: Option<String>,

    #[serde(rename = "subFamily", default)]
    pub sub_families: Vec<SubFamilyNode>,
}

/// A `<subFamily DsubFamily="..">` element.
#[derive(Debug, Default, Deserialize)]
pub struct SubFamilyNode {
    #[serde(rename = "@DsubFamily", default)]
    pub name: Option<String>,

    #[serde(rename = "device", default)]
    pub devices: Vec<DeviceNode>,
}

/// A `<device Dname="..">` element.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceNode {
    #[serde(rename = "@Dname", default)]
    pub name: Option<String>,

    #[serde(rename = "description", default)]
    pub descriptions: Vec<DescriptionNode>,
}

/// A `<description>` element. Empty elements carry an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct DescriptionNode {
    #[serde(rename = "$text", default)]
    pub text: String,
}

/// Return the local name of the first element in `xml`, or `None` when the
/// input holds no element at all.
fn root_element_name(xml: &str) -> Result<Option<String>, CatalogError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
