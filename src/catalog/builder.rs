use tracing::debug;

use crate::catalog::document::{DeviceNode, PackageDocument, SubFamilyNode, PACKAGE_ELEMENT};
use crate::catalog::error::CatalogError;
use crate::catalog::model::{Catalog, DeviceDescriptor, SubFamilyGroup, NO_DESCRIPTION};

/// Flatten a parsed package document into a [`Catalog`].
///
/// Families are walked in document order and each of their sub-families
/// becomes one group; family identity is dropped. Only the first `<devices>`
/// block is read.
///
/// # Errors
/// - [`CatalogError::MalformedSource`] when the root is not `<package>` or
///   `package.devices[0].family` is absent or empty.
/// - [`CatalogError::MissingAttribute`] when a sub-family or device has no
///   name attribute.
/// - [`CatalogError::EmptyCatalog`] when no sub-family, or no device at all,
///   was found.
pub fn build_catalog(document: &PackageDocument) -> Result<Catalog, CatalogError> {
    if document.root != PACKAGE_ELEMENT {
        return Err(CatalogError::MalformedSource { missing: "package" });
    }

    let devices = document
        .package
        .devices
        .first()
        .ok_or(CatalogError::MalformedSource {
            missing: "package.devices",
        })?;

    if devices.families.is_empty() {
        return Err(CatalogError::MalformedSource {
            missing: "package.devices[0].family",
        });
    }

    let mut groups = Vec::new();
    for family in &devices.families {
        if family.sub_families.is_empty() {
            debug!(
                family = family.name.as_deref().unwrap_or("<unnamed>"),
                "family declares no subFamily, skipping"
            );
        }
        for sub_family in &family.sub_families {
            groups.push(build_group(sub_family)?);
        }
    }

    let catalog = Catalog::new(groups);
    if catalog.is_empty() || catalog.device_count() == 0 {
        return Err(CatalogError::EmptyCatalog {
            families: devices.families.len(),
            sub_families: catalog.groups().len(),
        });
    }

    debug!(
        groups = catalog.groups().len(),
        devices = catalog.device_count(),
        "catalog built"
    );
    Ok(catalog)
}

fn build_group(node: &SubFamilyNode) -> Result<SubFamilyGroup, CatalogError> {
    let label = node.name.clone().ok_or(CatalogError::MissingAttribute {
        element: "subFamily",
        attribute: "DsubFamily",
    })?;

    let devices = node
        .devices
        .iter()
        .map(build_device)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubFamilyGroup { label, devices })
}

fn build_device(node: &DeviceNode) -> Result<DeviceDescriptor, CatalogError> {
    let name = node.name.clone().ok_or(CatalogError::MissingAttribute {
        element: "device",
        attribute: "Dname",
    })?;

    let description = match node.descriptions.first() {
        Some(desc) => desc.text.clone(),
        None => NO_DESCRIPTION.to_string(),
    };

    Ok(DeviceDescriptor { name, description })
}
