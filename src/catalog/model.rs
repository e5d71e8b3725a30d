use serde::Serialize;

/// Placeholder used when a device carries no `<description>` element.
pub const NO_DESCRIPTION: &str = "No description available";

/// A single selectable device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub description: String,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A sub-family heading and the devices declared under it, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubFamilyGroup {
    pub label: String,
    pub devices: Vec<DeviceDescriptor>,
}

impl SubFamilyGroup {
    pub fn new(label: impl Into<String>, devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            label: label.into(),
            devices,
        }
    }
}

/// Identity of a device inside a [`Catalog`]: its group position and its
/// position within that group. Device names alone are not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceKey {
    pub group: usize,
    pub device: usize,
}

impl DeviceKey {
    pub fn new(group: usize, device: usize) -> Self {
        Self { group, device }
    }
}

/// The flattened, ordered set of sub-family groups built from one document.
///
/// Family identity is gone at this point; two families declaring the same
/// sub-family label yield two distinct groups. The catalog is never mutated
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    groups: Vec<SubFamilyGroup>,
}

impl Catalog {
    pub fn new(groups: Vec<SubFamilyGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[SubFamilyGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&SubFamilyGroup> {
        self.groups.get(index)
    }

    /// Look up a device by key. Unknown keys return `None`.
    pub fn device(&self, key: DeviceKey) -> Option<&DeviceDescriptor> {
        self.groups
            .get(key.group)
            .and_then(|g| g.devices.get(key.device))
    }

    pub fn device_count(&self) -> usize {
        self.groups.iter().map(|g| g.devices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All device keys in display order (group-major).
    pub fn keys(&self) -> impl Iterator<Item = DeviceKey> + '_ {
        self.groups.iter().enumerate().flat_map(|(g, group)| {
            (0..group.devices.len()).map(move |d| DeviceKey::new(g, d))
        })
    }
}
