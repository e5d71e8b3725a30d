use crate::catalog::{Catalog, DeviceKey};

/// Visibility of one group and of each of its devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVisibility {
    pub visible: bool,
    pub devices: Vec<bool>,
}

/// Per-row visibility for a whole catalog under one search text.
///
/// Rows that do not match are hidden, never removed: the map always has one
/// entry per group and per device of the catalog it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityMap {
    pub groups: Vec<GroupVisibility>,
}

impl VisibilityMap {
    pub fn is_group_visible(&self, group: usize) -> bool {
        self.groups.get(group).is_some_and(|g| g.visible)
    }

    pub fn is_device_visible(&self, key: DeviceKey) -> bool {
        self.groups
            .get(key.group)
            .and_then(|g| g.devices.get(key.device))
            .copied()
            .unwrap_or(false)
    }

    pub fn visible_device_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.devices.iter().filter(|v| **v).count())
            .sum()
    }

    /// Keys of all visible devices, group-major.
    pub fn visible_devices(&self) -> Vec<DeviceKey> {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| {
                group
                    .devices
                    .iter()
                    .enumerate()
                    .filter(|(_, visible)| **visible)
                    .map(move |(d, _)| DeviceKey::new(g, d))
            })
            .collect()
    }
}

/// Recompute visibility from scratch for `search_text`.
///
/// Matching is case-insensitive substring containment. A device is visible
/// when its name or its group's label contains the text. A group is visible
/// when it has a visible device; a group without devices is visible only for
/// an empty search text.
pub fn compute_visibility(catalog: &Catalog, search_text: &str) -> VisibilityMap {
    let query = search_text.to_lowercase();

    let groups = catalog
        .groups()
        .iter()
        .map(|group| {
            let label_matches = group.label.to_lowercase().contains(&query);
            let devices: Vec<bool> = group
                .devices
                .iter()
                .map(|device| label_matches || device.name.to_lowercase().contains(&query))
                .collect();

            let visible = if devices.is_empty() {
                query.is_empty()
            } else {
                devices.iter().any(|v| *v)
            };

            GroupVisibility { visible, devices }
        })
        .collect();

    VisibilityMap { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DeviceDescriptor, SubFamilyGroup};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            SubFamilyGroup::new("M4", vec![DeviceDescriptor::new("STM32F407", "")]),
            SubFamilyGroup::new(
                "STM32L0",
                vec![
                    DeviceDescriptor::new("STM32L031", ""),
                    DeviceDescriptor::new("STM32L053", ""),
                ],
            ),
            SubFamilyGroup::new("Reserved", Vec::new()),
        ])
    }

    #[test]
    fn test_group_label_match_shows_all_its_devices() {
        let map = compute_visibility(&catalog(), "m4");
        assert!(map.is_group_visible(0));
        assert!(map.is_device_visible(DeviceKey::new(0, 0)));
        assert!(!map.is_group_visible(1));
    }

    #[test]
    fn test_device_name_match() {
        let map = compute_visibility(&catalog(), "053");
        assert!(!map.is_device_visible(DeviceKey::new(1, 0)));
        assert!(map.is_device_visible(DeviceKey::new(1, 1)));
        assert!(map.is_group_visible(1));
        assert_eq!(map.visible_devices(), vec![DeviceKey::new(1, 1)]);
    }

    #[test]
    fn test_no_match_hides_everything() {
        let map = compute_visibility(&catalog(), "xyz");
        assert_eq!(map.visible_device_count(), 0);
        assert!(map.groups.iter().all(|g| !g.visible));
        // Hidden, not removed.
        assert_eq!(map.groups.len(), 3);
        assert_eq!(map.groups[1].devices.len(), 2);
    }

    #[test]
    fn test_empty_query_shows_everything_including_empty_groups() {
        let map = compute_visibility(&catalog(), "");
        assert_eq!(map.visible_device_count(), 3);
        assert!(map.groups.iter().all(|g| g.visible));
    }

    #[test]
    fn test_empty_group_hidden_for_matching_label() {
        let map = compute_visibility(&catalog(), "reserved");
        assert!(!map.is_group_visible(2));
    }

    #[test]
    fn test_case_insensitive() {
        let map = compute_visibility(&catalog(), "stm32L0");
        assert_eq!(map.visible_device_count(), 2);
    }

    #[test]
    fn test_out_of_range_keys_are_hidden() {
        let map = compute_visibility(&catalog(), "");
        assert!(!map.is_device_visible(DeviceKey::new(7, 0)));
        assert!(!map.is_group_visible(7));
    }
}
