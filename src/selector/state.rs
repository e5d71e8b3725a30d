use tracing::debug;

use crate::catalog::{Catalog, DeviceDescriptor, DeviceKey};
use crate::selector::filter::{compute_visibility, VisibilityMap};

/// Ephemeral picker state. Never persisted; rebuilt from scratch for every
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// The single highlighted device, held by key.
    pub selected: Option<DeviceKey>,
    pub search_text: String,
}

/// What the presentation surface has to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Apply the freshly computed visibility to every row.
    ApplyVisibility(VisibilityMap),
    /// Un-highlight `previous`, highlight `selected`, show `description`.
    ShowDescription {
        previous: Option<DeviceKey>,
        selected: DeviceKey,
        description: String,
    },
    /// Nothing changed.
    Unchanged,
}

/// Filter/selector over an immutable catalog snapshot.
#[derive(Debug, Clone)]
pub struct Selector {
    catalog: Catalog,
    state: SelectionState,
}

impl Selector {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: SelectionState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn selected(&self) -> Option<DeviceKey> {
        self.state.selected
    }

    pub fn selected_device(&self) -> Option<&DeviceDescriptor> {
        self.state.selected.and_then(|key| self.catalog.device(key))
    }

    /// Visibility for the current search text.
    pub fn visibility(&self) -> VisibilityMap {
        compute_visibility(&self.catalog, &self.state.search_text)
    }

    /// Store `text` as the search text and recompute every row's visibility.
    /// The selection is left alone, even if the selected device is now hidden.
    pub fn on_search_text_changed(&mut self, text: &str) -> RenderInstruction {
        self.state.search_text = text.to_string();
        let visibility = self.visibility();
        debug!(
            search = %self.state.search_text,
            visible = visibility.visible_device_count(),
            "filter updated"
        );
        RenderInstruction::ApplyVisibility(visibility)
    }

    /// Select the device at `key`.
    ///
    /// Re-activating the current selection and unknown keys are no-ops.
    /// Hidden devices can be selected.
    pub fn on_device_activated(&mut self, key: DeviceKey) -> RenderInstruction {
        let Some(device) = self.catalog.device(key) else {
            debug!(?key, "ignoring activation of unknown device");
            return RenderInstruction::Unchanged;
        };

        if self.state.selected == Some(key) {
            return RenderInstruction::Unchanged;
        }

        let description = device.description.clone();
        let previous = self.state.selected.replace(key);
        debug!(device = %device.name, "device selected");

        RenderInstruction::ShowDescription {
            previous,
            selected: key,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SubFamilyGroup;

    fn selector() -> Selector {
        Selector::new(Catalog::new(vec![SubFamilyGroup::new(
            "M4",
            vec![
                DeviceDescriptor::new("STM32F407", "Foundation line"),
                DeviceDescriptor::new("STM32F429", "With LCD-TFT"),
            ],
        )]))
    }

    #[test]
    fn test_activation_sets_selection() {
        let mut selector = selector();
        let key = DeviceKey::new(0, 1);

        let instruction = selector.on_device_activated(key);
        assert_eq!(
            instruction,
            RenderInstruction::ShowDescription {
                previous: None,
                selected: key,
                description: "With LCD-TFT".to_string(),
            }
        );
        assert_eq!(selector.selected(), Some(key));
    }

    #[test]
    fn test_activation_reports_previous_selection() {
        let mut selector = selector();
        selector.on_device_activated(DeviceKey::new(0, 0));

        let instruction = selector.on_device_activated(DeviceKey::new(0, 1));
        assert!(matches!(
            instruction,
            RenderInstruction::ShowDescription {
                previous: Some(DeviceKey { group: 0, device: 0 }),
                ..
            }
        ));
    }

    #[test]
    fn test_reactivation_is_unchanged() {
        let mut selector = selector();
        let key = DeviceKey::new(0, 0);
        selector.on_device_activated(key);
        let before = selector.state().clone();

        assert_eq!(
            selector.on_device_activated(key),
            RenderInstruction::Unchanged
        );
        assert_eq!(selector.state(), &before);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut selector = selector();
        selector.on_device_activated(DeviceKey::new(0, 0));

        assert_eq!(
            selector.on_device_activated(DeviceKey::new(3, 0)),
            RenderInstruction::Unchanged
        );
        assert_eq!(selector.selected(), Some(DeviceKey::new(0, 0)));
    }

    #[test]
    fn test_filter_keeps_hidden_selection() {
        let mut selector = selector();
        selector.on_device_activated(DeviceKey::new(0, 0));

        let instruction = selector.on_search_text_changed("429");
        let RenderInstruction::ApplyVisibility(map) = instruction else {
            panic!("expected visibility update");
        };
        assert!(!map.is_device_visible(DeviceKey::new(0, 0)));
        assert_eq!(selector.selected(), Some(DeviceKey::new(0, 0)));
        assert_eq!(selector.search_text(), "429");
    }

    #[test]
    fn test_hidden_device_can_be_activated() {
        let mut selector = selector();
        selector.on_search_text_changed("xyz");

        let instruction = selector.on_device_activated(DeviceKey::new(0, 1));
        assert!(matches!(
            instruction,
            RenderInstruction::ShowDescription { .. }
        ));
        assert_eq!(
            selector.selected_device().map(|d| d.name.as_str()),
            Some("STM32F429")
        );
    }
}
