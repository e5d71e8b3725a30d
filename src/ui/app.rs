use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::{Catalog, DeviceDescriptor, DeviceKey};
use crate::selector::{RenderInstruction, Selector, VisibilityMap};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPane {
    DeviceList,
    Description,
}

/// One line of the device list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerRow {
    Group(usize),
    Device(DeviceKey),
}

/// Messages the picker sends back to its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceMessage {
    Close,
}

pub struct App {
    pub selector: Selector,
    pub title: String,
    pub theme: Theme,
    /// Visibility last applied from the selector.
    pub visibility: VisibilityMap,
    /// Description text of the selected device, as last applied.
    pub description: Option<String>,
    /// Index into the visible device rows.
    pub cursor: usize,
    pub focus: FocusPane,
    pub search_mode: bool,
    pub search_query: String,
    pub show_info: bool,
    pub should_quit: bool,
    pub description_scroll: u16,
}

impl App {
    pub fn new(catalog: Catalog, title: String, theme: Theme) -> Self {
        let selector = Selector::new(catalog);
        let visibility = selector.visibility();
        Self {
            selector,
            title,
            theme,
            visibility,
            description: None,
            cursor: 0,
            focus: FocusPane::DeviceList,
            search_mode: false,
            search_query: String::new(),
            show_info: false,
            should_quit: false,
            description_scroll: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.selector.catalog()
    }

    /// Apply a selector result to the surface state.
    pub fn apply(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::ApplyVisibility(visibility) => {
                self.visibility = visibility;
                self.cursor = 0;
            }
            RenderInstruction::ShowDescription { description, .. } => {
                self.description = Some(description);
                self.description_scroll = 0;
            }
            RenderInstruction::Unchanged => {}
        }
    }

    /// Group headings and device rows that are currently visible, in order.
    pub fn rows(&self) -> Vec<PickerRow> {
        let mut rows = Vec::new();
        for (g, group) in self.visibility.groups.iter().enumerate() {
            if !group.visible {
                continue;
            }
            rows.push(PickerRow::Group(g));
            for (d, visible) in group.devices.iter().enumerate() {
                if *visible {
                    rows.push(PickerRow::Device(DeviceKey::new(g, d)));
                }
            }
        }
        rows
    }

    /// Position of the cursor device within [`App::rows`].
    pub fn cursor_row(&self) -> Option<usize> {
        let key = self.cursor_device()?;
        self.rows()
            .iter()
            .position(|row| *row == PickerRow::Device(key))
    }

    pub fn cursor_device(&self) -> Option<DeviceKey> {
        self.visibility.visible_devices().get(self.cursor).copied()
    }

    pub fn selected_device(&self) -> Option<&DeviceDescriptor> {
        self.selector.selected_device()
    }

    pub fn is_selected(&self, key: DeviceKey) -> bool {
        self.selector.selected() == Some(key)
    }

    pub fn next(&mut self) {
        let count = self.visibility.visible_device_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn previous(&mut self) {
        let count = self.visibility.visible_device_count();
        if count > 0 {
            if self.cursor > 0 {
                self.cursor -= 1;
            } else {
                self.cursor = count - 1;
            }
        }
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.visibility.visible_device_count().saturating_sub(1);
    }

    /// Activate the device under the cursor, if any.
    pub fn activate_cursor(&mut self) {
        if let Some(key) = self.cursor_device() {
            self.activate(key);
        }
    }

    pub fn activate(&mut self, key: DeviceKey) {
        let instruction = self.selector.on_device_activated(key);
        self.apply(instruction);
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
        self.focus = FocusPane::DeviceList;
    }

    /// Leave search mode. The filter stays applied.
    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_push_char(&mut self, c: char) {
        self.search_query.push(c);
        self.refresh_filter();
    }

    pub fn search_pop_char(&mut self) {
        self.search_query.pop();
        self.refresh_filter();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.refresh_filter();
    }

    fn refresh_filter(&mut self) {
        let instruction = self.selector.on_search_text_changed(&self.search_query);
        self.apply(instruction);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::DeviceList => FocusPane::Description,
            FocusPane::Description => FocusPane::DeviceList,
        };
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn scroll_description_down(&mut self) {
        self.description_scroll = self.description_scroll.saturating_add(1);
    }

    pub fn scroll_description_up(&mut self) {
        self.description_scroll = self.description_scroll.saturating_sub(1);
    }

    pub fn close(&mut self) -> SurfaceMessage {
        self.should_quit = true;
        SurfaceMessage::Close
    }

    /// Dispatch one key press. Returns `Some(SurfaceMessage::Close)` once the
    /// user dismisses the picker.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SurfaceMessage> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if has_ctrl && key.code == KeyCode::Char('c') {
            return Some(self.close());
        }

        if self.show_info {
            if matches!(key.code, KeyCode::Char('i') | KeyCode::Esc) {
                self.toggle_info();
            }
            return None;
        }

        if self.search_mode {
            match key.code {
                KeyCode::Esc => self.exit_search_mode(),
                KeyCode::Enter => {
                    self.activate_cursor();
                    self.exit_search_mode();
                }
                KeyCode::Down => self.next(),
                KeyCode::Up => self.previous(),
                KeyCode::Backspace => self.search_pop_char(),
                KeyCode::Char('u') if has_ctrl => self.clear_search(),
                KeyCode::Char(c) if !has_ctrl => self.search_push_char(c),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(self.close()),
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Char('i') => self.toggle_info(),
            KeyCode::Char('/') => self.enter_search_mode(),
            KeyCode::Char('u') if has_ctrl => self.clear_search(),
            _ if self.focus == FocusPane::Description => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.scroll_description_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_description_up(),
                _ => {}
            },
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Char('g') | KeyCode::Home => self.first(),
            KeyCode::Char('G') | KeyCode::End => self.last(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_cursor(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SubFamilyGroup;

    fn create_test_app() -> App {
        let catalog = Catalog::new(vec![
            SubFamilyGroup::new(
                "Sub1",
                vec![
                    DeviceDescriptor::new("D1", "first"),
                    DeviceDescriptor::new("D2", "second"),
                ],
            ),
            SubFamilyGroup::new("Sub2", vec![DeviceDescriptor::new("D3", "third")]),
        ]);
        App::new(catalog, "Test Pack".to_string(), Theme::default_theme().clone())
    }

    #[test]
    fn test_rows_interleave_headings_and_devices() {
        let app = create_test_app();
        assert_eq!(
            app.rows(),
            vec![
                PickerRow::Group(0),
                PickerRow::Device(DeviceKey::new(0, 0)),
                PickerRow::Device(DeviceKey::new(0, 1)),
                PickerRow::Group(1),
                PickerRow::Device(DeviceKey::new(1, 0)),
            ]
        );
    }

    #[test]
    fn test_cursor_wraps_over_devices_only() {
        let mut app = create_test_app();
        assert_eq!(app.cursor_device(), Some(DeviceKey::new(0, 0)));
        app.next();
        app.next();
        assert_eq!(app.cursor_device(), Some(DeviceKey::new(1, 0)));
        assert_eq!(app.cursor_row(), Some(4));
        app.next();
        assert_eq!(app.cursor_device(), Some(DeviceKey::new(0, 0)));
        app.previous();
        assert_eq!(app.cursor_device(), Some(DeviceKey::new(1, 0)));
    }

    #[test]
    fn test_filter_resets_cursor_and_hides_rows() {
        let mut app = create_test_app();
        app.next();
        app.search_push_char('d');
        app.search_push_char('3');
        assert_eq!(app.cursor, 0);
        assert_eq!(
            app.rows(),
            vec![PickerRow::Group(1), PickerRow::Device(DeviceKey::new(1, 0))]
        );
        app.search_pop_char();
        assert_eq!(app.visibility.visible_device_count(), 3);
    }

    #[test]
    fn test_activate_shows_description() {
        let mut app = create_test_app();
        app.next();
        app.activate_cursor();
        assert_eq!(app.description.as_deref(), Some("second"));
        assert!(app.is_selected(DeviceKey::new(0, 1)));
    }

    #[test]
    fn test_ctrl_chords_are_not_typed_into_search() {
        let mut app = create_test_app();
        app.enter_search_mode();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl('a')), None);
        assert_eq!(app.handle_key(ctrl('d')), None);
        assert!(app.search_query.is_empty());
        assert_eq!(app.visibility.visible_device_count(), 3);

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::SHIFT));
        assert_eq!(app.search_query, "d3");
        assert!(app.search_mode);
    }

    #[test]
    fn test_no_cursor_when_nothing_visible() {
        let mut app = create_test_app();
        app.search_push_char('x');
        assert_eq!(app.cursor_device(), None);
        app.activate_cursor();
        assert!(app.description.is_none());
        app.next();
        assert_eq!(app.cursor, 0);
    }
}
