use crate::ui::app::{App, FocusPane, PickerRow};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const DESCRIPTION_PLACEHOLDER: &str = "Select a device to see its description...";

pub fn render(frame: &mut Frame, app: &App) {
    // Header + search bar + body + footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);
    render_search_bar(frame, app, main_chunks[1]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[2]);

    render_device_list(frame, app, body_chunks[0]);
    render_description(frame, app, body_chunks[1]);
    render_footer(frame, app, main_chunks[3]);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let catalog = app.catalog();
    let header_text = vec![Line::from(vec![
        Span::styled(
            format!("  {}  ", app.title),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{} devices in {} subfamilies",
                catalog.device_count(),
                catalog.groups().len()
            ),
            Style::default().fg(theme.fg_dim),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(header, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.search_mode {
        theme.accent
    } else {
        theme.fg_dim
    };

    let line = if app.search_query.is_empty() && !app.search_mode {
        Line::from(Span::styled(
            "Search devices... (press /)",
            Style::default().fg(theme.fg_dim),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.search_query.clone(),
            Style::default().fg(theme.heading),
        )];
        if app.search_mode {
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    let search = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🔍 Search")
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(search, area);
}

fn render_device_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let catalog = app.catalog();
    let cursor = app.cursor_device();
    let rows = app.rows();

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(format!("No devices match \"{}\"", app.search_query))
            .style(Style::default().fg(theme.error))]
    } else {
        rows.iter()
            .map(|row| match row {
                PickerRow::Group(g) => {
                    let label = catalog
                        .group(*g)
                        .map(|group| group.label.as_str())
                        .unwrap_or_default();
                    ListItem::new(format!("▼ {}", label)).style(
                        Style::default()
                            .fg(theme.heading)
                            .add_modifier(Modifier::BOLD),
                    )
                }
                PickerRow::Device(key) => {
                    let name = catalog
                        .device(*key)
                        .map(|d| d.name.as_str())
                        .unwrap_or_default();
                    let is_selected = app.is_selected(*key);
                    let marker = if is_selected { "●" } else { " " };

                    let style = if cursor == Some(*key) && app.focus == FocusPane::DeviceList {
                        Style::default()
                            .fg(theme.bg)
                            .bg(theme.accent)
                            .add_modifier(Modifier::BOLD)
                    } else if is_selected {
                        Style::default().fg(theme.selected).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg)
                    };

                    ListItem::new(format!("  {} {}", marker, name)).style(style)
                }
            })
            .collect()
    };

    let border_color = if app.focus == FocusPane::DeviceList {
        theme.accent
    } else {
        theme.fg_dim
    };

    let title = format!(
        "📟 Devices ({}/{})",
        app.visibility.visible_device_count(),
        catalog.device_count()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().bg(theme.bg));

    // The state only drives scrolling; row styles are set above.
    let mut state = ListState::default();
    state.select(app.cursor_row());
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_description(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.focus == FocusPane::Description {
        theme.accent
    } else {
        theme.fg_dim
    };

    let text = match (app.selector.selected(), app.selected_device()) {
        (Some(key), Some(device)) => {
            let group = app
                .catalog()
                .group(key.group)
                .map(|g| g.label.clone())
                .unwrap_or_default();

            let mut lines = vec![
                Line::from(vec![Span::styled(
                    device.name.clone(),
                    Style::default()
                        .fg(theme.selected)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from(vec![
                    Span::styled("Subfamily: ", Style::default().fg(theme.fg_dim)),
                    Span::raw(group),
                ]),
            ];
            if !app.visibility.is_device_visible(key) {
                lines.push(Line::from(Span::styled(
                    "(hidden by the current filter)",
                    Style::default().fg(theme.fg_dim),
                )));
            }
            lines.push(Line::from(""));
            let description = app.description.as_deref().unwrap_or(&device.description);
            lines.extend(description.lines().map(|l| Line::from(l.to_string())));
            lines
        }
        _ => vec![Line::from(Span::styled(
            DESCRIPTION_PLACEHOLDER,
            Style::default().fg(theme.fg_dim),
        ))],
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("📄 Device Description")
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .wrap(Wrap { trim: true })
        .scroll((app.description_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.search_mode {
        "[Type] Filter  [↑↓] Navigate  [Enter] Select  [Ctrl+u] Clear  [Esc] Done"
    } else {
        match app.focus {
            FocusPane::DeviceList => {
                "[↑↓/jk] Navigate  [Enter] Select  [/] Search  [Tab] Switch  [i] Help  [Q] Quit"
            }
            FocusPane::Description => "[↑↓/jk] Scroll  [Tab] Switch Pane  [Q] Quit",
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(app.theme.fg_dim))
        .block(Block::default());

    frame.render_widget(footer, area);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(frame.area(), 56, 14);

    let key_line = |key: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<12}", key), Style::default().fg(theme.heading)),
            Span::raw(action),
        ])
    };

    let text = vec![
        key_line("/", "Search by device or subfamily name"),
        key_line("Ctrl+u", "Clear the search"),
        key_line("j/k ↑/↓", "Move the cursor"),
        key_line("g/G", "First / last device"),
        key_line("Enter/Space", "Select the device under the cursor"),
        key_line("Tab", "Switch between list and description"),
        key_line("i", "Toggle this help"),
        key_line("q/Esc", "Close the picker"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Theme: {}", theme.name),
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let modal = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("ℹ️  Help")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg));

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, DeviceDescriptor, SubFamilyGroup};
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app() -> App {
        let catalog = Catalog::new(vec![SubFamilyGroup::new(
            "STM32F407",
            vec![
                DeviceDescriptor::new("STM32F407VG", "Foundation line, 1 MB Flash"),
                DeviceDescriptor::new("STM32F407ZG", "144-pin package"),
            ],
        )]);
        App::new(catalog, "STM32F4xx_DFP".to_string(), Theme::default_theme().clone())
    }

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_groups_devices_and_placeholder() {
        let app = create_test_app();
        let text = screen(&app);
        assert!(text.contains("STM32F4xx_DFP"));
        assert!(text.contains("STM32F407VG"));
        assert!(text.contains("Select a device to see its description"));
    }

    #[test]
    fn test_render_shows_selected_description() {
        let mut app = create_test_app();
        app.next();
        app.activate_cursor();
        let text = screen(&app);
        assert!(text.contains("144-pin package"));
    }

    #[test]
    fn test_render_no_match_message() {
        let mut app = create_test_app();
        for c in "xyz".chars() {
            app.search_push_char(c);
        }
        let text = screen(&app);
        assert!(text.contains("No devices match \"xyz\""));
        assert!(!text.contains("STM32F407ZG"));
    }

    #[test]
    fn test_render_single_letter_filter_is_case_insensitive() {
        let mut app = create_test_app();
        app.search_push_char('z');
        let text = screen(&app);
        assert!(text.contains("STM32F407ZG"));
        assert!(!text.contains("STM32F407VG"));
        assert!(!text.contains("No devices match"));
    }

    #[test]
    fn test_render_info_modal() {
        let mut app = create_test_app();
        app.toggle_info();
        let text = screen(&app);
        assert!(text.contains("Toggle this help"));
    }
}
