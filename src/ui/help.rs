use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("j / Down", "Move down"),
    ("k / Up", "Move up"),
    ("g", "Jump to top"),
    ("G", "Jump to bottom"),
    ("Enter / d", "Application detail"),
    ("s", "Sync selected application"),
    ("p", "Piped list"),
    ("/", "Filter applications"),
    ("o", "Cycle sort column"),
    ("r", "Refresh from control plane"),
    ("L", "Toggle log panel"),
    ("Esc", "Back / clear filter"),
    ("q", "Quit"),
    ("Ctrl+c", "Force quit"),
    ("?", "Toggle this help"),
    ("", ""),
    ("In detail", ""),
    ("s / Enter", "Sync with selected strategy"),
    ("S / m", "Select sync strategy"),
    ("", ""),
    ("In piped list", ""),
    ("Enter / m", "Enable / disable / recreate key"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup_width = 50;
    let popup_height = (BINDINGS.len() as u16) + 4;

    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() && desc.is_empty() {
                Line::from("")
            } else if desc.is_empty() {
                Line::from(Span::styled(format!("  -- {} --", key), Theme::footer()))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {:<14}", key), Theme::help_key()),
                    Span::styled(*desc, Theme::help_desc()),
                ])
            }
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keybindings ")
            .borders(Borders::ALL)
            .border_style(Theme::title()),
    );

    f.render_widget(help, popup_area);
}
