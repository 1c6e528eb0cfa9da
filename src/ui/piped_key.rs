use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::control::models::PipedKey;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const POPUP_WIDTH: u16 = 70;
const POPUP_HEIGHT: u16 = 9;

/// Shown once after recreating a piped key; the secret is not retrievable
/// again after this dialog is dismissed.
pub fn render_piped_key(f: &mut Frame, key: &PipedKey, area: Rect) {
    let popup_area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);

    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {:<8}", "id"), Theme::label()),
            Span::styled(key.id.clone(), Theme::value()),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<8}", "key"), Theme::label()),
            Span::styled(key.key.clone(), Theme::command_bar()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Copy the key now; it will not be shown again.",
            Theme::footer(),
        )),
        Line::from(""),
        Line::from(Span::styled("  Enter/Esc: close", Theme::footer())),
    ];

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Piped key recreated ")
                .borders(Borders::ALL)
                .border_style(Theme::title()),
        );
    f.render_widget(dialog, popup_area);
}
