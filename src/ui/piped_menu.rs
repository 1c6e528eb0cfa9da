use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const POPUP_WIDTH: u16 = 30;

pub fn render_piped_menu(f: &mut Frame, app: &App, area: Rect) {
    let actions = app.piped_menu_actions();
    if actions.is_empty() {
        return;
    }

    let title = app
        .selected_piped()
        .map(|p| format!(" {} ", p.name))
        .unwrap_or_else(|| " Piped ".to_string());

    let popup_height = (actions.len() as u16) + 2;
    let popup_area = centered_rect(POPUP_WIDTH, popup_height, area);

    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let text = format!("  {} ", action.label());
            if i == app.piped_menu_cursor() {
                Line::from(Span::styled(text, Theme::selected()))
            } else {
                Line::from(Span::styled(text, Theme::value()))
            }
        })
        .collect();

    let menu = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::title()),
    );
    f.render_widget(menu, popup_area);
}
