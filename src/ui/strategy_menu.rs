use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::control::models::SyncStrategy;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const POPUP_WIDTH: u16 = 36;

pub fn render_strategy_menu(f: &mut Frame, app: &App, area: Rect) {
    let popup_height = (SyncStrategy::ALL.len() as u16) + 2;
    let popup_area = centered_rect(POPUP_WIDTH, popup_height, area);

    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = SyncStrategy::ALL
        .iter()
        .enumerate()
        .map(|(i, strategy)| {
            let marker = if *strategy == app.strategy() { "*" } else { " " };
            let text = format!(" {} {} ", marker, strategy.menu_label());
            if i == app.strategy_cursor() {
                Line::from(Span::styled(text, Theme::selected()))
            } else {
                Line::from(Span::styled(text, Theme::value()))
            }
        })
        .collect();

    let menu = Paragraph::new(lines).block(
        Block::default()
            .title(" Sync Strategy ")
            .borders(Borders::ALL)
            .border_style(Theme::title()),
    );
    f.render_widget(menu, popup_area);
}
