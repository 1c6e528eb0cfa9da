mod application_detail;
mod application_list;
mod confirm_quit;
mod help;
mod log_panel;
mod piped_key;
mod piped_list;
mod piped_menu;
mod strategy_menu;
mod theme;

pub use application_detail::render_application_detail;
pub use application_list::render_application_list;
pub use confirm_quit::render_confirm_quit;
pub use help::render_help;
pub use log_panel::render_log_panel;
pub use piped_key::render_piped_key;
pub use piped_list::render_piped_list;
pub use piped_menu::render_piped_menu;
pub use strategy_menu::render_strategy_menu;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
