use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::log::{LogEntry, LogLevel};
use crate::ui::theme::Theme;

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Theme::footer(),
        LogLevel::Warn => Theme::out_of_sync(),
        LogLevel::Error => Theme::error(),
    }
}

/// Sync lifecycle entries stand out from routine polling noise; errors stay
/// red regardless of origin.
fn message_style(entry: &LogEntry) -> Style {
    if entry.level == LogLevel::Error {
        Theme::error()
    } else if entry.message.starts_with("sync ") {
        Theme::syncing_marker()
    } else {
        Theme::value()
    }
}

fn entry_line(entry: &LogEntry) -> Line<'_> {
    let ts = entry.timestamp.format("%H:%M:%S").to_string();
    Line::from(vec![
        Span::styled(format!(" {} ", ts), Theme::footer()),
        Span::styled(
            format!("[{:<5}] ", entry.level.label()),
            level_style(entry.level),
        ),
        Span::styled(&entry.message, message_style(entry)),
    ])
}

pub fn render_log_panel(f: &mut Frame, entries: &[LogEntry], scroll: usize, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = entries.iter().map(entry_line).collect();

    let total = lines.len();
    // Scroll at or past the end clamps to the last page.
    let max_scroll = total.saturating_sub(inner_height);
    let effective_scroll = scroll.min(max_scroll);

    let footer_text = format!(
        " L:back  j/k:scroll  g/G:top/bottom  c:clear  ({} entries) ",
        total
    );

    let block = Block::default()
        .title(" Log ")
        .title_bottom(Line::from(footer_text).centered())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((effective_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_sync_entries_get_marker_style() {
        let sync = entry(LogLevel::Info, "sync requested: app=app-1");
        let poll = entry(LogLevel::Info, "parsed 3 applications");
        assert_eq!(message_style(&sync), Theme::syncing_marker());
        assert_eq!(message_style(&poll), Theme::value());
    }

    #[test]
    fn test_errors_stay_red_even_for_sync_entries() {
        let failed = entry(LogLevel::Error, "sync failed: app=app-1 timeout");
        assert_eq!(message_style(&failed), Theme::error());
        assert_eq!(level_style(LogLevel::Warn), Theme::out_of_sync());
    }
}
