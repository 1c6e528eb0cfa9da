use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::{App, ViewMode};
use crate::control::models::{HealthStatus, SyncState};
use crate::ui::theme::Theme;

pub fn render_application_list(f: &mut Frame, app: &App, area: Rect) {
    let show_command_bar = app.is_filtering();

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(if show_command_bar { 1 } else { 0 }),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    if show_command_bar {
        render_filter_bar(f, app, chunks[1]);
    }
    render_table(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.filtered_rows();
    let healthy = rows
        .iter()
        .filter(|r| r.health == Some(HealthStatus::Healthy))
        .count();

    let title = format!(
        " p9s - Applications [{}/{} healthy]",
        healthy,
        rows.len()
    );
    let sort_info = format!(" Sort: {} ", app.sort_label());

    let mut spans = vec![
        Span::styled(title, Theme::title()),
        Span::raw("  "),
        Span::styled(sort_info, Theme::footer()),
    ];

    if let Some(err) = app.fetch_error() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" fetch error: {} ", err),
            Theme::error(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Theme::border());
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" /", Theme::command_bar_label()),
        Span::styled(app.filter_query().to_string(), Theme::command_bar()),
    ];
    if app.view_mode() == ViewMode::Filter {
        spans.push(Span::styled("_", Theme::command_bar()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["", "Name", "Kind", "Env", "Health", "Sync", "Piped", "Updated"]
        .iter()
        .map(|h| Cell::from(*h).style(Theme::header()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .filtered_rows()
        .iter()
        .map(|row| {
            let syncing = app.is_syncing(&row.id);
            let failed = app.sync_error(&row.id).is_some();

            let (marker, marker_style) = if syncing {
                ("~", Theme::syncing_marker())
            } else if failed {
                ("!", Theme::error())
            } else {
                ("", Theme::footer())
            };

            let health_style = match row.health {
                Some(HealthStatus::Healthy) => Theme::healthy(),
                Some(HealthStatus::Unhealthy) => Theme::unhealthy(),
                Some(HealthStatus::Unknown) | None => Theme::unknown(),
            };

            let sync_label = if syncing {
                "Syncing...".to_string()
            } else {
                row.sync.map(|s| s.label().to_string()).unwrap_or_else(|| "Unknown".to_string())
            };
            let sync_style = if syncing {
                Theme::syncing_marker()
            } else {
                match row.sync {
                    Some(SyncState::Synced) => Theme::synced(),
                    Some(SyncState::OutOfSync) => Theme::out_of_sync(),
                    Some(SyncState::Deploying) => Theme::deploying(),
                    Some(SyncState::Unknown) | None => Theme::unknown(),
                }
            };

            let health_label = row
                .health
                .map(|h| h.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string());

            Row::new(vec![
                Cell::from(marker).style(marker_style),
                Cell::from(row.name.clone()),
                Cell::from(row.kind.clone()),
                Cell::from(row.environment_name.clone()),
                Cell::from(health_label).style(health_style),
                Cell::from(sync_label).style(sync_style),
                Cell::from(row.piped_name.clone()),
                Cell::from(row.updated_display.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Theme::border()),
        )
        .row_highlight_style(Theme::selected());

    let mut state = TableState::default();
    state.select(Some(app.selected_index()));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let version = env!("CARGO_PKG_VERSION");
    let stats = format!(" p9s {} | {} applications", version, app.store().application_count());
    let keys = "  Enter:detail  s:sync  p:pipeds  /:filter  o:sort  r:refresh  ?:help";

    let footer = Line::from(vec![
        Span::styled(stats, Theme::command_bar()),
        Span::styled(keys, Theme::footer()),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}
