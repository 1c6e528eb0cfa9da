use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

pub fn render_piped_list(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    render_table(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let pipeds = app.piped_rows();
    let enabled = pipeds.iter().filter(|p| !p.disabled).count();
    let disabled = pipeds.len() - enabled;

    let title = format!(" p9s - Pipeds [{} enabled, {} disabled]", enabled, disabled);

    let mut spans = vec![Span::styled(title, Theme::title())];
    if app.piped_busy() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" working... ", Theme::syncing_marker()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Theme::border());
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Name", "Version", "Description", "Status", "Started"]
        .iter()
        .map(|h| Cell::from(*h).style(Theme::header()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .piped_rows()
        .iter()
        .map(|piped| {
            let (status_label, status_style) = if piped.disabled {
                ("Disabled", Theme::disabled())
            } else {
                ("Enabled", Theme::healthy())
            };

            let name_style = if piped.disabled {
                Theme::disabled()
            } else {
                Theme::value()
            };

            Row::new(vec![
                Cell::from(piped.name.clone()).style(name_style),
                Cell::from(piped.version_label().to_string()),
                Cell::from(piped.description.clone().unwrap_or_default()),
                Cell::from(status_label).style(status_style),
                Cell::from(piped.started_display()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(10),
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
    state.select(Some(app.piped_selected()));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, _app: &App, area: Rect) {
    let keys = "  Enter/m:actions  r:refresh  Esc:back  ?:help";
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(keys, Theme::footer()))),
        area,
    );
}
