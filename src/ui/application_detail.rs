use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::store::ApplicationDetail;
use crate::ui::theme::Theme;

pub fn render_application_detail(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .split(area);

    let detail = app.current_detail();

    let title = match detail {
        Some(ref d) => format!(" Application: {} ", d.name),
        None => " Application ".to_string(),
    };
    let header = Paragraph::new(Line::from(Span::styled(title, Theme::title())))
        .block(Block::default().borders(Borders::ALL).style(Theme::border()));
    f.render_widget(header, chunks[0]);

    match detail {
        Some(ref d) => render_body(f, app, d, chunks[1]),
        None => render_placeholder(f, chunks[1]),
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " Esc:back  s/Enter:sync  S:strategy  r:refresh",
        Theme::footer(),
    )));
    f.render_widget(footer, chunks[2]);
}

fn render_body(f: &mut Frame, app: &App, detail: &ApplicationDetail, area: Rect) {
    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_info_column(f, detail, columns[0]);
    render_sync_column(f, app, detail, columns[1]);
}

fn render_info_column(f: &mut Frame, detail: &ApplicationDetail, area: Rect) {
    let lines = vec![
        kv_line("ID", &detail.id),
        kv_line("Name", &detail.name),
        kv_line("Kind", &detail.kind),
        kv_line("Environment", &detail.environment_name),
        kv_line("Piped", &detail.piped_name),
        kv_line("Description", &detail.description),
        kv_line("Updated", &detail.updated_display),
    ];

    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .style(Theme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_sync_column(f: &mut Frame, app: &App, detail: &ApplicationDetail, area: Rect) {
    let health_style = match detail.health_label.as_str() {
        "Healthy" => Theme::healthy(),
        "Unhealthy" => Theme::unhealthy(),
        _ => Theme::unknown(),
    };
    let sync_style = match detail.sync_label.as_str() {
        "Synced" => Theme::synced(),
        "Out of Sync" => Theme::out_of_sync(),
        "Deploying" => Theme::deploying(),
        _ => Theme::unknown(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {:<14}", "Health"), Theme::label()),
            Span::styled(detail.health_label.clone(), health_style),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<14}", "Sync"), Theme::label()),
            Span::styled(detail.sync_label.clone(), sync_style),
        ]),
        Line::from(""),
    ];

    // The trigger affordance: names the selected strategy and reflects an
    // in-flight command.
    if app.is_syncing(&detail.id) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(" Syncing... ", Theme::syncing_marker()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" [s] {} ", app.sync_button_label()),
                Theme::selected(),
            ),
            Span::raw("  "),
            Span::styled("[S] select sync strategy", Theme::footer()),
        ]));
    }

    if let Some(err) = app.sync_error(&detail.id) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("last sync failed: {}", err), Theme::error()),
        ]));
    }

    let block = Block::default()
        .title(" Live State ")
        .borders(Borders::ALL)
        .style(Theme::border());
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Theme::border());
    let para = Paragraph::new(Line::from(Span::styled(
        "  application not found",
        Theme::unknown(),
    )))
    .block(block);
    f.render_widget(para, area);
}

fn kv_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), Theme::label()),
        Span::styled(value.to_string(), Theme::value()),
    ])
}
