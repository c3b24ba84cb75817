use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Gauge, Paragraph, Widget},
};

use crate::app::App;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let theme = app.theme;
    let timer = &app.timer;
    let [quote_area, stats_area, gauge_area, state_area, notice_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(ratatui::layout::Flex::Center)
    .areas(area);

    Paragraph::new(Span::styled(
        format!("“{}”", app.quote),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(quote_area, buf);

    Paragraph::new(format!("Cycles Completed : {}", timer.sessions_completed()))
        .alignment(Alignment::Center)
        .render(stats_area, buf);

    Gauge::default()
        .block(super::panel(theme))
        .gauge_style(Style::default().fg(theme.accent).bg(theme.panel))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label(Span::styled(
            timer.clock_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(gauge_area, buf);

    Paragraph::new(if timer.is_running() { "running" } else { "paused" })
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center)
        .render(state_area, buf);

    if let Some(notice) = app.notice {
        Paragraph::new(Span::styled(
            notice,
            Style::default().fg(theme.today).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(notice_area, buf);
    }

    "(s)tart · (p)ause · space toggle · (r)eset · esc back"
}
