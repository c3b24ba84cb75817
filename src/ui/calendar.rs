use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use deskbuddy::calendar::DayMarker;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let theme = app.theme;
    let store = &app.calendar;
    let [month_area, grid_area, note_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Length(3),
    ])
    .areas(area);

    Paragraph::new(Span::styled(
        format!("<  {}  >", store.visible_month().label()),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(month_area, buf);

    let cells = store.grid();
    let mut lines = vec![Line::from(
        WEEKDAYS
            .iter()
            .map(|d| {
                Span::styled(
                    format!("{d:^5}"),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
                )
            })
            .collect::<Vec<_>>(),
    )];
    for week in cells.chunks(7) {
        let spans = week
            .iter()
            .map(|cell| match cell {
                None => Span::raw("     "),
                Some(date) => {
                    let mut style = match store.marker(*date, app.today) {
                        DayMarker::Today => Style::default().bg(theme.today).fg(Color::White),
                        DayMarker::Noted => Style::default().bg(theme.noted).fg(Color::White),
                        DayMarker::Plain => Style::default(),
                    };
                    if date.day() == app.calendar_view.selected_day {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(format!("{:^5}", date.day()), style)
                }
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(grid_area, buf);

    let selected = app.selected_date();
    let title = selected
        .map(|d| format!(" {d} "))
        .unwrap_or_default();
    let (body, legend) = match &app.calendar_view.draft {
        Some(draft) => (
            format!("{draft}▏"),
            "type a note · enter save (empty removes) · esc cancel",
        ),
        None => (
            selected
                .and_then(|d| store.get_event(d))
                .unwrap_or("")
                .to_string(),
            "arrows day · </> month · (t)oday · enter edit note · (d)elete · esc back",
        ),
    };
    Paragraph::new(body)
        .block(super::panel(theme).title(title))
        .render(note_area, buf);

    legend
}
