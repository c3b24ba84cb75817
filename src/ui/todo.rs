use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::app::App;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let view = &app.todo_view;
    let [input_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(format!("{}▏", view.input))
        .block(super::panel(app.theme).title(" New task "))
        .render(input_area, buf);

    let lines: Vec<Line> = if app.todo.is_empty() {
        vec![Line::styled(
            "Nothing to do",
            Style::default().add_modifier(Modifier::DIM),
        )]
    } else {
        app.todo
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == view.selected {
                    Line::styled(
                        item.as_str(),
                        Style::default()
                            .fg(app.theme.background)
                            .bg(app.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::raw(item.as_str())
                }
            })
            .collect()
    };

    // keep the cursor row visible in short terminals
    let visible = list_area.height.saturating_sub(2) as usize;
    let scroll = (view.selected + 1).saturating_sub(visible) as u16;
    Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(super::panel(app.theme).title(format!(" Tasks ({}) ", app.todo.len())))
        .render(list_area, buf);

    if let Some(status) = &view.status {
        Paragraph::new(status.as_str())
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .render(status_area, buf);
    }

    "type a task · enter add · ↑↓ select · del remove · esc back"
}
