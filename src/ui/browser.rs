use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use crate::app::App;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let view = &app.browser_view;
    let [input_area, status_area] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);

    Paragraph::new(format!("{}▏", view.input))
        .block(super::panel(app.theme).title(" URL "))
        .render(input_area, buf);

    if let Some(status) = &view.status {
        Paragraph::new(status.as_str())
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .render(status_area, buf);
    }

    "type a url · enter open · esc back"
}
