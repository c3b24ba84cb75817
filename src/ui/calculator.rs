use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use deskbuddy::calculator::format_result;

const KEYPAD: [[&str; 4]; 5] = [
    ["C", "←", "/", "×"],
    ["7", "8", "9", "-"],
    ["4", "5", "6", "+"],
    ["1", "2", "3", "="],
    ["0", ".", "%", "+/-"],
];

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let theme = app.theme;
    let calc = &app.calculator;
    let [display_area, keypad_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(5)]).areas(area);

    let pending = calc
        .pending_operator()
        .map(|op| format!("{} {}", format_result(calc.accumulator()), op))
        .unwrap_or_default();
    let display = Paragraph::new(vec![
        Line::from(pending).style(Style::default().add_modifier(Modifier::DIM)),
        Line::from(calc.display().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Right)
    .block(super::panel(theme));
    display.render(display_area, buf);

    let rows = Layout::vertical([Constraint::Ratio(1, KEYPAD.len() as u32); KEYPAD.len()])
        .split(keypad_area);
    for (row, keys) in rows.iter().zip(KEYPAD.iter()) {
        let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4])
            .spacing(1)
            .split(*row);
        for (cell, key) in cells.iter().zip(keys.iter()) {
            let style = if *key == "=" || *key == "C" {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Paragraph::new(*key)
                .style(style)
                .alignment(Alignment::Center)
                .block(super::panel(theme))
                .render(*cell, buf);
        }
    }

    "digits . + - * / % · enter = · backspace ← · n +/- · del/c clear · esc back"
}
