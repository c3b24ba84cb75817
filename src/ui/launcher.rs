use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{BorderType, Block, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use deskbuddy::launcher::{Tile, COLUMNS};

pub fn render(app: &App, area: Rect, buf: &mut Buffer) -> &'static str {
    let rows = Tile::ALL.len().div_ceil(COLUMNS);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows])
        .spacing(1)
        .split(area);

    for (idx, tile) in Tile::ALL.iter().enumerate() {
        let cols = Layout::horizontal(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .spacing(2)
            .split(row_areas[idx / COLUMNS]);
        let cell = cols[idx % COLUMNS];

        let selected = idx == app.launcher.selected_index();
        let mut style = Style::default().bg(tile.color()).fg(Color::White);
        if selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let block = Block::bordered()
            .border_type(if selected {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .style(style);

        let inner = block.inner(cell);
        block.render(cell, buf);

        // drop the shortcut number when the tile is too narrow
        let mut label = format!("{} {}", idx + 1, tile);
        if label.width() > inner.width as usize {
            label = tile.to_string();
        }
        let top = inner.y + inner.height.saturating_sub(1) / 2;
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .render(Rect::new(inner.x, top, inner.width, inner.height.min(1)), buf);
    }

    "arrows move · enter/1-5 open · tab change mode · q quit"
}
