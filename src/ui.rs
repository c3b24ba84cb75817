mod browser;
mod calculator;
mod calendar;
mod launcher;
mod timer;
mod todo;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::app::{App, Screen};
use deskbuddy::{launcher::Tile, theme::Theme};

const HORIZONTAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        Block::default()
            .style(Style::default().bg(theme.background).fg(theme.foreground))
            .render(area, buf);

        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(HORIZONTAL_MARGIN)
        .areas(area);

        let title = match self.screen {
            Screen::Launcher => "Desktop Buddy".to_string(),
            Screen::Widget(tile) => tile.to_string(),
        };
        render_header(&title, theme, header, buf);

        let legend = match self.screen {
            Screen::Launcher => launcher::render(self, body, buf),
            Screen::Widget(Tile::Todo) => todo::render(self, body, buf),
            Screen::Widget(Tile::Calculator) => calculator::render(self, body, buf),
            Screen::Widget(Tile::Timer) => timer::render(self, body, buf),
            Screen::Widget(Tile::Calendar) => calendar::render(self, body, buf),
            Screen::Widget(Tile::Browser) => browser::render(self, body, buf),
        };

        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(footer, buf);
    }
}

fn render_header(title: &str, theme: Theme, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(format!(" {title} "), bold.fg(theme.foreground).bg(theme.accent)),
        Span::raw("  "),
        Span::styled(
            if theme.dark { "dark" } else { "light" },
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    Paragraph::new(line)
        .block(Block::bordered().border_style(Style::default().fg(theme.accent)))
        .render(area, buf);
}

/// Rounded panel used by every widget body
fn panel(theme: Theme) -> Block<'static> {
    Block::bordered()
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.panel).fg(theme.foreground))
}
