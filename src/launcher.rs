use ratatui::style::Color;

/// A widget reachable from the launcher grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Tile {
    #[strum(serialize = "To-Do List")]
    Todo,
    Timer,
    Calendar,
    Calculator,
    Browser,
}

impl Tile {
    pub const ALL: [Tile; 5] = [
        Tile::Todo,
        Tile::Timer,
        Tile::Calendar,
        Tile::Calculator,
        Tile::Browser,
    ];

    pub fn color(self) -> Color {
        match self {
            Tile::Todo => Color::Rgb(100, 149, 237),
            Tile::Calculator => Color::Rgb(241, 196, 15),
            Tile::Timer => Color::Rgb(46, 204, 113),
            Tile::Calendar => Color::Rgb(155, 89, 182),
            Tile::Browser => Color::Rgb(52, 152, 219),
        }
    }
}

pub const COLUMNS: usize = 3;

/// Selection cursor over the tile grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Launcher {
    selected: usize,
}

impl Launcher {
    pub fn selected(&self) -> Tile {
        Tile::ALL[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, tile: Tile) {
        if let Some(idx) = Tile::ALL.iter().position(|t| *t == tile) {
            self.selected = idx;
        }
    }

    pub fn left(&mut self) {
        if self.selected % COLUMNS > 0 {
            self.selected -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.selected % COLUMNS + 1 < COLUMNS && self.selected + 1 < Tile::ALL.len() {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        if self.selected >= COLUMNS {
            self.selected -= COLUMNS;
        }
    }

    pub fn down(&mut self) {
        if self.selected + COLUMNS < Tile::ALL.len() {
            self.selected += COLUMNS;
        }
    }
}
