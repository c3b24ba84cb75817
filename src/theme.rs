use ratatui::style::Color;

/// Immutable color scheme handed to the rendering layer. Toggling produces a
/// new value; nothing global is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub panel: Color,
    pub foreground: Color,
    pub accent: Color,
    pub today: Color,
    pub noted: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        dark: true,
        background: Color::Rgb(40, 44, 52),
        panel: Color::Rgb(50, 54, 61),
        foreground: Color::White,
        accent: Color::Rgb(100, 149, 237),
        today: Color::Rgb(231, 76, 60),
        noted: Color::Rgb(41, 128, 185),
    };

    pub const LIGHT: Theme = Theme {
        dark: false,
        background: Color::Rgb(245, 247, 250),
        panel: Color::White,
        foreground: Color::Black,
        accent: Color::Rgb(72, 118, 255),
        today: Color::Rgb(231, 76, 60),
        noted: Color::Rgb(41, 128, 185),
    };

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn toggled(self) -> Self {
        Self::from_dark_mode(!self.dark)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_swaps_palettes() {
        let theme = Theme::default();
        assert!(theme.dark);
        assert_eq!(theme.toggled(), Theme::LIGHT);
        assert_eq!(theme.toggled().toggled(), theme);
    }
}
