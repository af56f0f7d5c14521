use ratatui::style::Color;
use std::sync::atomic::{AtomicUsize, Ordering};

// Color palette structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub selection_bg: Color,
    pub selection_text: Color,
    pub bar_bg: Color, // Navigation and status bars
    pub bar_text: Color,
    pub muted: Color, // Disabled buttons, gutters
    pub border: Color,
}

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ThemeId {
    Default = 0,
    Dark = 1,
    SolarizedLight = 2,
    SolarizedDark = 3,
    HighContrast = 4,
    Monokai = 5,
}

impl ThemeId {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Default => "Default",
            ThemeId::Dark => "Dark",
            ThemeId::SolarizedLight => "Solarized Light",
            ThemeId::SolarizedDark => "Solarized Dark",
            ThemeId::HighContrast => "High Contrast",
            ThemeId::Monokai => "Monokai",
        }
    }

    pub fn all() -> &'static [ThemeId] {
        &[
            ThemeId::Default,
            ThemeId::Dark,
            ThemeId::SolarizedLight,
            ThemeId::SolarizedDark,
            ThemeId::HighContrast,
            ThemeId::Monokai,
        ]
    }

    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|theme| theme.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(ThemeId::Default)
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> Self {
        Self::from_index(*self as usize + 1)
    }

    fn from_index(idx: usize) -> Self {
        Self::all()[idx % Self::all().len()]
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            ThemeId::Default => &DEFAULT_PALETTE,
            ThemeId::Dark => &DARK_PALETTE,
            ThemeId::SolarizedLight => &SOLARIZED_LIGHT_PALETTE,
            ThemeId::SolarizedDark => &SOLARIZED_DARK_PALETTE,
            ThemeId::HighContrast => &HIGH_CONTRAST_PALETTE,
            ThemeId::Monokai => &MONOKAI_PALETTE,
        }
    }
}

static CURRENT_THEME_INDEX: AtomicUsize = AtomicUsize::new(0);

pub fn current_theme_id() -> ThemeId {
    ThemeId::from_index(CURRENT_THEME_INDEX.load(Ordering::Relaxed))
}

pub fn set_theme(theme: ThemeId) {
    CURRENT_THEME_INDEX.store(theme as usize, Ordering::Relaxed);
}

pub fn current_theme() -> &'static Palette {
    current_theme_id().palette()
}

static DEFAULT_PALETTE: Palette = Palette {
    background: hex(0xffffff),
    text: hex(0x000000),
    selection_bg: hex(0x3399ff),
    selection_text: hex(0xffffff),
    bar_bg: hex(0xe0e0e0),
    bar_text: hex(0x000000),
    muted: hex(0x9a9a9a),
    border: hex(0xc0c0c0),
};

static DARK_PALETTE: Palette = Palette {
    background: hex(0x2b2b2b),
    text: hex(0xffffff),
    selection_bg: hex(0x4a9eff),
    selection_text: hex(0xffffff),
    bar_bg: hex(0x333333),
    bar_text: hex(0xffffff),
    muted: hex(0x777777),
    border: hex(0x555555),
};

static SOLARIZED_LIGHT_PALETTE: Palette = Palette {
    background: hex(0xfdf6e3),
    text: hex(0x657b83),
    selection_bg: hex(0x268bd2),
    selection_text: hex(0xfdf6e3),
    bar_bg: hex(0xeee8d5),
    bar_text: hex(0x657b83),
    muted: hex(0x93a1a1),
    border: hex(0xd3cbb7),
};

static SOLARIZED_DARK_PALETTE: Palette = Palette {
    background: hex(0x002b36),
    text: hex(0x839496),
    selection_bg: hex(0x268bd2),
    selection_text: hex(0x002b36),
    bar_bg: hex(0x073642),
    bar_text: hex(0x839496),
    muted: hex(0x586e75),
    border: hex(0x586e75),
};

static HIGH_CONTRAST_PALETTE: Palette = Palette {
    background: hex(0x000000),
    text: hex(0xffffff),
    selection_bg: hex(0xffff00),
    selection_text: hex(0x000000),
    bar_bg: hex(0x000000),
    bar_text: hex(0xffffff),
    muted: hex(0x808080),
    border: hex(0xffffff),
};

static MONOKAI_PALETTE: Palette = Palette {
    background: hex(0x272822),
    text: hex(0xf8f8f2),
    selection_bg: hex(0x49483e),
    selection_text: hex(0xf8f8f2),
    bar_bg: hex(0x3e3d32),
    bar_text: hex(0xf8f8f2),
    muted: hex(0x75715e),
    border: hex(0x75715e),
};

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_names_round_trip() {
        for theme in ThemeId::all() {
            assert_eq!(ThemeId::from_name(theme.name()), *theme);
        }
        assert_eq!(ThemeId::from_name("solarized dark"), ThemeId::SolarizedDark);
        assert_eq!(ThemeId::from_name("Neon"), ThemeId::Default);
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(ThemeId::Default.next(), ThemeId::Dark);
        assert_eq!(ThemeId::Monokai.next(), ThemeId::Default);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(hex(0x3399ff), Color::Rgb(0x33, 0x99, 0xff));
        assert_eq!(ThemeId::Monokai.palette().background, Color::Rgb(0x27, 0x28, 0x22));
    }

    #[test]
    #[serial]
    fn test_current_theme_is_process_wide() {
        set_theme(ThemeId::HighContrast);
        assert_eq!(current_theme_id(), ThemeId::HighContrast);
        assert_eq!(current_theme().text, hex(0xffffff));
        set_theme(ThemeId::Default);
        assert_eq!(current_theme_id(), ThemeId::Default);
    }
}
