//! Series colours and their ANSI escape sequences.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour digit in `{0}`")]
    InvalidHexDigit(String),
    #[error("hex colour must be exactly 6 digits, got `{0}`")]
    InvalidHexLength(String),
}

// --- Color ---
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
    /// True-colour `#d2870a`.
    Orange,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Every named colour, in the order `colors` lists them.
    pub const NAMED: [(&'static str, Self); 9] = [
        ("black", Self::Black),
        ("red", Self::Red),
        ("green", Self::Green),
        ("yellow", Self::Yellow),
        ("blue", Self::Blue),
        ("magenta", Self::Magenta),
        ("cyan", Self::Cyan),
        ("white", Self::White),
        ("orange", Self::Orange),
    ];

    /// Parse colour names or `#rrggbb`.  Falls back to hex parser on miss.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        let name = s.trim().to_ascii_lowercase();
        if name == "industrial" {
            return Ok(Self::Orange);
        }
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map_or_else(|| Self::from_hex(s.trim()), |(_, c)| Ok(*c))
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength(hex.to_owned()));
        }
        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit(hex.to_owned()))
        };
        Ok(Self::Rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    /// SGR parameters shared by the foreground and background forms.
    fn sgr(self, base: u8) -> String {
        match self {
            Self::Black => format!("{base}0"),
            Self::Red => format!("{base}1"),
            Self::Green => format!("{base}2"),
            Self::Yellow => format!("{base}3"),
            Self::Blue => format!("{base}4"),
            Self::Magenta => format!("{base}5"),
            Self::Cyan => format!("{base}6"),
            Self::White => format!("{base}7"),
            Self::Orange => format!("{base}8;2;210;135;10"),
            Self::Rgb(r, g, b) => format!("{base}8;2;{r};{g};{b}"),
        }
    }

    /// Foreground escape, e.g. `ESC[31m`.
    #[must_use]
    pub fn fg_escape(self) -> String {
        format!("\x1b[{}m", self.sgr(3))
    }

    /// Background escape, e.g. `ESC[41m`.
    #[must_use]
    pub fn bg_escape(self) -> String {
        format!("\x1b[{}m", self.sgr(4))
    }
}

pub const RESET: &str = "\x1b[0m";

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            named => {
                let name = Self::NAMED
                    .iter()
                    .find(|(_, c)| c == named)
                    .map_or("white", |(n, _)| n);
                f.write_str(name)
            }
        }
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: Color, text: &str) -> String {
    format!("{}{text}{RESET}", c.fg_escape())
}
