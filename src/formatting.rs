use crate::identifier::Title;
use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub muted: (u8, u8, u8),     // placeholders, counts
    pub header: (u8, u8, u8),    // column headers
    pub timestamp: (u8, u8, u8), // dates
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        muted: (108, 112, 134),     // Gray
        header: (148, 226, 213),    // Teal
        timestamp: (137, 180, 250), // Blue
    };
}

/// Presentation hints applied to cell text after it has been truncated.
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env(plain: bool) -> Self {
        Self::new(!plain && std::env::var("NO_COLOR").is_err())
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.header;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_date(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.timestamp;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    /// `text` is the already-truncated cell; `title` decides the style.
    pub fn format_title(&self, title: &Title, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match title {
            Title::Missing => {
                let (r, g, b) = self.palette.muted;
                Paint::rgb(text, r, g, b).dim().to_string()
            }
            Title::Text(_) => text.to_string(),
        }
    }

    pub fn format_keywords(&self, text: &str) -> String {
        if self.use_color {
            Paint::new(text).italic().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_keyword(&self, keyword: &str) -> String {
        if self.use_color {
            let (r, g, b) = color_for_keyword(keyword);
            Paint::rgb(keyword, r, g, b).italic().to_string()
        } else {
            keyword.to_string()
        }
    }

    pub fn format_muted(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.muted;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Hash a keyword for deterministic color selection
fn hash_keyword(keyword: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in keyword.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

pub fn color_for_keyword(keyword: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (255, 169, 167),
        (148, 226, 213),
        (198, 160, 246),
        (240, 198, 198),
    ];
    PALETTE[(hash_keyword(keyword) as usize) % PALETTE.len()]
}
