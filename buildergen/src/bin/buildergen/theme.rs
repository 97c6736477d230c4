use colored::Color;
use once_cell::sync::Lazy;

/// Kind of status line printed by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    /// Verbose detail and help-example bullets.
    Detail,
    Progress,
}

impl Tone {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
            Self::Detail => "→",
            Self::Progress => "⟳",
        }
    }

    pub fn color(self) -> Color {
        let theme = &*THEME;
        match self {
            Self::Success => theme.success,
            Self::Error => theme.error,
            Self::Warning => theme.warning,
            Self::Info => theme.info,
            Self::Detail => theme.muted,
            Self::Progress => theme.heading,
        }
    }
}

/// Colors shared by status lines, help output and tables.
pub struct ColorTheme {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub muted: Color,
    /// Section headings in help and listings.
    pub heading: Color,
    /// Example group titles and the usage line.
    pub title: Color,
    /// Command lines and literals in help.
    pub command: Color,
    pub key: Color,
    pub value: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            muted: Color::BrightBlack,
            heading: Color::Cyan,
            title: Color::BrightBlue,
            command: Color::Magenta,
            key: Color::BrightCyan,
            value: Color::White,
        }
    }
}

pub static THEME: Lazy<ColorTheme> = Lazy::new(ColorTheme::default);

/// Shown next to generated file paths.
pub const FILE_ICON: &str = "📄";
