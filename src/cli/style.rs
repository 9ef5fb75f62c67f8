//! Terminal styling
//!
//! Output is tagged with a [`Role`] (cyan accent, green success, red error,
//! yellow warning, dim, bold). `owo-colors` decides per stream whether the
//! color is emitted, honoring `NO_COLOR` and TTY detection.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// What a piece of output means to the user
///
/// A role fixes the color and the stream whose color support decides
/// whether that color is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Accent,
    Success,
    Error,
    Warn,
    Muted,
    Emphasis,
}

impl Role {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    const fn stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// Tag `value` with this role
    pub const fn paint<T>(self, value: T) -> Painted<T> {
        Painted {
            value,
            role: self,
            stream: self.stream(),
        }
    }
}

/// A value tagged with a [`Role`]
#[derive(Clone, Debug)]
pub struct Painted<T> {
    value: T,
    role: Role,
    stream: Stream,
}

impl<T> Painted<T> {
    /// Decide color support from stderr, for text printed there
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.role.style();
        Display::fmt(
            &self.value.if_supports_color(self.stream, |v| v.style(style)),
            f,
        )
    }
}

/// Role shorthands for anything printable
pub trait Stylize: Display {
    /// Task names, paths and URLs
    fn accent(&self) -> Painted<&Self> {
        Role::Accent.paint(self)
    }

    /// Completed steps
    fn success(&self) -> Painted<&Self> {
        Role::Success.paint(self)
    }

    /// Failures
    fn error(&self) -> Painted<&Self> {
        Role::Error.paint(self)
    }

    /// Absorbed conditions
    fn warn(&self) -> Painted<&Self> {
        Role::Warn.paint(self)
    }

    fn muted(&self) -> Painted<&Self> {
        Role::Muted.paint(self)
    }

    fn emphasis(&self) -> Painted<&Self> {
        Role::Emphasis.paint(self)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Checkmark for finished steps
pub const fn check() -> Painted<&'static str> {
    Role::Success.paint("✓")
}

const fn to_hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// Clickable OSC 8 link showing the URL itself, or the plain URL when the
/// terminal cannot render links
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    if supports_hyperlinks::on(to_hyperlink_stream(stream)) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner used while waiting on GitLab
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
