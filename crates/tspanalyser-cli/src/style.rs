//! Colouring of tour reports.
//!
//! Text output is coloured unless `--no-color` is passed, `NO_COLOR` is set
//! or `TERM` is `dumb`.

use std::fmt::Display;

const RESET: &str = "\x1b[0m";

/// Part of a tour report that gets its own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Report and section headings.
    Heading,
    /// Algorithm names.
    Algorithm,
    /// Tour costs.
    Cost,
    /// Legs priced by great-circle distance.
    Estimate,
    /// Stop indices and timings.
    Muted,
    /// Algorithms that produced no tour.
    Failure,
}

impl Tint {
    fn ansi(self) -> &'static str {
        match self {
            Tint::Heading => "\x1b[1;97m",
            Tint::Algorithm => "\x1b[36m",
            Tint::Cost => "\x1b[32m",
            Tint::Estimate => "\x1b[38;5;208m",
            Tint::Muted => "\x1b[90m",
            Tint::Failure => "\x1b[31m",
        }
    }
}

/// Whether tour reports carry ANSI colour codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStyle {
    colored: bool,
}

impl TourStyle {
    pub const PLAIN: Self = Self { colored: false };
    pub const COLORED: Self = Self { colored: true };

    /// Style for this process, honouring the `--no-color` flag and the
    /// `NO_COLOR` and `TERM` environment variables.
    #[must_use]
    pub fn from_environment(no_color_flag: bool) -> Self {
        let term = std::env::var("TERM").ok();
        Self::resolve(
            no_color_flag,
            std::env::var_os("NO_COLOR").is_some(),
            term.as_deref(),
        )
    }

    /// Decide from already-read inputs. Any one of them can turn colour off.
    #[must_use]
    pub fn resolve(no_color_flag: bool, no_color_env: bool, term: Option<&str>) -> Self {
        let dumb_terminal = term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        Self {
            colored: !(no_color_flag || no_color_env || dumb_terminal),
        }
    }

    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// `text` wrapped in the colour for `tint`, or unchanged when plain.
    pub fn paint(&self, tint: Tint, text: impl Display) -> String {
        if self.colored {
            format!("{}{text}{RESET}", tint.ansi())
        } else {
            text.to_string()
        }
    }
}
