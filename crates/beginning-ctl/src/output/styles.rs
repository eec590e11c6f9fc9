//! Palette for terminal output and clap help.

use anstyle::{AnsiColor, Color, Effects, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub(crate) const SUCCESS: Style = fg(AnsiColor::Green);

/// Errors, including failed hooks.
pub(crate) const ERROR: Style = fg(AnsiColor::Red);

/// Warnings and dry-run notices.
pub(crate) const WARNING: Style = fg(AnsiColor::Yellow);

pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

/// Label names in "Label: value" pairs.
pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

/// Destination paths and other secondary information.
pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

/// Follow-up hints after an error.
pub(crate) const HINT: Style = Style::new().effects(Effects::ITALIC);

/// Clap help styling in the same palette as the rest of the output.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let title = fg(AnsiColor::Green).effects(Effects::BOLD);
    clap::builder::Styles::styled()
        .header(title)
        .usage(title)
        .literal(fg(AnsiColor::Cyan))
        .placeholder(fg(AnsiColor::Cyan))
        .error(fg(AnsiColor::Red).effects(Effects::BOLD))
        .valid(fg(AnsiColor::Green))
        .invalid(fg(AnsiColor::Yellow))
}
