//! Theme for human-mode output.

use console::Style;

/// Visual theme for human-mode output.
///
/// Centralizes styles so every command renders findings the same way.
#[derive(Debug, Clone)]
pub struct CbTheme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    pub muted: Style,
    pub header: Style,
    pub label: Style,
    pub value: Style,
}

impl Default for CbTheme {
    fn default() -> Self {
        Self {
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            info: Style::new().cyan(),
            muted: Style::new().dim(),
            header: Style::new().blue().bold(),
            label: Style::new().dim(),
            value: Style::new().bold(),
        }
    }
}
