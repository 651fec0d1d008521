pub mod colors;

use ratatui::style::Color;

use crate::countdown::Severity;
use crate::model::{Priority, Status};
use colors::{PaperColors, SlateColors};

/// A resolved colour set for the dashboard.  `t` cycles between palettes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub bar_bg: Color,
    pub surface: Color,
    pub border: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_on_bar: Color,
}

impl Theme {
    pub fn slate() -> Self {
        Self {
            name: "Slate",
            bar_bg: SlateColors::NAVY,
            surface: SlateColors::SURFACE,
            border: SlateColors::BORDER,
            accent: SlateColors::BLUE,
            accent_alt: SlateColors::PURPLE,
            success: SlateColors::GREEN,
            warning: SlateColors::AMBER,
            error: SlateColors::RED,
            text_primary: SlateColors::TEXT_PRIMARY,
            text_secondary: SlateColors::TEXT_SECONDARY,
            text_on_bar: SlateColors::TEXT_ON_BAR,
        }
    }

    pub fn paper() -> Self {
        Self {
            name: "Paper",
            bar_bg: PaperColors::NAVY,
            surface: PaperColors::SURFACE,
            border: PaperColors::BORDER,
            accent: PaperColors::BLUE,
            accent_alt: PaperColors::PURPLE,
            success: PaperColors::GREEN,
            warning: PaperColors::AMBER,
            error: PaperColors::RED,
            text_primary: PaperColors::TEXT_PRIMARY,
            text_secondary: PaperColors::TEXT_SECONDARY,
            text_on_bar: PaperColors::TEXT_ON_BAR,
        }
    }

    pub fn next(self) -> Self {
        if self.name == "Slate" {
            Self::paper()
        } else {
            Self::slate()
        }
    }

    /// Bar colour for a tender's negotiation stage.
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Offer => self.accent,
            Status::Round1 | Status::Round2 | Status::Round3 | Status::Round4 => {
                self.text_secondary
            }
            Status::Bafo => self.accent_alt,
            Status::ContractSigned => self.warning,
            Status::Won => self.success,
            Status::Lost => self.error,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.error,
            Priority::Medium => self.warning,
            Priority::Low => self.success,
        }
    }

    /// Countdown panel accent by remaining-time severity.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Critical => self.error,
            Severity::Warning => self.warning,
            Severity::Normal => self.success,
        }
    }
}
