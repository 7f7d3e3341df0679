use ratatui::style::{Color, Modifier, Style};

use locus_core::{ReportStatus, Trend};

/// Color theme for the TUI.
pub struct Theme {
    pub name: &'static str,

    pub trend_up: Color,
    pub trend_down: Color,
    pub favorite: Color,
    pub selected: Color,
    pub report_available: Color,
    pub report_pending: Color,
    pub danger: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            name: "hacker",

            trend_up: Color::Rgb(0, 210, 0),
            trend_down: Color::Red,
            favorite: Color::Yellow,
            selected: Color::Cyan,
            report_available: Color::Rgb(0, 210, 0),
            report_pending: Color::Yellow,
            danger: Color::Red,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            active: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, electric blue accents, dark blue header.
    pub fn modern() -> Self {
        Self {
            name: "modern",

            trend_up: Color::Rgb(0, 200, 80),
            trend_down: Color::Rgb(255, 80, 80),
            favorite: Color::Rgb(255, 200, 0),
            selected: Color::Rgb(60, 140, 255),
            report_available: Color::Rgb(0, 200, 80),
            report_pending: Color::Rgb(255, 200, 0),
            danger: Color::Rgb(255, 80, 80),

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            active: Color::Rgb(60, 140, 255),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Look a theme up by name, falling back to `hacker`.
    pub fn by_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    /// The theme that follows this one when cycling.
    pub fn next(&self) -> Self {
        match self.name {
            "hacker" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn trend_color(&self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.trend_up,
            Trend::Down => self.trend_down,
        }
    }

    pub fn report_style(&self, status: ReportStatus) -> Style {
        match status {
            ReportStatus::Available => Style::default()
                .fg(self.report_available)
                .add_modifier(Modifier::BOLD),
            ReportStatus::Pending => Style::default()
                .fg(self.report_pending)
                .add_modifier(Modifier::ITALIC),
            ReportStatus::None => Style::default().fg(self.dim),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
