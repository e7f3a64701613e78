//! Resolution of accent and glow tokens to terminal colors.

use crate::config::ThemeConfig;
use crate::error::ConfigError;
use crate::meter::{AccentToken, GlowToken};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Colors looked up at paint time
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    accent_blue: Color,
    accent_red: Color,
    accent_yellow: Color,
    accent_green: Color,
    glow_red: Color,
    glow_blue: Color,
    pub reference_line: Color,
    pub fill_tint: Color,
}

impl Palette {
    pub fn from_theme(theme: &ThemeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            accent_blue: parse_color(AccentToken::Blue.property(), &theme.accent_blue)?,
            accent_red: parse_color(AccentToken::Red.property(), &theme.accent_red)?,
            accent_yellow: parse_color(AccentToken::Yellow.property(), &theme.accent_yellow)?,
            accent_green: parse_color(AccentToken::Green.property(), &theme.accent_green)?,
            glow_red: parse_color(GlowToken::Red.property(), &theme.glow_red)?,
            glow_blue: parse_color(GlowToken::Blue.property(), &theme.glow_blue)?,
            reference_line: parse_color("reference-line", &theme.reference_line)?,
            fill_tint: parse_color("fill-tint", &theme.fill_tint)?,
        })
    }

    pub fn accent(&self, token: AccentToken) -> Color {
        match token {
            AccentToken::Blue => self.accent_blue,
            AccentToken::Red => self.accent_red,
            AccentToken::Yellow => self.accent_yellow,
            AccentToken::Green => self.accent_green,
        }
    }

    pub fn glow_color(&self, token: GlowToken) -> Color {
        match token {
            GlowToken::Red => self.glow_red,
            GlowToken::Blue => self.glow_blue,
        }
    }

    /// Text emphasis for the readout; the alarm glow blinks
    pub fn glow_modifier(&self, token: GlowToken) -> Modifier {
        match token {
            GlowToken::Red => Modifier::BOLD | Modifier::SLOW_BLINK,
            GlowToken::Blue => Modifier::BOLD,
        }
    }

    /// Readout style: accent text with the glow emphasis
    pub fn readout_style(&self, accent: AccentToken, glow: GlowToken) -> Style {
        Style::default()
            .fg(self.accent(accent))
            .add_modifier(self.glow_modifier(glow))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent_blue: Color::Cyan,
            accent_red: Color::Red,
            accent_yellow: Color::Yellow,
            accent_green: Color::Green,
            glow_red: Color::LightRed,
            glow_blue: Color::LightBlue,
            reference_line: Color::DarkGray,
            fill_tint: Color::Rgb(10, 58, 66),
        }
    }
}

/// `property` may carry the `--` prefix of the token name
fn parse_color(property: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
        field: format!("theme.{}", property.trim_start_matches("--")),
        message: format!("`{}` is not a color", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_parses() {
        let palette = Palette::from_theme(&ThemeConfig::default()).unwrap();
        assert_eq!(palette.reference_line, Color::Rgb(0x2a, 0x47, 0x68));
        assert_eq!(palette.accent(AccentToken::Blue), Color::Rgb(0x00, 0xbc, 0xd4));
    }

    #[test]
    fn test_named_colors_and_errors() {
        let mut theme = ThemeConfig::default();
        theme.accent_green = "green".to_string();
        let palette = Palette::from_theme(&theme).unwrap();
        assert_eq!(palette.accent(AccentToken::Green), Color::Green);

        theme.glow_red = "not-a-color".to_string();
        let err = Palette::from_theme(&theme).unwrap_err();
        assert!(err.to_string().contains("theme.glow-red"));
    }

    #[test]
    fn test_alarm_glow_blinks() {
        let palette = Palette::default();
        assert!(palette.glow_modifier(GlowToken::Red).contains(Modifier::SLOW_BLINK));
        assert!(!palette.glow_modifier(GlowToken::Blue).contains(Modifier::SLOW_BLINK));
    }
}
