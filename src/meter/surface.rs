//! The display contract the renderer writes to.

use crate::meter::graph::{CanvasSize, GraphFrame};
use crate::meter::reading::Reading;
use crate::meter::scale;
use crate::meter::severity::{AccentToken, GlowToken, Severity};

/// Display state derived from a single reading
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    /// Current level as shown in the big readout
    pub current_value: String,
    pub status_text: String,
    pub category_text: String,
    /// Peak level as shown in the peak label
    pub peak_value: String,
    /// Level bar fill in percent, `[0, 100]`
    pub fill_percent: f64,
    /// Dial rotation in degrees, `[0, 360]`
    pub gauge_rotation: f64,
    /// Applied to the level bar and the readout text
    pub accent: AccentToken,
    pub glow: GlowToken,
}

impl PanelState {
    /// Pure mapping from a reading to what the panel shows
    pub fn from_reading(reading: &Reading) -> Self {
        let severity = Severity::from_label(&reading.classification);
        let fill_percent = scale::percentage(reading.db);

        Self {
            current_value: reading.db.to_string(),
            status_text: format!("Status: {}", reading.classification),
            category_text: format!("Category: {}", reading.classification),
            peak_value: reading.max_db.to_string(),
            fill_percent,
            gauge_rotation: scale::gauge_rotation(fill_percent),
            accent: severity.accent(),
            glow: severity.glow(),
        }
    }
}

/// A place the meter can be shown on.
///
/// `canvas_size` is sampled on every graph draw, so implementations report
/// their current layout rather than a cached value.
#[cfg_attr(test, mockall::automock)]
pub trait MeterSurface {
    fn canvas_size(&self) -> CanvasSize;

    fn show_panel(&mut self, panel: &PanelState);

    fn paint_graph(&mut self, graph: &GraphFrame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderate_reading_panel() {
        let panel = PanelState::from_reading(&Reading::new(45.0, 80.0, "Moderate Noise"));
        assert_eq!(panel.current_value, "45");
        assert_eq!(panel.peak_value, "80");
        assert_eq!(panel.status_text, "Status: Moderate Noise");
        assert_eq!(panel.category_text, "Category: Moderate Noise");
        assert_eq!(panel.fill_percent, 37.5);
        assert_eq!(panel.gauge_rotation, 135.0);
        assert_eq!(panel.accent, AccentToken::Green);
        assert_eq!(panel.glow, GlowToken::Blue);
    }

    #[test]
    fn test_raw_values_are_displayed_unclamped() {
        let panel = PanelState::from_reading(&Reading::new(130.5, 131.0, "EXTREME DANGER"));
        assert_eq!(panel.current_value, "130.5");
        assert_eq!(panel.peak_value, "131");
        assert_eq!(panel.fill_percent, 100.0);
        assert_eq!(panel.gauge_rotation, 360.0);
        assert_eq!(panel.accent, AccentToken::Red);
        assert_eq!(panel.glow, GlowToken::Red);
    }

    #[test]
    fn test_same_classification_same_colors() {
        let a = PanelState::from_reading(&Reading::new(10.0, 10.0, "High Risk (Loud)"));
        let b = PanelState::from_reading(&Reading::new(99.0, 99.0, "High Risk (Loud)"));
        assert_eq!((a.accent, a.glow), (b.accent, b.glow));
    }
}
