//! Classification labels and their color tokens.

/// Label published for levels of 100 dBA and above
pub const EXTREME_DANGER: &str = "EXTREME DANGER";
/// Label published for levels of 85 dBA and above
pub const HIGH_RISK: &str = "High Risk (Loud)";
/// Label published for levels of 60 dBA and above
pub const MODERATE: &str = "Moderate Noise";
/// Label published below 60 dBA
pub const QUIET: &str = "Quiet / Low";

/// Known severity classes.
///
/// The raw classification string stays the display text; this enum is only
/// the color key, so unknown labels still render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    ExtremeDanger,
    HighRisk,
    Moderate,
    Quiet,
    Unrecognized,
}

/// Accent color properties looked up at paint time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentToken {
    Blue,
    Red,
    Yellow,
    Green,
}

/// Emphasis effect applied to the numeric readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlowToken {
    /// Alarm effect
    Red,
    /// Default effect
    Blue,
}

impl Severity {
    /// Resolve a classification label; matching is exact
    pub fn from_label(label: &str) -> Self {
        match label {
            EXTREME_DANGER => Severity::ExtremeDanger,
            HIGH_RISK => Severity::HighRisk,
            MODERATE => Severity::Moderate,
            QUIET => Severity::Quiet,
            _ => Severity::Unrecognized,
        }
    }

    /// Classify a level with the metering source's thresholds
    pub fn classify(db: f64) -> Self {
        if db >= 100.0 {
            Severity::ExtremeDanger
        } else if db >= 85.0 {
            Severity::HighRisk
        } else if db >= 60.0 {
            Severity::Moderate
        } else {
            Severity::Quiet
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Severity::ExtremeDanger => Some(EXTREME_DANGER),
            Severity::HighRisk => Some(HIGH_RISK),
            Severity::Moderate => Some(MODERATE),
            Severity::Quiet => Some(QUIET),
            Severity::Unrecognized => None,
        }
    }

    pub fn accent(&self) -> AccentToken {
        match self {
            Severity::ExtremeDanger => AccentToken::Red,
            Severity::HighRisk => AccentToken::Yellow,
            Severity::Moderate => AccentToken::Green,
            Severity::Quiet | Severity::Unrecognized => AccentToken::Blue,
        }
    }

    pub fn glow(&self) -> GlowToken {
        match self {
            Severity::ExtremeDanger => GlowToken::Red,
            _ => GlowToken::Blue,
        }
    }
}

impl AccentToken {
    pub fn property(&self) -> &'static str {
        match self {
            AccentToken::Blue => "--accent-blue",
            AccentToken::Red => "--accent-red",
            AccentToken::Yellow => "--accent-yellow",
            AccentToken::Green => "--accent-green",
        }
    }
}

impl GlowToken {
    pub fn property(&self) -> &'static str {
        match self {
            GlowToken::Red => "--glow-red",
            GlowToken::Blue => "--glow-blue",
        }
    }
}
