//! Attribution model selection

use serde::{Deserialize, Serialize};

/// Credit-splitting strategy for a conversion path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    /// 100% of credit to the first touchpoint's content
    FirstTouch,
    /// 100% of credit to the last touchpoint's content
    #[default]
    LastTouch,
    /// Equal split across every touchpoint
    Linear,
    /// U-shaped: 40% first, 40% last, 20% spread over the middle
    PositionBased,
}

impl AttributionModel {
    /// Parse a caller-supplied model name
    ///
    /// Unrecognized names fall back to last-touch rather than erroring;
    /// model names arrive from user-facing API surfaces and a typo should
    /// still produce a report.
    pub fn parse(name: &str) -> Self {
        match name {
            "first_touch" => Self::FirstTouch,
            "last_touch" => Self::LastTouch,
            "linear" => Self::Linear,
            "position_based" => Self::PositionBased,
            other => {
                tracing::debug!(model = other, "Unknown attribution model, using last_touch");
                Self::LastTouch
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTouch => "first_touch",
            Self::LastTouch => "last_touch",
            Self::Linear => "linear",
            Self::PositionBased => "position_based",
        }
    }
}

impl std::fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
