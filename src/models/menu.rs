use std::fmt;
use std::str::FromStr;

pub const MENU_HEADING: &str = "How can I help you today?";

/// A button in the quick-action menu. Pressing it sends `token()` as the
/// question instead of free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    Emergency,
    Estimate,
    Schedule,
    Question,
    Technician,
}

impl QuickAction {
    pub const ALL: [QuickAction; 5] = [
        QuickAction::Emergency,
        QuickAction::Estimate,
        QuickAction::Schedule,
        QuickAction::Question,
        QuickAction::Technician,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            QuickAction::Emergency => "EMERGENCY_BUTTON",
            QuickAction::Estimate => "ESTIMATE_BUTTON",
            QuickAction::Schedule => "SCHEDULE_BUTTON",
            QuickAction::Question => "QUESTION_BUTTON",
            QuickAction::Technician => "TECHNICIAN_BUTTON",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Emergency => "🚨 Emergency",
            QuickAction::Estimate => "💰 Need Estimate",
            QuickAction::Schedule => "📅 Schedule",
            QuickAction::Question => "❓ Question",
            QuickAction::Technician => "👨‍🔧 Chat with Technician",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            QuickAction::Emergency => "emergency-btn",
            QuickAction::Estimate => "estimate-btn",
            QuickAction::Schedule => "schedule-btn",
            QuickAction::Question => "question-btn",
            QuickAction::Technician => "technician-btn",
        }
    }

    /// The handoff button sits alone on the last row of the two-column grid.
    pub fn spans_full_row(&self) -> bool {
        matches!(self, QuickAction::Technician)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseQuickActionError {
    message: String,
}

impl fmt::Display for ParseQuickActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseQuickActionError {}

impl FromStr for QuickAction {
    type Err = ParseQuickActionError;

    /// Accepts the wire token or a short name (`emergency`, `estimate`, ...),
    /// or a 1-based menu position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(action) = QuickAction::ALL.iter().find(|a| a.token() == trimmed) {
            return Ok(*action);
        }
        match trimmed.to_lowercase().as_str() {
            "1" | "emergency" => Ok(QuickAction::Emergency),
            "2" | "estimate" => Ok(QuickAction::Estimate),
            "3" | "schedule" => Ok(QuickAction::Schedule),
            "4" | "question" => Ok(QuickAction::Question),
            "5" | "technician" => Ok(QuickAction::Technician),
            _ =>
                Err(ParseQuickActionError {
                    message: format!("Invalid quick action: '{}'", s),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_wire_contract() {
        let tokens: Vec<_> = QuickAction::ALL.iter().map(|a| a.token()).collect();
        assert_eq!(
            tokens,
            vec![
                "EMERGENCY_BUTTON",
                "ESTIMATE_BUTTON",
                "SCHEDULE_BUTTON",
                "QUESTION_BUTTON",
                "TECHNICIAN_BUTTON"
            ]
        );
    }

    #[test]
    fn parses_tokens_names_and_positions() {
        assert_eq!("SCHEDULE_BUTTON".parse::<QuickAction>(), Ok(QuickAction::Schedule));
        assert_eq!("Technician".parse::<QuickAction>(), Ok(QuickAction::Technician));
        assert_eq!("1".parse::<QuickAction>(), Ok(QuickAction::Emergency));
        assert!("OTHER_BUTTON".parse::<QuickAction>().is_err());
    }
}
