use serde::{ Serialize, Deserialize };
use serde_json::Value as JsonValue;

/// Body of the single POST the widget sends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
    pub conversation_id: String,
    /// Always serialized, `null` before the backend has sent any state.
    pub conversation_state: Option<JsonValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_state: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    #[serde(rename = "show_calendly")]
    ShowScheduler,
    /// Directives this client does not know are accepted and ignored.
    #[serde(other)]
    Unknown,
}

impl AskResponse {
    pub fn wants_scheduler(&self) -> bool {
        matches!(self.next_step, Some(NextStep::ShowScheduler))
    }
}
