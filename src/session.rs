use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::AskResponse;

const ID_SUFFIX_LEN: usize = 9;

/// Client-side identity of one chat session plus the backend's opaque
/// dialogue state, echoed back verbatim on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSession {
    id: String,
    server_state: Option<JsonValue>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::with_id(generate_conversation_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), server_state: None }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn server_state(&self) -> Option<&JsonValue> {
        self.server_state.as_ref()
    }

    /// Keeps the previous state when the response carries none. Empty
    /// values (`null`, `false`, `0`, `""`) count as none; the backend relies
    /// on the client to hold the last real state.
    pub fn absorb(&mut self, response: &AskResponse) {
        match &response.conversation_state {
            Some(state) if is_present(state) => {
                self.server_state = Some(state.clone());
            }
            _ => {}
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

fn is_present(state: &JsonValue) -> bool {
    match state {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// `conv_<unix millis>_<9 lowercase alphanumerics>`
pub fn generate_conversation_id() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(ID_SUFFIX_LEN).collect();
    format!("conv_{}_{}", Utc::now().timestamp_millis(), suffix)
}
