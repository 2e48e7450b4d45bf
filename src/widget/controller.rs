use log::{ debug, error, info, warn };
use std::sync::Arc;

use super::{ Effect, Phase };
use crate::config::WidgetConfig;
use crate::models::{ AskRequest, AskResponse, Entry, Message, QuickAction };
use crate::session::ConversationSession;
use crate::transport::TransportError;

pub const CONNECTION_TROUBLE_MESSAGE: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";
pub const EMPTY_ANSWER_MESSAGE: &str = "Sorry, I couldn't process your request.";
pub const SCHEDULING_FALLBACK_MESSAGE: &str =
    "I'd be happy to help you schedule an appointment! Please call us at (555) 123-POWER to book your service.";

/// A request the controller wants sent. The `ticket` must be handed back to
/// [`WidgetController::complete`] with the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub ticket: u64,
    pub request: AskRequest,
}

/// The widget state machine. Holds no I/O: callers feed it UI events and
/// transport results, and it hands back requests to send and effects to
/// apply to the page.
#[derive(Debug)]
pub struct WidgetController {
    config: Arc<WidgetConfig>,
    session: ConversationSession,
    open: bool,
    entries: Vec<Entry>,
    draft: String,
    pending: Option<u64>,
    next_ticket: u64,
    scheduler_mounts: usize,
    torn_down: bool,
}

impl WidgetController {
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_session(config, ConversationSession::new())
    }

    pub fn with_session(config: WidgetConfig, session: ConversationSession) -> Self {
        info!("Chat widget ready (conversation {})", session.id());
        Self {
            config: Arc::new(config),
            session,
            open: false,
            entries: Vec::new(),
            draft: String::new(),
            pending: None,
            next_ticket: 1,
            scheduler_mounts: 0,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(Entry::as_message)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn send_enabled(&self) -> bool {
        self.pending.is_none()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> Phase {
        if !self.open {
            Phase::Closed
        } else if self.messages().next().is_none() {
            Phase::OpenEmpty
        } else {
            Phase::OpenActive
        }
    }

    pub fn toggle(&mut self) -> Vec<Effect> {
        if self.open {
            self.close();
            Vec::new()
        } else {
            self.open()
        }
    }

    /// Opening an empty log seeds it with the quick-action menu. Opening an
    /// already open panel does nothing.
    pub fn open(&mut self) -> Vec<Effect> {
        if self.torn_down || self.open {
            return Vec::new();
        }
        self.open = true;
        let mut effects = Vec::new();
        if self.entries.is_empty() {
            debug!("First open, presenting quick-action menu");
            self.entries.push(Entry::QuickMenu);
            effects.push(Effect::ScrollToBottom);
        }
        effects.push(Effect::FocusInput);
        effects
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Sends the current draft, as pressing Enter or the send button does.
    /// The draft is only cleared when a request is actually issued.
    pub fn submit(&mut self) -> Option<Outgoing> {
        let question = self.draft.trim().to_string();
        if question.is_empty() || !self.can_send() {
            return None;
        }
        self.draft.clear();
        Some(self.begin_turn(question.clone(), question))
    }

    pub fn submit_text(&mut self, text: &str) -> Option<Outgoing> {
        self.set_draft(text);
        self.submit()
    }

    /// Menu buttons go through the same path as typed text; the label is
    /// logged and the token is sent.
    pub fn select_action(&mut self, action: QuickAction) -> Option<Outgoing> {
        if !self.can_send() {
            return None;
        }
        Some(self.begin_turn(action.label().to_string(), action.token().to_string()))
    }

    /// Applies the outcome of a request. Results for a ticket that is not
    /// the one in flight, or that arrive after teardown, are dropped.
    pub fn complete(
        &mut self,
        ticket: u64,
        result: Result<AskResponse, TransportError>
    ) -> Vec<Effect> {
        if self.torn_down {
            debug!("Dropping response for ticket {} after teardown", ticket);
            return Vec::new();
        }
        if self.pending != Some(ticket) {
            warn!("Dropping response for unexpected ticket {}", ticket);
            return Vec::new();
        }
        self.pending = None;

        let mut effects = Vec::new();
        match result {
            Ok(response) => {
                let answer = response.answer
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .unwrap_or(EMPTY_ANSWER_MESSAGE);
                self.entries.push(Entry::Message(Message::bot(answer)));
                self.session.absorb(&response);

                if response.wants_scheduler() {
                    effects.extend(self.present_scheduler());
                }
            }
            Err(e) => {
                error!("Chat request failed (conversation {}): {}", self.session.id(), e);
                self.entries.push(Entry::Message(Message::bot(CONNECTION_TROUBLE_MESSAGE)));
            }
        }
        effects.push(Effect::ScrollToBottom);
        effects
    }

    /// After teardown the controller accepts no events and ignores late
    /// responses.
    pub fn teardown(&mut self) {
        if let Some(ticket) = self.pending.take() {
            info!("Widget torn down with request {} still in flight", ticket);
        }
        self.torn_down = true;
        self.open = false;
    }

    fn can_send(&self) -> bool {
        if self.torn_down {
            return false;
        }
        if !self.open {
            debug!("Ignoring submission while the panel is closed");
            return false;
        }
        if self.pending.is_some() {
            debug!("Ignoring submission while a request is in flight");
            return false;
        }
        true
    }

    fn begin_turn(&mut self, logged: String, question: String) -> Outgoing {
        self.entries.push(Entry::Message(Message::user(logged)));
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);
        debug!("Turn {} for conversation {}", ticket, self.session.id());
        Outgoing {
            ticket,
            request: AskRequest {
                question,
                conversation_id: self.session.id().to_string(),
                conversation_state: self.session.server_state().cloned(),
            },
        }
    }

    fn present_scheduler(&mut self) -> Vec<Effect> {
        match self.config.calendly_url.clone() {
            Some(url) => {
                self.scheduler_mounts += 1;
                let mount_id = format!("chatbot-scheduler-{}", self.scheduler_mounts);
                self.entries.push(Entry::SchedulingEmbed {
                    url: url.clone(),
                    mount_id: mount_id.clone(),
                });
                vec![Effect::MountScheduler { url, mount_id }]
            }
            None => {
                self.entries.push(Entry::Message(Message::bot(SCHEDULING_FALLBACK_MESSAGE)));
                Vec::new()
            }
        }
    }
}
