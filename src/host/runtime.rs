use futures::future::BoxFuture;
use log::{ debug, error, info };
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::Page;
use crate::models::{ AskResponse, QuickAction };
use crate::render::Renderer;
use crate::transport::{ ChatTransport, TransportError };
use crate::widget::{ view, Effect, Outgoing, WidgetController };

pub const AUTO_OPEN_DELAY: Duration = Duration::from_secs(2);

/// Everything a user can do to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Toggle,
    Close,
    /// The input field's value changed.
    Input(String),
    /// Send button or Enter.
    Submit,
    QuickAction(QuickAction),
    /// The event source ran dry. The runtime stops once no request is in
    /// flight, so the last reply is still shown.
    EndOfInput,
    Teardown,
}

type Completion = (u64, Result<AskResponse, TransportError>);

/// Binds a controller to a transport, a renderer and the page. Events come in
/// over a channel; at most one request is in flight at a time.
pub struct WidgetRuntime<R: Renderer> {
    controller: WidgetController,
    transport: Arc<dyn ChatTransport>,
    renderer: R,
    page: Page,
    paced: bool,
}

impl<R: Renderer> WidgetRuntime<R> {
    pub fn new(controller: WidgetController, transport: Arc<dyn ChatTransport>, renderer: R) -> Self {
        let mut page = Page::new();
        page.inject_stylesheet();
        Self { controller, transport, renderer, page, paced: false }
    }

    /// Leaves events queued in the channel while a request is in flight
    /// instead of offering them to the controller, which would ignore a
    /// second submission. For scripted input such as piped stdin. A
    /// `Teardown` queued behind a pending request waits for it too.
    pub fn with_paced_input(mut self) -> Self {
        self.paced = true;
        self
    }

    pub fn controller(&self) -> &WidgetController {
        &self.controller
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Runs until `Teardown` arrives or every sender is dropped. A request
    /// still in flight at that point is dropped with its future. After
    /// `EndOfInput` no further events are read and the loop ends as soon as
    /// nothing is in flight.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>) -> std::io::Result<()> {
        self.draw()?;

        let auto_open = tokio::time::sleep(AUTO_OPEN_DELAY);
        tokio::pin!(auto_open);
        let mut auto_open_armed = self.controller.config().auto_open;

        let mut in_flight: Option<BoxFuture<'static, Completion>> = None;
        let mut draining = false;

        loop {
            tokio::select! {
                () = &mut auto_open, if auto_open_armed => {
                    auto_open_armed = false;
                    if !self.controller.is_open() {
                        info!("Auto-opening chat panel");
                        let effects = self.controller.open();
                        self.apply(&effects);
                        self.draw()?;
                    }
                }
                (ticket, result) = poll_in_flight(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    let effects = self.controller.complete(ticket, result);
                    self.apply(&effects);
                    self.draw()?;
                    if draining {
                        break;
                    }
                }
                event = events.recv(), if !draining && !(self.paced && in_flight.is_some()) => {
                    let event = match event {
                        None | Some(UiEvent::Teardown) => break,
                        Some(UiEvent::EndOfInput) => {
                            if in_flight.is_none() {
                                break;
                            }
                            debug!("Input exhausted, waiting for the pending reply");
                            draining = true;
                            continue;
                        }
                        Some(event) => event,
                    };
                    if let Some(outgoing) = self.handle(event) {
                        in_flight = Some(self.send(outgoing));
                    }
                    self.draw()?;
                }
            }
        }

        if in_flight.take().is_some() {
            debug!("Dropping in-flight request on teardown");
        }
        self.controller.teardown();
        info!("Chat widget torn down (conversation {})", self.controller.session().id());
        Ok(())
    }

    fn handle(&mut self, event: UiEvent) -> Option<Outgoing> {
        debug!("UI event: {:?}", event);
        match event {
            UiEvent::Toggle => {
                let effects = self.controller.toggle();
                self.apply(&effects);
                None
            }
            UiEvent::Close => {
                self.controller.close();
                None
            }
            UiEvent::Input(text) => {
                self.controller.set_draft(text);
                None
            }
            UiEvent::Submit => self.controller.submit(),
            UiEvent::QuickAction(action) => self.controller.select_action(action),
            UiEvent::EndOfInput | UiEvent::Teardown => None,
        }
    }

    fn send(&self, outgoing: Outgoing) -> BoxFuture<'static, Completion> {
        let transport = Arc::clone(&self.transport);
        let Outgoing { ticket, request } = outgoing;
        Box::pin(async move {
            let result = transport.ask(&request).await;
            (ticket, result)
        })
    }

    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.page.apply(effect);
        }
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let current = view(&self.controller);
        self.renderer.render(&current, &self.page).map_err(|e| {
            error!("Render failed: {}", e);
            e
        })
    }
}

async fn poll_in_flight(slot: &mut Option<BoxFuture<'static, Completion>>) -> Completion {
    match slot.as_mut() {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}
