pub mod controller;
pub mod markup;
pub mod view;

pub use controller::{ Outgoing, WidgetController };
pub use view::{ view, ItemView, WidgetView };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    /// Open with no conversation turns yet (the menu may be showing).
    OpenEmpty,
    OpenActive,
}

/// Side effects the controller asks its host to perform on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FocusInput,
    ScrollToBottom,
    /// Load the scheduling script if the page has not yet, then initialize
    /// an inline scheduler at `mount_id`.
    MountScheduler {
        url: String,
        mount_id: String,
    },
}
