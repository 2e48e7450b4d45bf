use super::controller::WidgetController;
use super::markup::format_message;
use crate::config::{ Position, Theme };
use crate::models::menu::MENU_HEADING;
use crate::models::{ Entry, QuickAction, Role };

pub const TOGGLE_GLYPH: &str = "💬";
pub const SCHEDULER_TITLE: &str = "Schedule Your Appointment";

/// Everything a renderer needs to draw the widget, computed from controller
/// state alone.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub position: Position,
    pub theme: Theme,
    pub panel_open: bool,
    pub title: String,
    pub greeting: String,
    pub items: Vec<ItemView>,
    pub input: InputView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    pub placeholder: String,
    pub value: String,
    pub send_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemView {
    Bubble {
        role: Role,
        /// Already escaped and formatted.
        html: String,
        /// The unformatted text, for plain-text renderers.
        text: String,
    },
    Menu {
        heading: &'static str,
        options: Vec<MenuOptionView>,
    },
    Scheduler {
        title: &'static str,
        url: String,
        mount_id: String,
    },
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuOptionView {
    pub action: QuickAction,
    pub label: &'static str,
    pub class: &'static str,
    pub full_row: bool,
}

pub fn view(controller: &WidgetController) -> WidgetView {
    let config = controller.config();
    let mut items: Vec<ItemView> = controller.entries().iter().map(item_view).collect();
    if controller.is_loading() {
        items.push(ItemView::Loading);
    }

    WidgetView {
        position: config.position,
        theme: config.theme,
        panel_open: controller.is_open(),
        title: config.title.clone(),
        greeting: config.initial_message.clone(),
        items,
        input: InputView {
            placeholder: config.placeholder.clone(),
            value: controller.draft().to_string(),
            send_enabled: controller.send_enabled(),
        },
    }
}

fn item_view(entry: &Entry) -> ItemView {
    match entry {
        Entry::Message(m) =>
            ItemView::Bubble {
                role: m.role,
                html: format_message(&m.text),
                text: m.text.clone(),
            },
        Entry::QuickMenu =>
            ItemView::Menu {
                heading: MENU_HEADING,
                options: QuickAction::ALL.iter()
                    .map(|action| MenuOptionView {
                        action: *action,
                        label: action.label(),
                        class: action.css_class(),
                        full_row: action.spans_full_row(),
                    })
                    .collect(),
            },
        Entry::SchedulingEmbed { url, mount_id } =>
            ItemView::Scheduler {
                title: SCHEDULER_TITLE,
                url: url.clone(),
                mount_id: mount_id.clone(),
            },
    }
}
