// Widget markup and stylesheet.
//
// The stylesheet is a plain string so it can be injected once per page; the
// markup is rebuilt from a `WidgetView` on every render.

use std::fmt::Write as _;
use std::io;

use super::Renderer;
use crate::host::Page;
use crate::widget::markup::escape_html;
use crate::widget::view::{ InputView, ItemView, MenuOptionView, WidgetView, TOGGLE_GLYPH };

pub const STYLESHEET_ID: &str = "chatbot-widget-styles";

pub const WIDGET_CSS: &str =
    r#"
.chatbot-widget{position:fixed;z-index:10000;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif}
.chatbot-widget.bottom-right{bottom:20px;right:20px}
.chatbot-widget.bottom-left{bottom:20px;left:20px}
.chatbot-toggle{width:60px;height:60px;border-radius:50%;background:#007bff;border:none;cursor:pointer;box-shadow:0 4px 12px rgba(0,123,255,.3);transition:all .3s ease;display:flex;align-items:center;justify-content:center;color:#fff;font-size:24px}
.chatbot-toggle:hover{transform:scale(1.1);box-shadow:0 6px 16px rgba(0,123,255,.4)}
.chatbot-panel{position:absolute;bottom:80px;right:0;width:350px;height:500px;background:#fff;border-radius:12px;box-shadow:0 8px 32px rgba(0,0,0,.1);display:none;flex-direction:column;overflow:hidden;border:1px solid #e1e5e9}
.chatbot-widget.bottom-left .chatbot-panel{right:auto;left:0}
.chatbot-panel.open{display:flex}
.chatbot-header{background:#007bff;color:#fff;padding:16px;font-weight:600;display:flex;justify-content:space-between;align-items:center}
.chatbot-greeting{display:block;font-size:12px;font-weight:400;opacity:.85;margin-top:2px}
.chatbot-close{background:none;border:none;color:#fff;font-size:20px;cursor:pointer;padding:0;width:24px;height:24px;display:flex;align-items:center;justify-content:center}
.chatbot-messages{flex:1;padding:16px;overflow-y:auto;background:#f8f9fa}
.chatbot-message{margin-bottom:12px;max-width:80%}
.chatbot-message.user{margin-left:auto}
.chatbot-message.user .message-bubble{background:#007bff;color:#fff;margin-left:auto}
.chatbot-message.bot .message-bubble{background:#fff;color:#333;border:1px solid #e1e5e9}
.message-bubble{padding:12px 16px;border-radius:18px;font-size:14px;line-height:1.4;word-wrap:break-word}
.chatbot-input-area{padding:16px;border-top:1px solid #e1e5e9;background:#fff}
.chatbot-input-container{display:flex;gap:8px}
.chatbot-input{flex:1;padding:12px 16px;border:1px solid #e1e5e9;border-radius:24px;outline:none;font-size:14px}
.chatbot-input:focus{border-color:#007bff}
.chatbot-send{width:40px;height:40px;border-radius:50%;background:#007bff;border:none;color:#fff;cursor:pointer;display:flex;align-items:center;justify-content:center;transition:background .2s ease}
.chatbot-send:hover{background:#0056b3}
.chatbot-send:disabled{background:#ccc;cursor:not-allowed}
.chatbot-loading{display:flex;align-items:center;gap:4px;padding:12px 16px}
.chatbot-loading-dot{width:8px;height:8px;border-radius:50%;background:#007bff;animation:chatbot-loading 1.4s infinite ease-in-out}
.chatbot-loading-dot:nth-child(1){animation-delay:-.32s}
.chatbot-loading-dot:nth-child(2){animation-delay:-.16s}
@keyframes chatbot-loading{0%,80%,100%{transform:scale(0);opacity:.5}40%{transform:scale(1);opacity:1}}
.calendly-widget{background:#f8f9fa!important;border:1px solid #e1e5e9!important;padding:16px!important;max-width:100%!important}
.calendly-widget .calendly-inline-widget{border-radius:8px;overflow:hidden;box-shadow:0 2px 8px rgba(0,0,0,.1)}
.main-menu-grid{display:grid;grid-template-columns:1fr 1fr;gap:8px}
.main-menu-btn{background:#f8f9fa;color:#333;border:1px solid #dee2e6;padding:12px 8px;border-radius:8px;font-size:13px;cursor:pointer;transition:all .2s ease;display:flex;align-items:center;justify-content:center;gap:5px}
.main-menu-btn.full-row{grid-column:1 / -1}
.main-menu-btn:hover{background:#e9ecef;transform:translateY(-1px)}
.emergency-btn:hover{background:#dc3545;color:#fff}
.estimate-btn:hover{background:#28a745;color:#fff}
.schedule-btn:hover{background:#007bff;color:#fff}
.question-btn:hover{background:#17a2b8;color:#fff}
.technician-btn:hover{background:#fd7e14;color:#fff}
.chatbot-widget.theme-dark .chatbot-panel{background:#1e1e1e;border-color:#3c3c3c}
.chatbot-widget.theme-dark .chatbot-messages{background:#252526}
.chatbot-widget.theme-dark .chatbot-message.bot .message-bubble{background:#313131;color:#ddd;border-color:#3c3c3c}
.chatbot-widget.theme-dark .chatbot-input-area{background:#1e1e1e;border-color:#3c3c3c}
.chatbot-widget.theme-dark .chatbot-input{background:#313131;color:#ddd;border-color:#3c3c3c}
@media (max-width:480px){.chatbot-panel{width:calc(100vw - 40px);height:calc(100vh - 100px);bottom:80px;right:20px}}
"#;

/// Markup for the widget root element.
pub fn render_widget(view: &WidgetView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="chatbot-widget {position} {theme}">
<button class="chatbot-toggle" aria-label="Open chat">{glyph}</button>
<div class="chatbot-panel{open}">
<div class="chatbot-header">
<span>{title}<small class="chatbot-greeting">{greeting}</small></span>
<button class="chatbot-close" aria-label="Close chat">×</button>
</div>
<div class="chatbot-messages">
"#,
        position = view.position.as_class(),
        theme = view.theme.as_class(),
        glyph = TOGGLE_GLYPH,
        open = if view.panel_open { " open" } else { "" },
        title = escape_html(&view.title),
        greeting = escape_html(&view.greeting)
    );
    for item in &view.items {
        html.push_str(&render_item(item));
    }
    html.push_str("</div>\n");
    html.push_str(&render_input(&view.input));
    html.push_str("</div>\n</div>\n");
    html
}

/// A standalone page with the widget, its stylesheet and any scripts the
/// page has loaded.
pub fn render_document(view: &WidgetView, page: &Page) -> String {
    let mut head_scripts = String::new();
    for src in page.scripts() {
        let _ = writeln!(head_scripts, r#"<script src="{}"></script>"#, escape_html(src));
    }
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style id="{style_id}">{css}</style>
{head_scripts}</head>
<body>
{widget}</body>
</html>
"##,
        title = escape_html(&view.title),
        style_id = STYLESHEET_ID,
        css = WIDGET_CSS,
        head_scripts = head_scripts,
        widget = render_widget(view)
    )
}

fn render_item(item: &ItemView) -> String {
    match item {
        ItemView::Bubble { role, html, .. } =>
            format!(
                "<div class=\"chatbot-message {}\"><div class=\"message-bubble\">{}</div></div>\n",
                role.as_str(),
                html
            ),
        ItemView::Menu { heading, options } => {
            let buttons: String = options.iter().map(render_menu_option).collect();
            format!(
                "<div class=\"chatbot-message bot\"><div class=\"message-bubble\">\
<div style=\"margin-bottom: 15px;\"><strong>{}</strong></div>\
<div class=\"main-menu-grid\">{}</div></div></div>\n",
                escape_html(heading),
                buttons
            )
        }
        ItemView::Scheduler { title, url, mount_id } =>
            format!(
                "<div class=\"chatbot-message bot\"><div class=\"message-bubble calendly-widget\">\
<div style=\"margin-bottom: 10px;\"><strong>{}</strong></div>\
<div id=\"{}\" class=\"calendly-inline-widget\" data-url=\"{}\" style=\"min-width:280px;height:400px;\"></div>\
</div></div>\n",
                escape_html(title),
                escape_html(mount_id),
                escape_html(url)
            ),
        ItemView::Loading =>
            "<div class=\"chatbot-message bot\" data-loading=\"true\"><div class=\"message-bubble\">\
<div class=\"chatbot-loading\"><div class=\"chatbot-loading-dot\"></div>\
<div class=\"chatbot-loading-dot\"></div><div class=\"chatbot-loading-dot\"></div></div>\
</div></div>\n".to_string(),
    }
}

fn render_menu_option(option: &MenuOptionView) -> String {
    format!(
        "<button class=\"main-menu-btn {}{}\" data-action=\"{}\">{}</button>",
        option.class,
        if option.full_row { " full-row" } else { "" },
        option.action.token(),
        escape_html(option.label)
    )
}

fn render_input(input: &InputView) -> String {
    format!(
        "<div class=\"chatbot-input-area\"><div class=\"chatbot-input-container\">\
<input type=\"text\" class=\"chatbot-input\" placeholder=\"{}\" value=\"{}\" />\
<button class=\"chatbot-send\" aria-label=\"Send message\"{}>→</button>\
</div></div>\n",
        escape_html(&input.placeholder),
        escape_html(&input.value),
        if input.send_enabled { "" } else { " disabled" }
    )
}

/// Keeps the most recent full document; the CLI prints it on exit.
#[derive(Debug, Default)]
pub struct HtmlSnapshot {
    latest: String,
}

impl HtmlSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_document(self) -> String {
        self.latest
    }
}

impl Renderer for HtmlSnapshot {
    fn render(&mut self, view: &WidgetView, page: &Page) -> io::Result<()> {
        self.latest = render_document(view, page);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ Position, WidgetConfig };
    use crate::models::AskResponse;
    use crate::session::ConversationSession;
    use crate::widget::{ view, WidgetController };

    fn controller(config: WidgetConfig) -> WidgetController {
        WidgetController::with_session(config, ConversationSession::with_id("conv_html"))
    }

    #[test]
    fn closed_widget_has_toggle_and_hidden_panel() {
        let html = render_widget(&view(&controller(WidgetConfig::default())));
        assert!(html.contains(r#"class="chatbot-widget bottom-right theme-light""#));
        assert!(html.contains(r#"<div class="chatbot-panel">"#));
        assert!(html.contains("Smart Chat"));
        assert!(html.contains(r#"placeholder="Type your question...""#));
        assert!(!html.contains("main-menu-btn"));
    }

    #[test]
    fn open_widget_shows_menu_buttons() {
        let mut c = controller(WidgetConfig { position: Position::BottomLeft, ..Default::default() });
        c.open();
        let html = render_widget(&view(&c));
        assert!(html.contains("bottom-left"));
        assert!(html.contains(r#"<div class="chatbot-panel open">"#));
        assert_eq!(html.matches("main-menu-btn ").count(), 5);
        assert!(html.contains(r#"data-action="TECHNICIAN_BUTTON""#));
        assert!(html.contains("technician-btn full-row"));
    }

    #[test]
    fn pending_request_disables_send_and_shows_dots() {
        let mut c = controller(WidgetConfig::default());
        c.open();
        c.submit_text("hello <there>").unwrap();
        let html = render_widget(&view(&c));
        assert!(html.contains(" disabled>→</button>"));
        assert_eq!(html.matches(r#"data-loading="true""#).count(), 1);
        assert!(html.contains("hello &lt;there&gt;"));
    }

    #[test]
    fn document_lists_loaded_scripts_once() {
        let config = WidgetConfig {
            calendly_url: Some("https://calendly.com/acme".into()),
            ..Default::default()
        };
        let mut c = controller(config);
        let mut page = Page::new();
        c.open();
        let out = c.submit_text("book me").unwrap();
        for effect in c.complete(out.ticket, Ok(AskResponse {
            answer: Some("Pick a slot".into()),
            conversation_state: None,
            next_step: Some(crate::models::NextStep::ShowScheduler),
        })) {
            page.apply(&effect);
        }

        let doc = render_document(&view(&c), &page);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert_eq!(doc.matches("assets.calendly.com/assets/external/widget.js").count(), 1);
        assert!(doc.contains(r#"data-url="https://calendly.com/acme""#));
        assert!(doc.contains(r#"id="chatbot-scheduler-1""#));
        assert!(doc.contains(STYLESHEET_ID));
    }

    #[test]
    fn bubbles_carry_role_class() {
        let mut c = controller(WidgetConfig::default());
        c.open();
        let out = c.submit_text("hello").unwrap();
        c.complete(out.ticket, Ok(AskResponse { answer: Some("hi".into()), ..Default::default() }));
        let html = render_widget(&view(&c));
        assert!(
            html.contains(
                r#"<div class="chatbot-message user"><div class="message-bubble">hello</div></div>"#
            )
        );
        assert!(
            html.contains(
                r#"<div class="chatbot-message bot"><div class="message-bubble">hi</div></div>"#
            )
        );
    }
}
