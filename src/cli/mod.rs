use clap::Parser;

use crate::config::{ script_tag, ConfigError, Position, Theme, WidgetOptions };
use crate::host::UiEvent;
use crate::models::QuickAction;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Configuration Sources ---
    /// JSON file with widget options (apiUrl, title, position, calendlyUrl, ...).
    #[arg(long, env = "WIDGET_OPTIONS")]
    pub options: Option<String>,

    /// Embedding <script> tag; its data-* attributes are applied when it carries data-auto-init.
    #[arg(long, env = "WIDGET_SCRIPT_TAG")]
    pub script_tag: Option<String>,

    /// Origin of the host page, used to resolve a relative API URL.
    #[arg(long, env = "WIDGET_ORIGIN", default_value = "http://localhost:8080")]
    pub origin: String,

    // --- Widget Options ---
    /// Endpoint the widget POSTs questions to (default /api/chat/ask).
    #[arg(long, env = "WIDGET_API_URL")]
    pub api_url: Option<String>,

    /// Header title.
    #[arg(long, env = "WIDGET_TITLE")]
    pub title: Option<String>,

    /// Screen corner (bottom-right, bottom-left).
    #[arg(long, env = "WIDGET_POSITION")]
    pub position: Option<Position>,

    /// Visual theme (light, dark).
    #[arg(long, env = "WIDGET_THEME")]
    pub theme: Option<Theme>,

    /// Input placeholder text.
    #[arg(long, env = "WIDGET_PLACEHOLDER")]
    pub placeholder: Option<String>,

    /// Open the panel two seconds after start-up.
    #[arg(long, env = "WIDGET_AUTO_OPEN")]
    pub auto_open: Option<bool>,

    /// Greeting shown under the title.
    #[arg(long, env = "WIDGET_INITIAL_MESSAGE")]
    pub initial_message: Option<String>,

    /// Scheduling page to embed when the backend asks for it.
    #[arg(long, env = "WIDGET_CALENDLY_URL")]
    pub calendly_url: Option<String>,

    // --- Output ---
    /// Print the final widget as an HTML document instead of a transcript.
    #[arg(long, env = "WIDGET_HTML", default_value = "false")]
    pub html: bool,
}

impl Args {
    fn flag_options(&self) -> WidgetOptions {
        WidgetOptions {
            api_url: self.api_url.clone(),
            theme: self.theme,
            position: self.position,
            title: self.title.clone(),
            placeholder: self.placeholder.clone(),
            auto_open: self.auto_open,
            initial_message: self.initial_message.clone(),
            calendly_url: self.calendly_url.clone(),
        }
    }

    /// Options file, then script tag, then individual flags.
    pub fn widget_options(&self) -> Result<WidgetOptions, ConfigError> {
        let mut options = match &self.options {
            Some(path) => WidgetOptions::from_file(path)?,
            None => WidgetOptions::default(),
        };
        if let Some(tag) = &self.script_tag {
            if let Some(from_tag) = script_tag::options_from_tag(tag) {
                options = options.merge(from_tag);
            }
        }
        Ok(options.merge(self.flag_options()))
    }
}

/// Turns one line of terminal input into widget events.
///
/// `/open` and `/toggle` toggle the panel, `/close` closes it, `/menu <n|name>`
/// presses a quick-action button, `/quit` tears the widget down. Anything else
/// is typed into the input and sent.
pub fn parse_command(line: &str) -> Vec<UiEvent> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return vec![UiEvent::Input(line.to_string()), UiEvent::Submit];
    };
    let (name, rest) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    match name {
        "open" | "toggle" => vec![UiEvent::Toggle],
        "close" => vec![UiEvent::Close],
        "quit" | "exit" => vec![UiEvent::Teardown],
        "menu" =>
            match rest.parse::<QuickAction>() {
                Ok(action) => vec![UiEvent::QuickAction(action)],
                Err(e) => {
                    log::warn!("{}", e);
                    Vec::new()
                }
            }
        _ => {
            log::warn!("Unknown command: /{}", name);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["smart-chat-widget"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn flags_override_script_tag() {
        let a = args(&[
            "--script-tag",
            r#"<script src="chatbot-widget.js" data-auto-init data-title="Tag Title" data-position="bottom-left"></script>"#,
            "--title",
            "Flag Title",
        ]);
        let options = a.widget_options().unwrap();
        assert_eq!(options.title.as_deref(), Some("Flag Title"));
        assert_eq!(options.position, Some(Position::BottomLeft));
    }

    #[test]
    fn script_tag_without_auto_init_is_ignored() {
        let a = args(&["--script-tag", r#"<script src="chatbot-widget.js" data-title="Nope"></script>"#]);
        assert_eq!(a.widget_options().unwrap(), WidgetOptions::default());
    }

    #[test]
    fn parses_position_and_auto_open_flags() {
        let a = args(&["--position", "bottom-left", "--auto-open", "true", "--theme", "dark"]);
        assert_eq!(a.position, Some(Position::BottomLeft));
        assert_eq!(a.auto_open, Some(true));
        assert_eq!(a.theme, Some(Theme::Dark));
    }

    #[test]
    fn plain_text_is_typed_then_sent() {
        assert_eq!(
            parse_command("is my outlet safe?"),
            vec![UiEvent::Input("is my outlet safe?".into()), UiEvent::Submit]
        );
    }

    #[test]
    fn slash_commands_map_to_events() {
        assert_eq!(parse_command("/open"), vec![UiEvent::Toggle]);
        assert_eq!(parse_command("/close"), vec![UiEvent::Close]);
        assert_eq!(parse_command("/menu 3"), vec![UiEvent::QuickAction(QuickAction::Schedule)]);
        assert_eq!(parse_command("/menu technician"), vec![UiEvent::QuickAction(QuickAction::Technician)]);
        assert_eq!(parse_command("/quit"), vec![UiEvent::Teardown]);
        assert!(parse_command("/menu 9").is_empty());
        assert!(parse_command("/dance").is_empty());
    }
}
