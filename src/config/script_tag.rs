//! Declarative configuration read from the `<script>` tag that embeds the
//! widget, e.g.
//!
//! ```html
//! <script src="chatbot-widget.js" data-auto-init data-title="Help" data-auto-open="true"></script>
//! ```
//!
//! Nothing is configured unless the tag carries `data-auto-init`.

use super::{ Position, WidgetOptions };
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

pub const AUTO_INIT_ATTR: &str = "data-auto-init";

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

static TAG_BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)^\s*<\s*script\b((?:"[^"]*"|'[^']*'|[^>"'])*?)/?>"#).expect(
        "tag pattern is valid"
    )
});

/// Splits the attributes out of a raw `<script ...>` tag. Valueless
/// attributes come back with an empty value. Returns an empty list when the
/// input is not a script tag.
pub fn parse_attributes(tag: &str) -> Vec<(String, String)> {
    let Some(body) = TAG_BODY_RE.captures(tag).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    ATTRIBUTE_RE.captures_iter(body.as_str())
        .map(|c| {
            let name = c[1].to_ascii_lowercase();
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Maps `data-*` attributes onto widget options. `None` when auto-init is
/// not requested.
pub fn options_from_attributes<'a, I>(attributes: I) -> Option<WidgetOptions>
    where I: IntoIterator<Item = (&'a str, &'a str)>
{
    let mut auto_init = false;
    let mut options = WidgetOptions::default();

    for (name, value) in attributes {
        match name {
            AUTO_INIT_ATTR => {
                auto_init = true;
            }
            "data-api-url" => {
                options.api_url = Some(value.to_string());
            }
            "data-title" => {
                options.title = Some(value.to_string());
            }
            "data-position" => {
                match value.parse::<Position>() {
                    Ok(position) => {
                        options.position = Some(position);
                    }
                    Err(e) => warn!("Ignoring data-position: {}", e),
                }
            }
            "data-placeholder" => {
                options.placeholder = Some(value.to_string());
            }
            "data-auto-open" => {
                options.auto_open = Some(value == "true");
            }
            "data-initial-message" => {
                options.initial_message = Some(value.to_string());
            }
            "data-calendly-url" => {
                options.calendly_url = Some(value.to_string());
            }
            _ => {}
        }
    }

    auto_init.then_some(options)
}

/// Convenience for a raw tag string.
pub fn options_from_tag(tag: &str) -> Option<WidgetOptions> {
    let attributes = parse_attributes(tag);
    options_from_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}
