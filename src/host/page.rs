use log::{ debug, info };

use crate::widget::Effect;

pub const SCHEDULER_SCRIPT_URL: &str = "https://assets.calendly.com/assets/external/widget.js";

/// An inline scheduler initialized on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedScheduler {
    pub url: String,
    pub mount_id: String,
}

/// The parts of the host document the widget touches: its stylesheet, the
/// scripts it has pulled in, and the embeds it has initialized. One per page.
#[derive(Debug, Default)]
pub struct Page {
    stylesheet_injected: bool,
    scripts: Vec<String>,
    schedulers: Vec<MountedScheduler>,
    focus_requests: usize,
    scroll_requests: usize,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only the first time it is called for a page.
    pub fn inject_stylesheet(&mut self) -> bool {
        !std::mem::replace(&mut self.stylesheet_injected, true)
    }

    pub fn stylesheet_injected(&self) -> bool {
        self.stylesheet_injected
    }

    /// Appends a script to the page unless it is already there. Returns
    /// whether a new script was added.
    pub fn load_script_once(&mut self, src: &str) -> bool {
        if self.scripts.iter().any(|s| s == src) {
            debug!("Script already loaded: {}", src);
            return false;
        }
        info!("Loading script {}", src);
        self.scripts.push(src.to_string());
        true
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn schedulers(&self) -> &[MountedScheduler] {
        &self.schedulers
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::FocusInput => {
                self.focus_requests += 1;
            }
            Effect::ScrollToBottom => {
                self.scroll_requests += 1;
            }
            Effect::MountScheduler { url, mount_id } => {
                self.load_script_once(SCHEDULER_SCRIPT_URL);
                info!("Initializing inline scheduler {} for {}", mount_id, url);
                self.schedulers.push(MountedScheduler {
                    url: url.clone(),
                    mount_id: mount_id.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(n: usize) -> Effect {
        Effect::MountScheduler {
            url: "https://calendly.com/acme".into(),
            mount_id: format!("chatbot-scheduler-{}", n),
        }
    }

    #[test]
    fn stylesheet_is_injected_once() {
        let mut page = Page::new();
        assert!(page.inject_stylesheet());
        assert!(!page.inject_stylesheet());
        assert!(page.stylesheet_injected());
    }

    #[test]
    fn scheduler_script_loads_once_for_many_mounts() {
        let mut page = Page::new();
        page.apply(&mount(1));
        page.apply(&mount(2));
        page.apply(&mount(3));
        assert_eq!(page.scripts(), &[SCHEDULER_SCRIPT_URL.to_string()]);
        assert_eq!(page.schedulers().len(), 3);
        assert_eq!(page.schedulers()[2].mount_id, "chatbot-scheduler-3");
    }

    #[test]
    fn focus_and_scroll_are_counted() {
        let mut page = Page::new();
        page.apply(&Effect::FocusInput);
        page.apply(&Effect::ScrollToBottom);
        page.apply(&Effect::ScrollToBottom);
        assert_eq!(page.focus_requests(), 1);
        assert_eq!(page.scroll_requests(), 2);
    }
}
