use std::io::{ self, Write };

use super::Renderer;
use crate::host::Page;
use crate::models::Role;
use crate::widget::view::{ ItemView, WidgetView };

/// Transcript-style output for a terminal. Only prints what changed since
/// the previous render, so it can be called after every event.
pub struct TextRenderer<W: Write> {
    out: W,
    printed: usize,
    was_open: bool,
    was_loading: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0, was_open: false, was_loading: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_item(&mut self, item: &ItemView, page: &Page) -> io::Result<()> {
        match item {
            ItemView::Bubble { role, text, .. } => {
                let who = match role {
                    Role::User => "you",
                    Role::Bot => "bot",
                };
                let mut lines = text.lines();
                writeln!(self.out, "{:>4}: {}", who, lines.next().unwrap_or_default())?;
                for line in lines {
                    writeln!(self.out, "      {}", line)?;
                }
            }
            ItemView::Menu { heading, options } => {
                writeln!(self.out, " bot: {}", heading)?;
                for (i, option) in options.iter().enumerate() {
                    writeln!(self.out, "      [{}] {}", i + 1, option.label)?;
                }
            }
            ItemView::Scheduler { title, url, mount_id } => {
                let ready = page.schedulers().iter().any(|s| &s.mount_id == mount_id);
                writeln!(
                    self.out,
                    " bot: {} -> {}{}",
                    title,
                    url,
                    if ready { "" } else { " (pending)" }
                )?;
            }
            ItemView::Loading => {}
        }
        Ok(())
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &WidgetView, page: &Page) -> io::Result<()> {
        if view.panel_open != self.was_open {
            if view.panel_open {
                writeln!(self.out, "=== {} ===", view.title)?;
                if self.printed == 0 {
                    writeln!(self.out, "{}", view.greeting)?;
                }
            } else {
                writeln!(self.out, "=== {} (closed) ===", view.title)?;
            }
            self.was_open = view.panel_open;
        }

        let settled: Vec<&ItemView> = view.items
            .iter()
            .filter(|i| !matches!(i, ItemView::Loading))
            .collect();
        for item in settled.iter().skip(self.printed) {
            self.write_item(item, page)?;
        }
        self.printed = settled.len();

        let loading = view.items.iter().any(|i| matches!(i, ItemView::Loading));
        if loading && !self.was_loading {
            writeln!(self.out, " bot: ...")?;
        }
        self.was_loading = loading;

        self.out.flush()
    }
}
