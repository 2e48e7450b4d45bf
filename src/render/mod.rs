pub mod html;
pub mod text;

use std::io;

use crate::host::Page;
use crate::widget::WidgetView;

pub use self::html::HtmlSnapshot;
pub use self::text::TextRenderer;

/// Draws a view. Renderers hold no widget state of their own beyond what
/// they need to avoid redrawing.
pub trait Renderer: Send {
    fn render(&mut self, view: &WidgetView, page: &Page) -> io::Result<()>;
}
