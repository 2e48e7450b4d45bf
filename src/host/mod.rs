pub mod page;
pub mod runtime;

pub use page::{ MountedScheduler, Page, SCHEDULER_SCRIPT_URL };
pub use runtime::{ UiEvent, WidgetRuntime, AUTO_OPEN_DELAY };
