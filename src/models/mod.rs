pub mod chat;
pub mod menu;
pub mod protocol;

pub use chat::{ Entry, Message, Role };
pub use menu::QuickAction;
pub use protocol::{ AskRequest, AskResponse, NextStep };
