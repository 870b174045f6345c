pub mod command_handler;
pub mod family_commands;
pub mod handlers;
pub mod member_commands;

pub use command_handler::{Command, CommandHandler};
pub use family_commands::*;
pub use member_commands::*;
