pub mod command;
pub mod commands;

pub use command::{Command, CommandContext, CommandHandler};
