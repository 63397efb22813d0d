//! CLI domain: parse, route, and output only.
//! No domain logic; a single route table dispatches to engine services.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{BookingCommands, Cli, CmsCommands, Commands, ContextCommands};
pub use route::RunContext;
