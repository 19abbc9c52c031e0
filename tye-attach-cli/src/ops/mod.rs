mod debug;
mod list;
mod output;
mod processes;
pub mod ui;

pub use debug::attach_service;
pub use list::list_services;
pub use output::OutputFormat;
pub use processes::{resolve_pid, show_tree};
