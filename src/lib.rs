pub mod cli;
pub mod commands;
pub mod document;
pub mod files;
pub mod security;
pub mod utils;
pub mod validator;

pub use cli::Cli;
pub use document::{ParsedDocument, SshHostConfig};
