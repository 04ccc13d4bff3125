pub mod cli_args;
pub mod config;
pub mod git;
pub mod github;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod retry;
pub mod setup;

pub use cli_args::Cli;
pub use config::Config;
pub use pipeline::{Outcome, Pipeline};
