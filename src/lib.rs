pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod terraform;
