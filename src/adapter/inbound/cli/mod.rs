//! CLI module graph.

pub mod command;
pub mod config;
pub mod context;
pub mod export;
pub mod ingredient;
pub mod item;
pub mod optimize;
pub mod output;
pub mod prompt;
pub mod recipe;
pub mod results;
pub mod run;
pub mod seed;
pub mod table;
