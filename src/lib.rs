#[macro_use]
mod macros;

pub mod config;
pub mod explore;
pub mod export;
pub mod fetch;
pub mod league;
pub mod parse;
pub mod pipeline;
pub mod process;
pub mod scrape;
pub mod summary;
