pub mod config;
pub mod driver;
pub mod filter;
pub mod parse;
pub mod record;
pub mod render;
pub mod resolve;
pub mod signal;
pub mod source;
pub mod theme;
