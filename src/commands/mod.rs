pub mod config;
pub mod converge;
