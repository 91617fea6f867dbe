pub mod config;
pub mod goal;
