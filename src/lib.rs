pub mod board;
pub mod common;
pub mod config;
pub mod render;
pub mod solver;
pub mod stat;
