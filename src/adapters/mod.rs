pub mod config;
pub mod limited_io;
