pub mod changelog;
pub mod config;
pub mod manifest;
pub mod release_check;
