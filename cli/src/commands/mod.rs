//! Command implementations

pub mod config;
pub mod node;
pub mod project;
pub mod service;
pub mod sync;
pub mod token;
pub mod version;
