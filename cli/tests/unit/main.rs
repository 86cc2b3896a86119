//! Unit tests for the sctl CLI
//!
//! These tests use in-memory ports and run without spawning external tools.

mod architecture;
mod auth_service;
mod mocks;
mod property_tests;
