//! Integration tests for the sctl CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior. Every
//! test gets its own state home and config file in a temp directory.

mod cli_tests;
