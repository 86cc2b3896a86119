//! Shared types for sctl: external commands, node addressing and tokens.
//!
//! These are the values exchanged between the operator CLI and the nodes it
//! targets. Nothing in here owns persistent state.

pub mod command;
pub mod error;
pub mod node;
pub mod token;

pub use command::{DOCKER, ExternalCommand, RSYNC, SSH, TargetedCommand};
pub use error::CommandError;
pub use node::{DEFAULT_OS, LOOPBACK_HOSTS, NodeAddress, contents_of};
pub use token::{TOKEN_MAX_AGE_SECS, Token, TokenBundle, generate, generate_with};
