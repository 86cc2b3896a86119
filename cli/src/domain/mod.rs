//! Domain layer: deployment types, argument synthesis and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands` or
//! `crate::application`. The only I/O is reading a single service definition
//! file and the process environment during substitution.

pub mod config;
pub mod error;
pub mod project;
pub mod service;

pub use config::{SctlConfig, validate_config_key, validate_config_value};
pub use error::{AuthError, ConfigError, DefinitionError, RegistryError};
pub use project::Project;
pub use service::{ServiceSpec, validate_service_name};
