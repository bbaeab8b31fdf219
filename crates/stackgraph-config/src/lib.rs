//! stackgraph configuration
//!
//! Resolves environment-scoped parameters into the immutable
//! [`Configuration`] every builder receives. Nothing downstream reads the
//! process environment; [`RawInput::from_env`] is the single entry point.
//!
//! ```rust
//! use stackgraph_config::{Configuration, RawInput};
//!
//! let raw = RawInput::new().with("ENVIRONMENT", "staging").with("CONTAINER_PORT", "8080");
//! let config = Configuration::resolve(&raw)?;
//! assert_eq!(config.container_port(), 8080);
//! assert!(config.image_uri().contains("staging"));
//! # Ok::<(), stackgraph_config::ConfigError>(())
//! ```

pub mod configuration;
pub mod error;
pub mod keys;
pub mod raw;

pub use configuration::{default_image_uri, AlertSettings, BackendMode, Configuration, ParamValue};
pub use error::ConfigError;
pub use raw::RawInput;
