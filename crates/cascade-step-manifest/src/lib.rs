//! # Cascade Step Manifest
//!
//! A YAML description of the steps a pipeline engine provides, and a
//! [`ManifestRegistry`] that serves it to the step metadata catalog.
//!
//! ## Example
//!
//! ```
//! use cascade_step_manifest::{parse_manifest, ManifestRegistry};
//!
//! let yaml = r#"
//! manifest_version: "1.0"
//! steps:
//!   - function_name: sleep
//!     display_name: Sleep
//!     type: org.example.SleepStep
//! types:
//!   org.example.SleepStep:
//!     parameters:
//!       - name: time
//!         type: int
//!         required: true
//! "#;
//!
//! let manifest = parse_manifest(yaml).unwrap();
//! let registry = ManifestRegistry::from_manifest(manifest).unwrap();
//! ```

mod error;
mod parser;

pub mod document;
pub mod registry;

pub use document::{MetaStepBase, MetaStepEntry, ParameterEntry, StepEntry, StepManifest, TypeEntry, TypeSpec};
pub use error::ManifestError;
pub use parser::{load_manifest, parse_manifest, SUPPORTED_VERSION};
pub use registry::ManifestRegistry;
