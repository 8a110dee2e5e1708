//! tfvars generation from Terraform-generated configuration
//!
//! This module scrapes the configuration that `plan -generate-config-out`
//! writes for an imported `google_compute_instance` and renders it as an
//! entry of the `compute.auto.tfvars` instance map.
//!
//! # Example
//!
//! ```ignore
//! use crate::tfvars::{GeneratedConfigParser, TfvarsRenderer};
//!
//! let parser = GeneratedConfigParser::new();
//! let instance = parser.parse(&generated, &resource_id);
//!
//! let renderer = TfvarsRenderer::new(&config);
//! println!("{}", renderer.render(&instance));
//! ```

mod parser;
mod renderer;
mod types;

pub use parser::GeneratedConfigParser;
pub use renderer::TfvarsRenderer;
pub use types::InstanceConfig;
