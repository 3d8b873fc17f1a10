//! Pod configuration fragments for Pod Inventory Manager
//!
//! This crate implements the configuration-merge core:
//!
//! - **Section model**: one layer of pod configuration as an ordered YAML
//!   mapping
//! - **Section Merger**: pure per-key merge with strategy dispatch
//!   (deep-merge containers, list-merge by name, concatenate, override)
//! - **Fragment Loader**: locate, render, and parse a named fragment
//!   source into its `pod` Section
//!
//! Template rendering is a seam: the loader works against the
//! [`TemplateRenderer`] trait, with [`VarRenderer`] as the built-in
//! variable-substitution implementation.

pub mod error;
pub mod loader;
pub mod merge;
pub mod render;
pub mod section;

pub use error::LoadError;
pub use loader::FragmentLoader;
pub use merge::{MergeStrategy, merge_sections, strategy_for};
pub use render::{RenderError, RenderVars, TemplateRenderer, VarRenderer};
pub use section::Section;
