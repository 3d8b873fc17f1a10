//! Filesystem layer for Pod Inventory Manager
//!
//! Provides fragment-source discovery on an ordered search path and safe
//! text reads with path-carrying errors.

pub mod error;
pub mod io;
pub mod locator;

pub use error::{Error, Result};
pub use locator::{FRAGMENT_FILE, RolesPath, SourceLocator, fragment_path};
