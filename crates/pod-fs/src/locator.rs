//! Fragment-source discovery on an ordered search path
//!
//! A fragment source is a role-style directory containing a pod fragment
//! template at a fixed relative location:
//!
//! ```text
//! roles/
//!   app-base/
//!     templates/
//!       k3s-pod.yml.j2
//!   app-web/
//!     templates/
//!       k3s-pod.yml.j2
//! ```

use std::path::{Path, PathBuf};

/// Relative path of the pod fragment file inside a source directory.
pub const FRAGMENT_FILE: &str = "templates/k3s-pod.yml.j2";

/// Resolves a named fragment source to a directory on disk.
pub trait SourceLocator {
    /// Locate the directory for `name`, or `None` if no search root has it.
    fn find_source(&self, name: &str) -> Option<PathBuf>;
}

/// Path of the pod fragment file inside a located source directory.
pub fn fragment_path(source_dir: &Path) -> PathBuf {
    source_dir.join(FRAGMENT_FILE)
}

/// Ordered search-path locator over role-style directories.
///
/// Roots are searched in insertion order; the first root containing a
/// directory named after the source wins.
#[derive(Debug, Clone, Default)]
pub struct RolesPath {
    roots: Vec<PathBuf>,
}

impl RolesPath {
    /// Create a locator over the given search roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Create a locator with a single search root.
    pub fn single(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Append a search root with lowest priority.
    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// The configured search roots, in priority order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl SourceLocator for RolesPath {
    fn find_source(&self, name: &str) -> Option<PathBuf> {
        for root in &self.roots {
            let candidate = root.join(name);
            if candidate.is_dir() {
                return Some(candidate);
            }
            tracing::debug!(root = %root.display(), name, "source not under root");
        }
        None
    }
}
