//! Error types for fragment loading

use crate::render::RenderError;

/// Errors from resolving one named fragment source into a Section.
///
/// Loading is best-effort at the chain level: callers record these in an
/// error sink and continue with the next source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Pod fragment: source '{name}' not found on the roles path")]
    SourceNotFound { name: String },

    #[error("Pod fragment: '{name}' has no {file}", file = pod_fs::FRAGMENT_FILE)]
    MissingFragment { name: String },

    #[error("Pod fragment: failed to read from '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: pod_fs::Error,
    },

    #[error("Pod fragment: failed to render '{name}/{file}': {source}", file = pod_fs::FRAGMENT_FILE)]
    Render {
        name: String,
        #[source]
        source: RenderError,
    },

    #[error("Pod fragment: failed to parse rendered YAML from '{name}': {message}")]
    Parse { name: String, message: String },

    #[error("Pod fragment: '{name}' rendered YAML is not a mapping")]
    Shape { name: String },

    #[error("Pod fragment: '{name}' pod section is not a mapping")]
    PodShape { name: String },
}
