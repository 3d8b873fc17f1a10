//! Fragment loading: locate, render, parse
//!
//! Resolves a named source through the [`SourceLocator`], renders the raw
//! fragment text against inventory-time variables, parses the result as
//! YAML, and returns the document's `pod` sub-section.

use crate::error::LoadError;
use crate::render::{RenderVars, TemplateRenderer};
use crate::section::{Section, get};
use pod_fs::{SourceLocator, fragment_path};
use serde_yaml::Value;

/// Loads named fragment sources into pod Sections.
pub struct FragmentLoader<L, R> {
    locator: L,
    renderer: R,
}

impl<L: SourceLocator, R: TemplateRenderer> FragmentLoader<L, R> {
    pub fn new(locator: L, renderer: R) -> Self {
        Self { locator, renderer }
    }

    /// Load one fragment source and return its `pod` Section.
    ///
    /// The document must render and parse to a mapping; a missing `pod`
    /// key yields an empty Section. This method never touches a shared
    /// error sink: callers surface the error kind themselves.
    pub fn load(&self, source_name: &str, vars: &RenderVars) -> Result<Section, LoadError> {
        let Some(source_dir) = self.locator.find_source(source_name) else {
            return Err(LoadError::SourceNotFound {
                name: source_name.to_owned(),
            });
        };

        let path = fragment_path(&source_dir);
        if !path.is_file() {
            return Err(LoadError::MissingFragment {
                name: source_name.to_owned(),
            });
        }

        let raw = pod_fs::io::read_text(&path).map_err(|e| LoadError::Read {
            name: source_name.to_owned(),
            source: e,
        })?;

        let rendered = self.renderer.render(&raw, vars).map_err(|e| LoadError::Render {
            name: source_name.to_owned(),
            source: e,
        })?;

        let document: Value =
            serde_yaml::from_str(&rendered).map_err(|e| LoadError::Parse {
                name: source_name.to_owned(),
                message: e.to_string(),
            })?;
        let Value::Mapping(document) = document else {
            return Err(LoadError::Shape {
                name: source_name.to_owned(),
            });
        };

        tracing::debug!(source = source_name, "loaded pod fragment");
        match get(&document, "pod") {
            Some(Value::Mapping(pod)) => Ok(pod.clone()),
            Some(_) => Err(LoadError::PodShape {
                name: source_name.to_owned(),
            }),
            None => Ok(Section::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::VarRenderer;
    use crate::section::get_str;
    use pod_fs::RolesPath;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_fragment(roles_root: &Path, role: &str, text: &str) {
        let templates = roles_root.join(role).join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("k3s-pod.yml.j2"), text).unwrap();
    }

    fn loader(roles_root: &Path) -> FragmentLoader<RolesPath, VarRenderer> {
        FragmentLoader::new(RolesPath::single(roles_root), VarRenderer::new())
    }

    #[test]
    fn loads_and_renders_pod_section() {
        let roles = TempDir::new().unwrap();
        write_fragment(
            roles.path(),
            "app-base",
            "pod:\n  namespace: web\n  containers:\n    app:\n      image: app:{{ tag }}\n",
        );

        let mut vars = RenderVars::new();
        vars.insert("tag".to_owned(), Value::from("1.4"));

        let section = loader(roles.path()).load("app-base", &vars).unwrap();
        assert_eq!(get_str(&section, "namespace"), Some("web"));
    }

    #[test]
    fn unknown_source_is_not_found() {
        let roles = TempDir::new().unwrap();
        let err = loader(roles.path())
            .load("missing", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));
    }

    #[test]
    fn source_without_fragment_file_is_missing_fragment() {
        let roles = TempDir::new().unwrap();
        fs::create_dir_all(roles.path().join("app-base")).unwrap();

        let err = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFragment { .. }));
    }

    #[test]
    fn unresolved_reference_is_a_render_error() {
        let roles = TempDir::new().unwrap();
        write_fragment(roles.path(), "app-base", "pod:\n  namespace: {{ ns }}\n");

        let err = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::Render { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let roles = TempDir::new().unwrap();
        write_fragment(roles.path(), "app-base", "pod: [unclosed\n");

        let err = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn non_mapping_document_is_a_shape_error() {
        let roles = TempDir::new().unwrap();
        write_fragment(roles.path(), "app-base", "- just\n- a\n- list\n");

        let err = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[test]
    fn non_mapping_pod_section_is_its_own_shape_error() {
        let roles = TempDir::new().unwrap();
        write_fragment(roles.path(), "app-base", "pod: just-a-string\n");

        let err = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::PodShape { .. }));
        assert!(format!("{err}").contains("pod section is not a mapping"));
    }

    #[test]
    fn document_without_pod_key_yields_empty_section() {
        let roles = TempDir::new().unwrap();
        write_fragment(roles.path(), "app-base", "metadata:\n  owner: ops\n");

        let section = loader(roles.path())
            .load("app-base", &RenderVars::new())
            .unwrap();
        assert!(section.is_empty());
    }
}
