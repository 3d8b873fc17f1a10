//! Template rendering seam for fragment text
//!
//! Fragment files are templates rendered against the variables known at
//! inventory time. The full template engine lives outside this system;
//! [`TemplateRenderer`] is the seam, and [`VarRenderer`] is the built-in
//! implementation covering plain `{{ var }}` substitution.

use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Variables in scope for rendering one fragment.
///
/// Only values known at resolution time belong here; anything produced by
/// later passes must be supplied explicitly by the caller.
pub type RenderVars = BTreeMap<String, Value>;

/// Errors from rendering fragment text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("undefined template variable '{name}'")]
    Undefined { name: String },

    #[error("template variable '{name}' is not a scalar value")]
    NotScalar { name: String },
}

/// Renders raw fragment text against a set of variables.
///
/// Implementations must fail on any unresolved reference rather than
/// leaving placeholder text in the output.
pub trait TemplateRenderer {
    fn render(&self, raw: &str, vars: &RenderVars) -> Result<String, RenderError>;
}

/// Built-in `{{ var }}` substitution renderer.
///
/// Substitutes scalar variable values; a reference to a missing variable
/// or to a non-scalar value is an error.
#[derive(Debug, Clone)]
pub struct VarRenderer {
    pattern: Regex,
}

impl VarRenderer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
                .expect("Invalid variable reference regex"),
        }
    }
}

impl Default for VarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for VarRenderer {
    fn render(&self, raw: &str, vars: &RenderVars) -> Result<String, RenderError> {
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;
        for caps in self.pattern.captures_iter(raw) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = vars
                .get(name.as_str())
                .ok_or_else(|| RenderError::Undefined {
                    name: name.as_str().to_owned(),
                })?;
            out.push_str(&raw[last..whole.start()]);
            out.push_str(&scalar_text(name.as_str(), value)?);
            last = whole.end();
        }
        out.push_str(&raw[last..]);
        Ok(out)
    }
}

/// Render one variable value as substitution text.
fn scalar_text(name: &str, value: &Value) -> Result<String, RenderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(RenderError::NotScalar {
            name: name.to_owned(),
        }),
    }
}
