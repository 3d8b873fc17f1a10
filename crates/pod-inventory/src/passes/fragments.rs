//! Fragment-chain resolution pass
//!
//! For every pod host declaring fragment sources, fold the source list
//! through the loader and merger (later sources win), then merge the
//! host's own inline pod section last so it always has final priority.
//! The merged result is stored back on the host in the returned registry.
//!
//! A failed fragment is recorded and the chain continues: remaining
//! fragments and the host override still apply, so a partial result is
//! produced alongside the error.

use crate::error::Error;
use crate::host::HostRegistry;
use crate::sink::ErrorSink;
use pod_fragments::{FragmentLoader, RenderVars, Section, TemplateRenderer, merge_sections};
use pod_fs::SourceLocator;
use serde_yaml::Value;

/// Resolve fragment chains for every pod host in the registry.
pub fn resolve_fragment_chains<L, R>(
    mut registry: HostRegistry,
    loader: &FragmentLoader<L, R>,
    sink: &mut ErrorSink,
) -> HostRegistry
where
    L: SourceLocator,
    R: TemplateRenderer,
{
    for hostname in registry.pod_hostnames() {
        let Some(definition) = registry.get(&hostname) else {
            continue;
        };
        let snippets = definition.snippets().to_vec();
        if snippets.is_empty() {
            continue;
        }

        // Render scope: the host's own host_vars plus the hostname.
        // Nothing produced by later passes is visible here.
        let mut vars = RenderVars::new();
        if let Some(host_vars) = &definition.host_vars {
            for (key, value) in host_vars {
                if let Some(key) = key.as_str() {
                    vars.insert(key.to_owned(), value.clone());
                }
            }
        }
        vars.insert(
            "inventory_hostname".to_owned(),
            Value::from(hostname.as_str()),
        );

        let mut accumulator = Section::new();
        for snippet in &snippets {
            match loader.load(snippet, &vars) {
                Ok(section) => accumulator = merge_sections(&accumulator, &section),
                Err(source) => sink.push(Error::Fragment {
                    host: hostname.clone(),
                    source,
                }),
            }
        }

        let inline = definition.pod.clone().unwrap_or_default();
        let resolved = merge_sections(&accumulator, &inline);
        tracing::debug!(host = %hostname, fragments = snippets.len(), "resolved fragment chain");
        if let Some(definition) = registry.get_mut(&hostname) {
            definition.pod = Some(resolved);
        }
    }
    registry
}
