//! Renderer plugin registry.
//!
//! Rendering itself is an external concern; the front end only owns the
//! registry that maps renderer names to implementations and the built-in
//! `json` renderer, which writes a manifest of the discovered files.
//! External plugins register through [`Registry::register`], and
//! [`Registry::names`] supplies the valid choices for CLI validation on
//! demand.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// A documentation renderer.
///
/// Implementations receive the sorted, deduplicated file list produced by
/// [`crate::walker::find_files`] together with the build configuration.
pub trait Renderer: Send + Sync {
    /// Name under which the renderer is registered and selected.
    fn name(&self) -> &str;

    /// Renders documentation for the discovered files.
    ///
    /// # Errors
    ///
    /// Implementations surface their own failures; the pipeline treats any
    /// error as fatal for the build.
    fn render(&self, files: &[PathBuf], config: &Config) -> Result<()>;
}

/// Registry of available renderers, keyed by name.
pub struct Registry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Registers a renderer under its own name, replacing any renderer
    /// previously registered under that name.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.name().to_string(), renderer);
    }

    /// Looks up a renderer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Renderer> {
        self.renderers.get(name).map(|r| &**r)
    }

    /// Returns the registered renderer names, sorted.
    ///
    /// This is the deferred choice list consulted once before argument
    /// validation, so plugins registered at startup are accepted by the CLI.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.renderers.keys().cloned().collect()
    }
}

impl Default for Registry {
    /// A registry with the built-in `json` renderer.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(JsonRenderer));
        registry
    }
}

/// Built-in renderer that writes the discovered file list as a JSON manifest.
pub struct JsonRenderer;

#[derive(Serialize)]
struct Manifest<'a> {
    title: &'a str,
    generated: String,
    split: bool,
    files: Vec<String>,
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, files: &[PathBuf], config: &Config) -> Result<()> {
        fs::create_dir_all(&config.output).map_err(|e| Error::io(&config.output, e))?;

        let manifest = Manifest {
            title: &config.title,
            generated: chrono::Utc::now().to_rfc3339(),
            split: config.split,
            files: files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        };

        let name = format!(
            "{}manifest{}.json",
            config.prefix.as_deref().unwrap_or(""),
            config.suffix.as_deref().unwrap_or("")
        );
        let target = config.output.join(name);

        let body = serde_json::to_string_pretty(&manifest)?;
        fs::write(&target, body).map_err(|e| Error::io(&target, e))?;

        debug!("Wrote manifest for {} file(s)", files.len());
        info!("✓ Manifest written to {}", target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    struct FakeRenderer;

    impl Renderer for FakeRenderer {
        fn name(&self) -> &str {
            "html"
        }

        fn render(&self, _files: &[PathBuf], _config: &Config) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_registry_has_json() {
        let registry = Registry::default();
        assert!(registry.get("json").is_some());
        assert_eq!(registry.names(), vec!["json"]);
    }

    #[test]
    fn test_register_external_renderer() {
        let mut registry = Registry::default();
        registry.register(Box::new(FakeRenderer));

        assert!(registry.get("html").is_some());
        assert_eq!(registry.names(), vec!["html", "json"]);
    }

    #[test]
    fn test_unknown_name_not_found() {
        let registry = Registry::default();
        assert!(registry.get("pdf").is_none());
    }

    #[test]
    fn test_empty_registry_starts_without_builtins() {
        // Embedders that want full control build up from an empty registry.
        let mut registry = Registry::empty();
        assert!(registry.names().is_empty());
        assert!(registry.get("json").is_none());

        registry.register(Box::new(FakeRenderer));
        assert_eq!(registry.names(), vec!["html"]);
    }

    #[test]
    fn test_json_renderer_writes_manifest() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .paths(["lib"])
            .output(temp.path().join("out"))
            .title("Test Docs")
            .build()
            .unwrap();

        let files = vec![PathBuf::from("lib/a.js"), PathBuf::from("lib/b.js")];
        JsonRenderer.render(&files, &config).unwrap();

        let manifest = temp.child("out/manifest.json");
        let body = std::fs::read_to_string(manifest.path()).unwrap();
        assert!(body.contains("Test Docs"));
        assert!(body.contains("lib/a.js"));
        assert!(body.contains("lib/b.js"));
    }

    #[test]
    fn test_json_renderer_honors_prefix_and_suffix() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .paths(["lib"])
            .output(temp.path().join("out"))
            .prefix("v2-")
            .suffix("-draft")
            .build()
            .unwrap();

        JsonRenderer.render(&[], &config).unwrap();
        assert!(temp.child("out/v2-manifest-draft.json").path().exists());
    }
}
