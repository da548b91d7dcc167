use crate::{
    config::Config,
    error::{Error, Result},
    render::Registry,
    walker,
};
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during a build.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of files handed to the renderer
    pub files_found: usize,

    /// Number of exclusion patterns applied
    pub exclude_rules: usize,

    /// Total execution time
    pub duration: Duration,

    /// Time spent discovering files
    pub discover_duration: Duration,

    /// Time spent rendering
    pub render_duration: Duration,

    /// Output directory path
    pub output_directory: String,
}

impl PipelineStats {
    /// Prints a short human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("Files discovered:  {}", self.files_found);
        println!("Exclude patterns:  {}", self.exclude_rules);
        println!("Output directory:  {}", self.output_directory);
        println!(
            "Completed in {:.2}s (discover {:.2}s, render {:.2}s)",
            self.duration.as_secs_f64(),
            self.discover_duration.as_secs_f64(),
            self.render_duration.as_secs_f64()
        );
    }
}

/// Orchestrates a build: discover files, then hand them to the renderer.
pub struct Pipeline {
    config: Config,
    registry: Registry,
}

impl Pipeline {
    /// Creates a pipeline with the default renderer registry.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_registry(config, Registry::default())
    }

    /// Creates a pipeline with a caller-supplied renderer registry, letting
    /// external plugins participate in renderer selection.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn with_registry(config: Config, registry: Registry) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Executes the build and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Discover**: walk the source roots and apply exclusion rules
    /// 2. **Render**: resolve the configured renderer and hand it the sorted
    ///    file list
    ///
    /// # Errors
    ///
    /// Any discovery or rendering failure is fatal; no partial output is
    /// reported as success.
    #[instrument(skip(self), fields(renderer = %self.config.renderer))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Stage 1/2: Discovering source files...");
        let discover_start = Instant::now();
        let rules = self.config.exclude_rules();
        let files = walker::find_files(&self.config.paths, &rules)?;
        let discover_duration = discover_start.elapsed();

        info!(
            "✓ Discovered {} file(s) in {:.2}s",
            files.len(),
            discover_duration.as_secs_f64()
        );

        if files.is_empty() {
            warn!("No files left after applying exclusion rules");
        }

        info!("Stage 2/2: Rendering with '{}'...", self.config.renderer);
        let render_start = Instant::now();

        let renderer = self
            .registry
            .get(&self.config.renderer)
            .ok_or_else(|| {
                Error::unknown_renderer(&self.config.renderer, &self.registry.names())
            })?;

        if !self.config.keep_out_dir && self.config.output.exists() {
            debug!("Wiping output directory {}", self.config.output.display());
            fs::remove_dir_all(&self.config.output)
                .map_err(|e| Error::io(&self.config.output, e))?;
        }

        renderer.render(&files, &self.config)?;
        let render_duration = render_start.elapsed();

        let duration = start_time.elapsed();
        info!("✓ Build completed in {:.2}s", duration.as_secs_f64());

        Ok(PipelineStats {
            files_found: files.len(),
            exclude_rules: rules.len(),
            duration,
            discover_duration,
            render_duration,
            output_directory: self.config.output.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(root: &std::path::Path) -> Config {
        Config::builder()
            .paths([root])
            .output(root.join("out"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_basic_execution() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("lib/a.js").write_str("a").unwrap();
        temp.child("lib/b.js").write_str("b").unwrap();

        let config = create_test_config(temp.path());
        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.files_found, 2);
        assert!(temp.child("out/manifest.json").path().exists());
    }

    #[test]
    fn test_pipeline_applies_excludes() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("lib/a.js").write_str("a").unwrap();
        temp.child("lib/notes.markdown").write_str("n").unwrap();

        let config = Config::builder()
            .paths([temp.path()])
            .exclude(["**/*.markdown"])
            .output(temp.path().join("out"))
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(stats.files_found, 1);
        assert_eq!(stats.exclude_rules, 1);
    }

    #[test]
    fn test_pipeline_unknown_renderer() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.js").write_str("a").unwrap();

        let config = Config::builder()
            .paths([temp.path()])
            .renderer("pdf")
            .output(temp.path().join("out"))
            .build()
            .unwrap();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(err.to_string().contains("pdf"));
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_pipeline_nonexistent_root_fails() {
        let temp = assert_fs::TempDir::new().unwrap();

        let config = Config::builder()
            .paths([temp.path().join("missing")])
            .output(temp.path().join("out"))
            .build()
            .unwrap();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(err.is_io());
        assert!(!temp.child("out").path().exists());
    }

    #[test]
    fn test_pipeline_wipes_output_dir_by_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.js").write_str("a").unwrap();
        temp.child("out/stale.json").write_str("old").unwrap();

        let config = Config::builder()
            .paths([temp.path().join("src")])
            .output(temp.path().join("out"))
            .build()
            .unwrap();

        Pipeline::new(config).unwrap().run().unwrap();

        assert!(!temp.child("out/stale.json").path().exists());
        assert!(temp.child("out/manifest.json").path().exists());
    }

    #[test]
    fn test_pipeline_keeps_output_dir_when_asked() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.js").write_str("a").unwrap();
        temp.child("out/stale.json").write_str("old").unwrap();

        let config = Config::builder()
            .paths([temp.path().join("src")])
            .output(temp.path().join("out"))
            .keep_out_dir(true)
            .build()
            .unwrap();

        Pipeline::new(config).unwrap().run().unwrap();

        assert!(temp.child("out/stale.json").path().exists());
        assert!(temp.child("out/manifest.json").path().exists());
    }
}
