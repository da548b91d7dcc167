use crate::error::{Error, Result};
use crate::exclude::ExcludeRule;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "out";
const DEFAULT_RENDERER: &str = "json";
const DEFAULT_TITLE: &str = "{package.name} {package.version} API documentation";

/// Configuration for a docsmith build.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Source file and directory locations to scan
    pub paths: Vec<PathBuf>,

    /// Glob patterns of filenames to exclude (wildcards: `?`, `*`, `**`)
    pub exclude: Vec<String>,

    /// Resulting file(s) location
    pub output: PathBuf,

    /// Documentation title template; `{package.*}` variables are interpolated
    /// by the renderer
    pub title: String,

    /// Renderer name, resolved against the renderer registry
    pub renderer: String,

    /// Split the output into a file per documented class
    pub split: bool,

    /// Prefix prepended to output file names
    pub prefix: Option<String>,

    /// Suffix appended to output file names
    pub suffix: Option<String>,

    /// Do not wipe the output directory before building
    pub keep_out_dir: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsmith::Config;
    ///
    /// let config = Config::builder()
    ///     .paths(["lib"])
    ///     .exclude(["**/*.markdown"])
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no source paths are supplied or the renderer name
    /// is empty. Exclude patterns are validated later, when they are compiled
    /// for traversal.
    pub fn validate(&self) -> Result<()> {
        if self.paths.iter().all(|p| p.as_os_str().is_empty()) {
            return Err(Error::config("at least one source path is required"));
        }

        if self.renderer.is_empty() {
            return Err(Error::config("renderer name must not be empty"));
        }

        Ok(())
    }

    /// Returns the exclude patterns as exclusion rules.
    ///
    /// Predicate rules cannot be expressed on the command line; callers that
    /// need them use [`crate::walker::find_files`] directly.
    #[must_use]
    pub fn exclude_rules(&self) -> Vec<ExcludeRule> {
        self.exclude.iter().map(ExcludeRule::pattern).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            title: DEFAULT_TITLE.to_string(),
            renderer: DEFAULT_RENDERER.to_string(),
            split: true,
            prefix: None,
            suffix: None,
            keep_out_dir: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    paths: Vec<PathBuf>,
    exclude: Vec<String>,
    output: Option<PathBuf>,
    title: Option<String>,
    renderer: Option<String>,
    split: Option<bool>,
    prefix: Option<String>,
    suffix: Option<String>,
    keep_out_dir: bool,
}

impl ConfigBuilder {
    /// Sets the source paths to scan.
    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the glob patterns of filenames to exclude.
    #[must_use]
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output location.
    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the documentation title template.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the renderer name.
    #[must_use]
    pub fn renderer(mut self, name: impl Into<String>) -> Self {
        self.renderer = Some(name.into());
        self
    }

    /// Enables or disables per-class output splitting.
    #[must_use]
    pub fn split(mut self, enabled: bool) -> Self {
        self.split = Some(enabled);
        self
    }

    /// Sets the output file name prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the output file name suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Keeps the output directory instead of wiping it before building.
    #[must_use]
    pub fn keep_out_dir(mut self, enabled: bool) -> Self {
        self.keep_out_dir = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let config = Config {
            paths: self.paths,
            exclude: self.exclude,
            output: self.output.unwrap_or(defaults.output),
            title: self.title.unwrap_or(defaults.title),
            renderer: self.renderer.unwrap_or(defaults.renderer),
            split: self.split.unwrap_or(defaults.split),
            prefix: self.prefix,
            suffix: self.suffix,
            keep_out_dir: self.keep_out_dir,
        };

        config.validate()?;
        Ok(config)
    }
}
