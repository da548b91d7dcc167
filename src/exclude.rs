//! Rule-based exclusion of filesystem entries.
//!
//! An exclusion rule is either a glob pattern (`*`, `**`, `?`; semantics come
//! from the `globset` crate) matched against the entry's path string, or a
//! caller-supplied predicate over `(path, metadata)`. Rules are combined with
//! OR semantics: an entry is excluded as soon as any rule matches.
//!
//! Patterns are compiled once, ahead of traversal, by [`ExcludeSet::compile`].

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Predicate over a path and its metadata; `true` means exclude.
pub type Predicate = Arc<dyn Fn(&Path, &EntryMeta) -> bool + Send + Sync>;

/// Minimal stat-like record for a filesystem entry, obtained without
/// following symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryMeta {
    /// Entry is a directory
    pub is_dir: bool,

    /// Entry is a symbolic link
    pub is_symlink: bool,
}

impl EntryMeta {
    /// Builds metadata from a `std::fs::Metadata` record.
    ///
    /// Pass metadata obtained via `fs::symlink_metadata` so symlinks report
    /// their link status rather than their target's.
    #[must_use]
    pub fn from_metadata(meta: &fs::Metadata) -> Self {
        Self::from_file_type(meta.file_type())
    }

    /// Builds metadata from a file type.
    #[must_use]
    pub fn from_file_type(ft: fs::FileType) -> Self {
        Self {
            is_dir: ft.is_dir(),
            is_symlink: ft.is_symlink(),
        }
    }
}

/// A single exclusion rule.
#[derive(Clone)]
pub enum ExcludeRule {
    /// Glob pattern matched against the entry's path string.
    Pattern(String),

    /// Predicate invoked with the entry's path and metadata.
    Predicate(Predicate),
}

impl ExcludeRule {
    /// Creates a glob-pattern rule.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Creates a predicate rule.
    ///
    /// The `(path, metadata)` shape exists so callers can inspect the
    /// symlink and directory flags:
    ///
    /// ```
    /// use docsmith::ExcludeRule;
    ///
    /// let skip_symlinks = ExcludeRule::predicate(|_path, meta| meta.is_symlink);
    /// ```
    #[must_use]
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Path, &EntryMeta) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }
}

impl fmt::Debug for ExcludeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::Predicate(_) => f.debug_tuple("Predicate").field(&"<fn>").finish(),
        }
    }
}

/// A compiled set of exclusion rules exposing one uniform test.
#[derive(Clone)]
pub struct ExcludeSet {
    patterns: GlobSet,
    predicates: Vec<Predicate>,
}

impl fmt::Debug for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeSet")
            .field("patterns", &self.patterns.len())
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl ExcludeSet {
    /// Compiles the given rules into a reusable matcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] for a malformed glob pattern.
    pub fn compile(rules: &[ExcludeRule]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut predicates = Vec::new();

        for rule in rules {
            match rule {
                ExcludeRule::Pattern(pattern) => {
                    let glob = Glob::new(pattern)
                        .map_err(|e| Error::pattern(pattern, e.to_string()))?;
                    builder.add(glob);
                }
                ExcludeRule::Predicate(pred) => predicates.push(Arc::clone(pred)),
            }
        }

        let patterns = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build glob set: {e}")))?;

        Ok(Self {
            patterns,
            predicates,
        })
    }

    /// Tests whether `path` is excluded by any rule.
    ///
    /// An empty rule set excludes nothing.
    #[must_use]
    pub fn is_match(&self, path: &Path, meta: &EntryMeta) -> bool {
        self.patterns.is_match(path) || self.predicates.iter().any(|pred| pred(path, meta))
    }

    /// Returns the number of compiled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len() + self.predicates.len()
    }

    /// Returns true if no rules were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
