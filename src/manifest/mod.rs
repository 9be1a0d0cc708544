//! Gomfile entries and manifest handling
//!
//! A `Gomfile` is a line-oriented list of dependencies:
//!
//! ```text
//! gom 'github.com/mattn/go-sqlite3'
//! gom 'github.com/stretchr/testify', :group => 'test'
//! gom 'golang.org/x/sys/unix', :goos => ['linux', 'darwin']
//! ```
//!
//! Each line becomes a [`Dependency`]: an import path plus an option map. The
//! recognized options are `group` (build context), `goos` (target OS) and `commit`
//! (pinned revision, only ever set by lock generation); any other option is kept
//! and rendered back unchanged.
//!
//! # Modules
//!
//! - [`parser`] - Turns Gomfile text into entries, including `group`/`platform` blocks
//! - [`filter`] - Decides which entries apply to the current [`filter::BuildContext`]

pub mod filter;
pub mod parser;

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use crate::utils::fs::write_new_file;

/// Option key restricting an entry to build contexts.
pub const OPTION_GROUP: &str = "group";
/// Option key restricting an entry to target operating systems.
pub const OPTION_GOOS: &str = "goos";
/// Option key carrying the pinned revision.
pub const OPTION_COMMIT: &str = "commit";

/// Value of a Gomfile option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// `'text'`, `"text"` or `:symbol`
    Str(String),
    /// `['a', :b]`
    List(Vec<String>),
    /// `true` / `false`
    Bool(bool),
}

impl OptionValue {
    /// Returns the string values this option carries (empty for booleans).
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Str(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Bool(_) => Vec::new(),
        }
    }

    /// Returns the value if this is a single string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            Self::List(items) => {
                let quoted: Vec<String> = items.iter().map(|i| format!("'{i}'")).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A single Gomfile entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Import path of the dependency
    pub name: String,
    /// Options keyed by name, rendered in key order
    pub options: BTreeMap<String, OptionValue>,
}

impl Dependency {
    /// Creates an entry without options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    /// Builder-style option setter.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the option stored under `key`.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Returns the pinned revision, if any.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.option(OPTION_COMMIT).and_then(OptionValue::as_str)
    }

    /// Pins the entry to `revision`.
    pub fn set_commit(&mut self, revision: impl Into<String>) {
        self.options.insert(OPTION_COMMIT.to_string(), OptionValue::Str(revision.into()));
    }

    /// Renders the full Gomfile line (without trailing newline).
    #[must_use]
    pub fn to_gomfile_line(&self) -> String {
        let mut line = format!("gom '{}'", self.name);
        for (key, value) in &self.options {
            line.push_str(&format!(", :{key} => {value}"));
        }
        line
    }
}

/// An ordered, name-unique list of dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Entries in declaration order
    pub entries: Vec<Dependency>,
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manifest from scanned import paths, sorted by name.
    #[must_use]
    pub fn from_imports(imports: &BTreeSet<String>) -> Self {
        let mut manifest = Self::new();
        for name in imports {
            manifest.insert(Dependency::new(name.clone()));
        }
        manifest.sort();
        manifest
    }

    /// Adds an entry. A later entry with the same name replaces the earlier one
    /// in place.
    pub fn insert(&mut self, dep: Dependency) {
        if let Some(existing) = self.entries.iter_mut().find(|d| d.name == dep.name) {
            *existing = dep;
        } else {
            self.entries.push(dep);
        }
    }

    /// Sorts entries lexicographically by name.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// Renders the manifest, one line per entry, in current order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for dep in &self.entries {
            out.push_str(&dep.to_gomfile_line());
            out.push('\n');
        }
        out
    }

    /// Reads and parses a Gomfile.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        Ok(parser::parse(&content, &file)?)
    }

    /// Writes the manifest to a new file, refusing to overwrite.
    pub fn write_new(&self, path: &Path) -> Result<()> {
        write_new_file(path, &self.render())
    }
}

impl IntoIterator for Manifest {
    type Item = Dependency;
    type IntoIter = std::vec::IntoIter<Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
