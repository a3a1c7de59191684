use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub summary_only: bool,
    pub split_depth: usize,
    pub modules: Option<Vec<String>>,
    /// Locale file names kept under `locales/` (e.g. `en.yml`).
    pub keep_langs: HashSet<String>,
    pub strip_comments: bool,
    pub exclude: Vec<String>,
    pub names: HashMap<String, String>,
    pub strict: bool,
    /// Warnings already emitted while resolving this configuration.
    pub warnings: usize,
}

/// A file path relative to the project root, stored as its segments.
///
/// Ordering compares segment by segment, so `src/a/x.rs` sorts before
/// `src/a.rs` exactly when `"a" < "a.rs"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// Builds a relative path from `/`-separated text. Empty segments are skipped.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Converts a filesystem path that is already relative to the root.
    /// Returns `None` for paths that escape the root or are empty.
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().to_string()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Extension without the leading dot. Dotfiles like `.env` have none.
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.file_name()).extension().and_then(|e| e.to_str())
    }

    /// Name of the directory holding the file, `None` for root-level files.
    pub fn parent_name(&self) -> Option<&str> {
        let len = self.segments.len();
        if len < 2 {
            return None;
        }
        Some(self.segments[len - 2].as_str())
    }

    pub fn is_root_level(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Group key for output partitioning: a `/`-joined path prefix or `root`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub const ROOT: &'static str = "root";

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Modules in key order, each holding its files in sorted order.
pub type FileGroups = BTreeMap<ModuleKey, Vec<RelativePath>>;

/// Why the collector kept or dropped a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Included,
    ExcludedByPattern,
    NotRootConfig,
    IgnoredDir,
    IgnoredExtension,
    LocaleNotKept,
    ExtensionNotIncluded,
}

impl Inclusion {
    pub fn is_included(self) -> bool {
        self == Inclusion::Included
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Inclusion::Included => "included",
            Inclusion::ExcludedByPattern => "matches an exclude pattern",
            Inclusion::NotRootConfig => "root-level file is not a known config file",
            Inclusion::IgnoredDir => "inside an ignored directory",
            Inclusion::IgnoredExtension => "ignored extension",
            Inclusion::LocaleNotKept => "locale not in language filter",
            Inclusion::ExtensionNotIncluded => "extension not included",
        };
        f.write_str(reason)
    }
}
