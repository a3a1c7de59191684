use crate::app::models::{Inclusion, RelativePath, RuntimeConfig};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Files kept directly under the project root.
pub const ROOT_CONFIGS: &[&str] = &["Cargo.toml", "README.md", "LICENSE"];
/// Directories never descended into.
pub const IGNORE_DIRS: &[&str] = &[
    "target",
    ".git",
    ".idea",
    ".vscode",
    "node_modules",
    "__pycache__",
];
pub const IGNORE_EXTS: &[&str] = &["lock", "log", "bak", "swp", "tmp"];
pub const INCLUDE_EXTS: &[&str] = &["rs", "toml", "yml", "yaml", "md"];
pub const LOCALES_DIR: &str = "locales";

/// Files found by a walk, plus how many entries could not be read.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub files: Vec<RelativePath>,
    pub walk_errors: usize,
}

pub struct Scanner {
    root: PathBuf,
    exclude_set: GlobSet,
    keep_langs: HashSet<String>,
}

impl Scanner {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root: config.root.clone(),
            exclude_set: build_globset(&config.exclude)?,
            keep_langs: config.keep_langs.clone(),
        })
    }

    /// Walks the root and returns every included file, sorted.
    ///
    /// Ignored directories are pruned during the walk. Symlinks are not
    /// followed, so a link cycle can never be entered.
    pub fn scan(&self) -> ScanOutput {
        let mut output = ScanOutput::default();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && is_ignored_dir(&entry.file_name().to_string_lossy()))
            })
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(relative) = self.process_entry(entry.path()) {
                        output.files.push(relative);
                    }
                }
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    output.walk_errors += 1;
                }
            }
        }

        output.files.sort();
        output
    }

    fn process_entry(&self, path: &Path) -> Option<RelativePath> {
        if path == self.root || !path.is_file() {
            return None;
        }

        let relative = RelativePath::from_path(&diff_paths(path, &self.root)?)?;
        let verdict = self.classify(&relative);
        if !verdict.is_included() {
            log::trace!("Skipping {}: {}", relative, verdict);
            return None;
        }
        Some(relative)
    }

    /// Decides whether a relative path belongs in the snapshot.
    pub fn classify(&self, path: &RelativePath) -> Inclusion {
        if self.exclude_set.is_match(path.to_path()) {
            return Inclusion::ExcludedByPattern;
        }

        if path.is_root_level() {
            return if ROOT_CONFIGS.contains(&path.file_name()) {
                Inclusion::Included
            } else {
                Inclusion::NotRootConfig
            };
        }

        if path.segments().iter().any(|s| is_ignored_dir(s)) {
            return Inclusion::IgnoredDir;
        }

        let ext = path.extension();
        if ext.is_some_and(|e| IGNORE_EXTS.contains(&e)) {
            return Inclusion::IgnoredExtension;
        }

        if path.parent_name() == Some(LOCALES_DIR) && !self.keep_langs.contains(path.file_name()) {
            return Inclusion::LocaleNotKept;
        }

        if ext.is_some_and(|e| INCLUDE_EXTS.contains(&e)) {
            Inclusion::Included
        } else {
            Inclusion::ExtensionNotIncluded
        }
    }
}

fn is_ignored_dir(name: &str) -> bool {
    IGNORE_DIRS.contains(&name)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
