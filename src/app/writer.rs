use crate::app::formatter::ContentRenderer;
use crate::app::models::{FileGroups, ModuleKey, RelativePath, RuntimeConfig};
use crate::app::tree::render_tree_section;
use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

pub const SUMMARY_FILE: &str = "summary.md";
const DOC_EXTENSION: &str = "md";

/// Built-in display names, keyed by module key.
const MODULE_NAMES: &[(&str, &str)] = &[
    ("src", "Source"),
    ("tests", "Tests"),
    ("benches", "Benchmarks"),
    ("locales", "Localization"),
    ("examples", "Examples"),
    (ModuleKey::ROOT, "Root Files"),
    ("src/core", "Core"),
    ("src/app", "App"),
    ("src/ui", "UI"),
    ("src/tools", "Tools"),
    ("src/render", "Render"),
    ("src/format", "Format"),
    ("src/history", "History"),
    ("src/animation", "Animation"),
];

const SUMMARY_FOOTER: &str = "## Getting Detailed Code\n\n\
If you need the full code of a module, name its module key (e.g. `src/core`, `src/app`) \
and a snapshot for that module will be generated.\n";

/// Looks up display names, preferring overrides from the active preset.
pub struct NameMap {
    overrides: HashMap<String, String>,
}

impl NameMap {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn display_name<'a>(&'a self, key: &'a ModuleKey) -> &'a str {
        let key = key.as_str();
        if let Some(name) = self.overrides.get(key) {
            return name;
        }
        MODULE_NAMES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| *name)
            .unwrap_or(key)
    }
}

/// Short canned description for the summary's module index.
pub fn describe(key: &ModuleKey) -> String {
    match key.as_str() {
        "src" => "Core source code".to_string(),
        "tests" => "Integration tests".to_string(),
        "locales" => "Localization files".to_string(),
        k if k.starts_with("src/") => format!("Source submodule `{}`", k),
        _ => "(no description)".to_string(),
    }
}

fn sanitize(name: &str) -> String {
    name.replace('/', "_")
}

/// Writes snapshot documents into the output directory.
///
/// Output file names are unique within one run, compared case-insensitively:
/// when a module's name is already taken the raw key is appended, then a
/// counter.
pub struct DocumentWriter<'a> {
    config: &'a RuntimeConfig,
    names: NameMap,
    renderer: ContentRenderer<'a>,
    used: HashSet<String>,
    warnings: usize,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self {
            config,
            names: NameMap::new(config.names.clone()),
            renderer: ContentRenderer::new(&config.root, config.strip_comments),
            used: HashSet::from([SUMMARY_FILE.to_string()]),
            warnings: 0,
        }
    }

    /// Warnings raised so far (name collisions, unreadable files).
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    fn is_taken(&self, file_name: &str) -> bool {
        self.used.contains(&file_name.to_lowercase())
    }

    fn allocate_file_name(&mut self, key: &ModuleKey) -> String {
        let base = sanitize(self.names.display_name(key));
        let mut file_name = format!("{}.{}", base, DOC_EXTENSION);
        if self.is_taken(&file_name) {
            let suffixed = format!("{}-{}", base, sanitize(key.as_str()));
            file_name = format!("{}.{}", suffixed, DOC_EXTENSION);
            let mut n = 2;
            while self.is_taken(&file_name) {
                file_name = format!("{}-{}.{}", suffixed, n, DOC_EXTENSION);
                n += 1;
            }
            log::warn!(
                "Output name for module '{}' collides with another document, writing {} instead",
                key,
                file_name
            );
            self.warnings += 1;
        }
        self.used.insert(file_name.to_lowercase());
        file_name
    }

    fn write_document(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let output_file = self.config.output_dir.join(file_name);
        fs::write(&output_file, content)
            .with_context(|| format!("Failed to write {}", output_file.display()))?;
        Ok(output_file)
    }

    pub fn render_summary(&self, modules: &FileGroups) -> String {
        let mut out = String::from("# Project Summary\n\n");
        out.push_str(&format!(
            "## Project Structure (split depth: {})\n\n",
            self.config.split_depth
        ));

        let mut all_files: Vec<RelativePath> = modules.values().flatten().cloned().collect();
        all_files.sort();
        out.push_str(&render_tree_section(&all_files, "Full Project Tree"));

        out.push_str("## Modules\n\n");
        for key in modules.keys() {
            out.push_str(&format!(
                "- **{}** (`{}`): {}\n",
                self.names.display_name(key),
                key,
                describe(key)
            ));
        }

        out.push('\n');
        out.push_str(SUMMARY_FOOTER);
        out
    }

    pub fn write_summary(&self, modules: &FileGroups) -> Result<PathBuf> {
        let output_file = self.write_document(SUMMARY_FILE, &self.render_summary(modules))?;
        println!("Generated: {}", output_file.display());
        Ok(output_file)
    }

    pub fn render_module(&mut self, key: &ModuleKey, files: &[RelativePath]) -> String {
        let name = self.names.display_name(key).to_string();
        let mut out = format!("# Module: {}\n\n", name);
        out.push_str(&render_tree_section(files, &format!("{} File Tree", name)));
        out.push_str("## Source Details\n\n");
        for path in files {
            let (section, failed) = self.renderer.render_file(path);
            if failed {
                self.warnings += 1;
            }
            out.push_str(&section);
        }
        out
    }

    pub fn write_module_snapshot(
        &mut self,
        key: &ModuleKey,
        files: &[RelativePath],
    ) -> Result<PathBuf> {
        let file_name = self.allocate_file_name(key);
        let content = self.render_module(key, files);
        let output_file = self.write_document(&file_name, &content)?;
        println!("Generated: {}", output_file.display());
        Ok(output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(root: &Path, out: &Path, names: &[(&str, &str)]) -> RuntimeConfig {
        RuntimeConfig {
            root: root.to_path_buf(),
            output_dir: out.to_path_buf(),
            summary_only: false,
            split_depth: 2,
            modules: None,
            keep_langs: HashSet::new(),
            strip_comments: false,
            exclude: Vec::new(),
            names: names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            strict: false,
            warnings: 0,
        }
    }

    fn groups(items: &[(&str, &[&str])]) -> FileGroups {
        items
            .iter()
            .map(|(k, files)| {
                (
                    ModuleKey::new(*k),
                    files.iter().map(|f| RelativePath::new(f)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn display_names_fall_back_to_key() {
        let names = NameMap::new(HashMap::from([("src/ui".to_string(), "Widgets".to_string())]));
        assert_eq!(names.display_name(&ModuleKey::new("src")), "Source");
        assert_eq!(names.display_name(&ModuleKey::root()), "Root Files");
        assert_eq!(names.display_name(&ModuleKey::new("src/ui")), "Widgets");
        assert_eq!(names.display_name(&ModuleKey::new("docs/api")), "docs/api");
    }

    #[test]
    fn descriptions_match_key_shape() {
        assert_eq!(describe(&ModuleKey::new("src")), "Core source code");
        assert_eq!(describe(&ModuleKey::new("tests")), "Integration tests");
        assert_eq!(describe(&ModuleKey::new("locales")), "Localization files");
        assert_eq!(
            describe(&ModuleKey::new("src/core")),
            "Source submodule `src/core`"
        );
        assert_eq!(describe(&ModuleKey::new("benches")), "(no description)");
    }

    #[test]
    fn summary_lists_tree_and_modules() {
        let tmp = TempDir::new().expect("tmp dir");
        let config = config(tmp.path(), tmp.path(), &[]);
        let writer = DocumentWriter::new(&config);
        let modules = groups(&[
            ("root", &["Cargo.toml"]),
            ("src/core", &["src/core/a.rs"]),
            ("tools", &["tools/gen.rs"]),
        ]);

        let summary = writer.render_summary(&modules);
        assert!(summary.starts_with("# Project Summary\n\n## Project Structure (split depth: 2)\n\n"));
        assert!(summary.contains(
            "## Full Project Tree\n\n```text\nCargo.toml\nsrc/\n    core/\n        a.rs\ntools/\n    gen.rs\n```\n\n"
        ));
        assert!(summary.contains("- **Root Files** (`root`): (no description)\n"));
        assert!(summary.contains("- **Core** (`src/core`): Source submodule `src/core`\n"));
        assert!(summary.contains("- **tools** (`tools`): (no description)\n"));
        assert!(summary.ends_with(SUMMARY_FOOTER));
    }

    #[test]
    fn module_snapshot_is_written_under_display_name() {
        let tmp = TempDir::new().expect("tmp dir");
        let out = tmp.path().join("out");
        fs::create_dir_all(tmp.path().join("docs/api")).expect("mkdir");
        fs::create_dir_all(&out).expect("mkdir out");
        fs::write(tmp.path().join("docs/api/index.md"), "# API\n").expect("write");
        let config = config(tmp.path(), &out, &[]);
        let mut writer = DocumentWriter::new(&config);

        let key = ModuleKey::new("docs/api");
        let path = writer
            .write_module_snapshot(&key, &[RelativePath::new("docs/api/index.md")])
            .expect("write");
        assert_eq!(path, out.join("docs_api.md"));

        let doc = fs::read_to_string(path).expect("read back");
        assert!(doc.starts_with("# Module: docs/api\n\n## docs/api File Tree\n\n"));
        assert!(doc.contains("## Source Details\n\n### File: docs/api/index.md\n```md\n# API\n"));
        assert_eq!(writer.warnings(), 0);
    }

    #[test]
    fn colliding_names_get_distinct_files() {
        let tmp = TempDir::new().expect("tmp dir");
        let config = config(
            tmp.path(),
            tmp.path(),
            &[("a", "Shared"), ("b", "Shared"), ("c", "summary")],
        );
        let mut writer = DocumentWriter::new(&config);

        let a = writer.write_module_snapshot(&ModuleKey::new("a"), &[]).expect("a");
        let b = writer.write_module_snapshot(&ModuleKey::new("b"), &[]).expect("b");
        let c = writer.write_module_snapshot(&ModuleKey::new("c"), &[]).expect("c");
        assert_eq!(a, tmp.path().join("Shared.md"));
        assert_eq!(b, tmp.path().join("Shared-b.md"));
        assert_eq!(c, tmp.path().join("summary-c.md"));
        assert_eq!(writer.warnings(), 2);
    }

    #[test]
    fn names_differing_only_in_case_collide() {
        let tmp = TempDir::new().expect("tmp dir");
        let config = config(
            tmp.path(),
            tmp.path(),
            &[("a", "Notes"), ("b", "notes"), ("c", "Summary")],
        );
        let mut writer = DocumentWriter::new(&config);

        let a = writer.write_module_snapshot(&ModuleKey::new("a"), &[]).expect("a");
        let b = writer.write_module_snapshot(&ModuleKey::new("b"), &[]).expect("b");
        let c = writer.write_module_snapshot(&ModuleKey::new("c"), &[]).expect("c");
        assert_eq!(a, tmp.path().join("Notes.md"));
        assert_eq!(b, tmp.path().join("notes-b.md"));
        assert_eq!(c, tmp.path().join("Summary-c.md"));
        assert_eq!(writer.warnings(), 2);
    }

    #[test]
    fn unreadable_files_count_as_warnings() {
        let tmp = TempDir::new().expect("tmp dir");
        let config = config(tmp.path(), tmp.path(), &[]);
        let mut writer = DocumentWriter::new(&config);
        let doc = writer.render_module(&ModuleKey::new("src"), &[RelativePath::new("src/gone.rs")]);
        assert!(doc.contains("Failed to read file: "));
        assert_eq!(writer.warnings(), 1);
    }
}
