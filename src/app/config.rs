use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Locale files kept when `--lang` is not given.
pub const DEFAULT_LANGS: &[&str] = &["zh-CN", "en"];
pub const LOCALE_EXTENSION: &str = "yml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("split depth must be a positive integer, got {0}")]
    InvalidSplitDepth(usize),
    #[error("{0} contains an empty entry")]
    EmptyEntry(&'static str),
    #[error("{0} needs at least one non-empty entry")]
    EmptyList(&'static str),
    #[error("invalid language code '{0}'")]
    InvalidLanguage(String),
}

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    split_depth: Option<usize>,
    lang: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    strip_comments: Option<bool>,
    names: Option<HashMap<String, String>>,
}

/// `~/.config/project_snapshot/presets.toml`, `None` without a home directory.
fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home
        .join(".config")
        .join("project_snapshot")
        .join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn parse_modules(raw: Vec<String>) -> Result<Vec<String>, ConfigError> {
    let mut seen = HashSet::new();
    let modules: Vec<String> = raw
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty() && seen.insert(m.to_string()))
        .map(str::to_string)
        .collect();
    if modules.is_empty() {
        return Err(ConfigError::EmptyList("--modules"));
    }
    Ok(modules)
}

/// Turns locale codes into the file names kept under `locales/`.
fn parse_langs(codes: &[String]) -> Result<HashSet<String>, ConfigError> {
    let mut keep = HashSet::new();
    for code in codes {
        let code = code.trim();
        if code.is_empty() {
            return Err(ConfigError::EmptyEntry("--lang"));
        }
        if code.contains(['/', '\\']) {
            return Err(ConfigError::InvalidLanguage(code.to_string()));
        }
        keep.insert(format!("{}.{}", code, LOCALE_EXTENSION));
    }
    Ok(keep)
}

/// Creates the output directory (and parents) when missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets_file = presets_path();
    if presets_file.is_none() {
        log::debug!("No home directory, skipping presets");
    }
    resolve_config_with(cli, presets_file.as_deref())
}

fn resolve_config_with(cli: Cli, presets_file: Option<&Path>) -> Result<RuntimeConfig> {
    let presets = match presets_file {
        Some(path) => load_presets_file(path)?,
        None => HashMap::new(),
    };
    let mut warnings = 0;

    // Determine preset to use: CLI flag > Auto-detect > None
    let project_name = fs::canonicalize(&cli.root)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()));
    let preset_key = cli.preset.clone().or(project_name);
    let preset = preset_key
        .as_deref()
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();
    if let Some(key) = cli.preset.as_deref() {
        if !presets.contains_key(key) {
            match presets_file {
                Some(path) => log::warn!("Preset '{}' not found in {}", key, path.display()),
                None => log::warn!("Preset '{}' not found: no presets file", key),
            }
            warnings += 1;
        }
    }

    let split_depth = cli.split_depth.or(preset.split_depth).unwrap_or(1);
    if split_depth == 0 {
        return Err(ConfigError::InvalidSplitDepth(split_depth).into());
    }

    let keep_langs = match cli.lang.or(preset.lang) {
        Some(codes) => parse_langs(&codes)?,
        None => DEFAULT_LANGS
            .iter()
            .map(|code| format!("{}.{}", code, LOCALE_EXTENSION))
            .collect(),
    };

    let modules = cli.modules.map(parse_modules).transpose()?;

    let config = RuntimeConfig {
        root: cli.root,
        output_dir: cli.output_dir,
        summary_only: cli.summary,
        split_depth,
        modules,
        keep_langs,
        strip_comments: cli.strip_comments || preset.strip_comments.unwrap_or(false),
        exclude: merge_vecs(preset.exclude, cli.exclude),
        names: preset.names.unwrap_or_default(),
        strict: cli.strict,
        warnings,
    };

    ensure_output_dir(&config.output_dir)?;

    Ok(config)
}
