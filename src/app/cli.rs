use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write Markdown snapshots of a project's source, split into modules"
)]
pub struct Cli {
    /// Only generate the summary document (summary.md)
    #[arg(long)]
    pub summary: bool,

    /// Split depth: 1 = top-level directories, 2 = second level, ...
    #[arg(long)]
    pub split_depth: Option<usize>,

    /// Module keys to snapshot, comma separated (e.g. "src/core,src/app")
    #[arg(long, value_delimiter = ',')]
    pub modules: Option<Vec<String>>,

    /// Locale files to keep, comma separated (e.g. "zh-CN,en")
    #[arg(long, value_delimiter = ',')]
    pub lang: Option<Vec<String>>,

    /// Remove single-line comments and blank lines from Rust sources
    #[arg(long)]
    pub strip_comments: bool,

    /// Directory the documents are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Project root to snapshot
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Glob patterns for files to leave out (e.g. 'src/generated/**')
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Exit with status 3 if any warning was emitted
    #[arg(long)]
    pub strict: bool,
}
