use crate::app::models::RelativePath;
use std::fs;
use std::path::Path;

const COMMENT_MARKER: &str = "//";
const DOC_COMMENT_MARKER: &str = "///";

/// Fence tag for a file, derived from its extension.
pub fn language_tag(path: &RelativePath) -> &str {
    match path.extension() {
        Some("yml") => "yaml",
        Some("rs") => "rust",
        Some(ext) => ext,
        None => "",
    }
}

/// Drops `//` comment lines (keeping `///` doc lines) and blank lines.
///
/// This is a line-prefix heuristic, not a lexer: a `//` that starts a line
/// inside a string literal or block comment is removed as well, and `//!`
/// inner doc comments are treated as plain comments.
pub fn strip_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !(trimmed.starts_with(COMMENT_MARKER) && !trimmed.starts_with(DOC_COMMENT_MARKER))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ContentRenderer<'a> {
    root: &'a Path,
    strip_comments: bool,
}

impl<'a> ContentRenderer<'a> {
    pub fn new(root: &'a Path, strip_comments: bool) -> Self {
        Self {
            root,
            strip_comments,
        }
    }

    /// Renders one file as a heading plus fenced block.
    ///
    /// A file that cannot be read is rendered with an error note in place of
    /// its content; the second value reports whether that happened.
    pub fn render_file(&self, path: &RelativePath) -> (String, bool) {
        let lang = language_tag(path);
        let mut out = format!("### File: {}\n```{}\n", path, lang);

        let failed = match fs::read_to_string(self.root.join(path.to_path())) {
            Ok(content) => {
                if self.strip_comments && lang == "rust" {
                    out.push_str(&strip_comments(&content));
                } else {
                    out.push_str(&content);
                }
                false
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path, e);
                out.push_str(&format!("Failed to read file: {}", e));
                true
            }
        };

        out.push_str("\n```\n\n");
        (out, failed)
    }
}
