use crate::app::models::RelativePath;
use std::collections::BTreeMap;

const INDENT: &str = "    ";

/// Nested directory listing built from flat relative paths.
#[derive(Debug, PartialEq, Eq)]
pub enum TreeNode {
    Dir(BTreeMap<String, TreeNode>),
    File,
}

impl TreeNode {
    pub fn build(files: &[RelativePath]) -> Self {
        let mut root = BTreeMap::new();
        for path in files {
            insert_path(&mut root, path.segments());
        }
        TreeNode::Dir(root)
    }

    fn render_into(&self, indent: usize, out: &mut String) {
        let TreeNode::Dir(children) = self else {
            return;
        };
        // BTreeMap keeps directories and files in one merged byte order.
        for (name, child) in children {
            out.push_str(&INDENT.repeat(indent));
            out.push_str(name);
            match child {
                TreeNode::File => out.push('\n'),
                TreeNode::Dir(_) => {
                    out.push_str("/\n");
                    child.render_into(indent + 1, out);
                }
            }
        }
    }
}

fn insert_path(level: &mut BTreeMap<String, TreeNode>, segments: &[String]) {
    let Some((name, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        level.insert(name.clone(), TreeNode::File);
        return;
    }
    let node = level
        .entry(name.clone())
        .or_insert_with(|| TreeNode::Dir(BTreeMap::new()));
    if let TreeNode::Dir(children) = node {
        insert_path(children, rest);
    }
}

/// Renders the indented listing of `files` without any heading.
pub fn generate_tree(files: &[RelativePath]) -> String {
    let mut out = String::new();
    TreeNode::build(files).render_into(0, &mut out);
    out
}

/// Heading plus fenced tree block, ready to append to a document.
pub fn render_tree_section(files: &[RelativePath], title: &str) -> String {
    format!("## {}\n\n```text\n{}```\n\n", title, generate_tree(files))
}
