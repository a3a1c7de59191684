use crate::app::models::{FileGroups, ModuleKey, RelativePath};

/// Module key for a file at the given split depth.
///
/// Root-level files always land in `root`. Otherwise at least one directory
/// segment is kept and the file name itself never becomes part of the key.
pub fn module_key(path: &RelativePath, depth: usize) -> ModuleKey {
    let segments = path.segments();
    if segments.len() <= 1 {
        return ModuleKey::root();
    }
    let take = depth.max(1).min(segments.len() - 1);
    ModuleKey::new(segments[..take].join("/"))
}

/// Partitions sorted files into modules, keeping their order within each group.
pub fn group_by_depth(files: &[RelativePath], depth: usize) -> FileGroups {
    let mut modules = FileGroups::new();
    for path in files {
        modules
            .entry(module_key(path, depth))
            .or_default()
            .push(path.clone());
    }
    modules
}
