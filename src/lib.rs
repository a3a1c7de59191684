//! Markdown snapshots of a project's source tree, split into modules for
//! pasting into review or analysis tools.

pub mod app;
