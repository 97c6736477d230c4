//! Step builders generated by `build.rs` and included next to their targets.

pub mod config;
pub mod geometry;
pub mod store;

/// Crate-root target: its builder file has no `// module:` line.
#[buildergen::record_builder]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

buildergen::include_builder!("VersionBuilder");
