//! Typestate step builders.
//!
//! A step builder makes the compiler check that every component of a value
//! is set, in declaration order, before `build()` can be called:
//!
//! ```ignore
//! let point = PointBuilder::new().set_x(1).set_y(2).build();
//! ```
//!
//! Builders come from two markers:
//!
//! - `#[record_builder]` on a struct with named fields (or a unit struct)
//! - `#[instance_builder]` on an associated function acting as a constructor
//!
//! The `buildergen-build` crate generates them from `build.rs`; the generated
//! files are then pulled in with [`include_builder!`]. A struct marked
//! `#[record_builder(inline)]` gets its builder expanded in place instead.

pub use buildergen_macros::{instance_builder, record_builder};

/// Include a builder generated by `buildergen_build` into the current module.
///
/// The argument is the unit's path below the output directory, without the
/// `.rs` extension: module directories followed by the builder name. Generated
/// code refers to component types as written at the target, so invoke this in
/// the target's own module.
///
/// ```ignore
/// // in src/geometry.rs
/// #[buildergen::record_builder]
/// pub struct Point { x: i32, y: i32 }
///
/// buildergen::include_builder!("geometry/PointBuilder");
/// ```
///
/// Units written by `buildergen generate` land in `target/buildergen` (or the
/// configured `output_dir`) instead of `OUT_DIR`. Name that directory, relative
/// to the package root, with `from`:
///
/// ```ignore
/// buildergen::include_builder!(from "target/buildergen", "geometry/PointBuilder");
/// ```
#[macro_export]
macro_rules! include_builder {
    ($path:literal) => {
        include!(concat!(env!("OUT_DIR"), "/buildergen/", $path, ".rs"));
    };
    (from $dir:literal, $path:literal) => {
        include!(concat!(env!("CARGO_MANIFEST_DIR"), "/", $dir, "/", $path, ".rs"));
    };
}
