//! Build-time step builder generator.
//!
//! This crate scans your source files for `#[record_builder]` structs and
//! `#[instance_builder]` associated functions and generates, for each one, a
//! step builder: a chain of types that only lets the caller reach `build()`
//! after every component has been set, in declaration order.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     buildergen_build::generate_builders()
//!         .scan_path("src")
//!         .run()?
//!         .ensure_clean()?;
//!     Ok(())
//! }
//! ```
//!
//! Then, next to the target (the generated code names it by path, so include
//! it in the target's own module):
//!
//! ```ignore
//! #[buildergen::record_builder]
//! pub struct Point { x: i32, y: i32 }
//!
//! buildergen::include_builder!("geometry/PointBuilder");
//! ```

mod diagnostics;
mod driver;
mod emit;
mod error;
mod extract;
mod generator;
mod marker;
mod model;
mod naming;
mod scanner;
mod sink;

pub use diagnostics::{Diagnostic, DiagnosticKind, Report};
pub use driver::Driver;
pub use emit::{EmitOptions, emit, emit_tokens, setter_name};
pub use error::{BuildError, BuildResult};
pub use extract::{extract_constructor, extract_record};
pub use generator::BuilderGenerator;
pub use marker::{Marker, MarkerKind};
pub use model::{
    AnnotatedElement, Component, Construction, Declaration, DeclarationKind, EmittedUnit, Extraction, Location, Naming,
    Scope, SetterStyle, Target,
};
pub use naming::resolve;
pub use scanner::{compute_module_path, scan_directory, scan_file, scan_source};
pub use sink::{FsSink, MemorySink, Sink};

/// Create a new generator with default settings.
///
/// # Example
///
/// ```ignore
/// buildergen_build::generate_builders()
///     .scan_path("src")
///     .run()?
///     .ensure_clean()?;
/// ```
pub fn generate_builders() -> BuilderGenerator {
    BuilderGenerator::new()
}
