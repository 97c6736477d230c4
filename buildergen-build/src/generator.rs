//! Build-time entry point: scan, generate, write.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::diagnostics::Report;
use crate::driver::Driver;
use crate::emit::EmitOptions;
use crate::model::{AnnotatedElement, SetterStyle};
use crate::scanner::scan_directory;
use crate::sink::{FsSink, MemorySink, Sink};

/// Builder for configuring and running the step builder generator.
pub struct BuilderGenerator {
    scan_paths: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    crate_root: String,
    setter_style: SetterStyle,
    cargo_directives: Option<bool>,
    dry_run: bool,
}

impl Default for BuilderGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderGenerator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            scan_paths: Vec::new(),
            output_dir: None,
            crate_root: "crate".to_string(),
            setter_style: SetterStyle::default(),
            cargo_directives: None,
            dry_run: false,
        }
    }

    /// Add a source root to scan for markers.
    ///
    /// Module paths are computed relative to each root, so pass the crate's
    /// `src/` directory. Can be called multiple times.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_paths.push(path.into());
        self
    }

    /// Set the directory receiving the generated units.
    ///
    /// Default: `$OUT_DIR/buildergen`, or `target/buildergen` outside a build script
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the leading segment of target paths in generated code.
    ///
    /// Default: `crate`
    pub fn crate_root(mut self, root: impl Into<String>) -> Self {
        self.crate_root = root.into();
        self
    }

    /// Default: `SetterStyle::Snake`; `SetterStyle::Camel` gives `setX` names
    pub fn setter_style(mut self, style: SetterStyle) -> Self {
        self.setter_style = style;
        self
    }

    /// Print `cargo:` directives for scanned paths and diagnostics.
    ///
    /// Default: enabled when `OUT_DIR` is set
    pub fn cargo_directives(mut self, enabled: bool) -> Self {
        self.cargo_directives = Some(enabled);
        self
    }

    /// Generate into memory only; nothing is written.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// The directory units are written to.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| match env::var_os("OUT_DIR") {
            Some(out_dir) => Path::new(&out_dir).join("buildergen"),
            None => PathBuf::from("target").join("buildergen"),
        })
    }

    fn scan_paths(&self) -> Vec<PathBuf> {
        // Default to scanning "src/" if no paths specified
        if self.scan_paths.is_empty() {
            vec![PathBuf::from("src")]
        } else {
            self.scan_paths.clone()
        }
    }

    /// Discover marked elements without generating anything.
    pub fn scan(&self) -> Result<Vec<AnnotatedElement>> {
        let mut elements = Vec::new();
        for path in self.scan_paths() {
            let found = scan_directory(&path).with_context(|| format!("Failed to scan {}", path.display()))?;
            elements.extend(found);
        }
        Ok(elements)
    }

    /// Run the generator.
    ///
    /// Scanning problems are errors; problems with individual markers are
    /// collected as diagnostics in the returned report.
    pub fn run(self) -> Result<Report> {
        let directives = self.cargo_directives.unwrap_or_else(|| env::var_os("OUT_DIR").is_some());
        if directives {
            for path in self.scan_paths() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }

        let elements = self.scan()?;
        let options = EmitOptions {
            setter_style: self.setter_style,
        };

        let report = if self.dry_run {
            let mut sink = MemorySink::new();
            self.process(&mut sink, options, &elements)
        } else {
            let output_dir = self.resolved_output_dir();
            let mut sink = FsSink::new(output_dir.clone());
            let report = self.process(&mut sink, options, &elements);
            if !sink.written().is_empty() {
                info!(
                    "buildergen: wrote {} of {} unit(s) to {}",
                    sink.written().len(),
                    report.units.len(),
                    output_dir.display()
                );
            }
            report
        };

        for diagnostic in &report.diagnostics {
            warn!("{diagnostic}");
            if directives {
                println!("cargo:warning={}", diagnostic.to_string().replace('\n', " "));
            }
        }

        Ok(report)
    }

    fn process(&self, sink: &mut dyn Sink, options: EmitOptions, elements: &[AnnotatedElement]) -> Report {
        Driver::new(sink)
            .crate_root(self.crate_root.clone())
            .emit_options(options)
            .process(elements)
    }
}
