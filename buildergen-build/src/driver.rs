//! Per-element dispatch: validate, name, extract, emit, write.

use log::debug;

use crate::diagnostics::{Diagnostic, Report};
use crate::emit::{EmitOptions, emit};
use crate::error::{BuildError, BuildResult};
use crate::extract::{extract_constructor, extract_record};
use crate::marker::MarkerKind;
use crate::model::{AnnotatedElement, Declaration, EmittedUnit, Extraction, Naming};
use crate::naming::resolve;
use crate::sink::Sink;

/// Processes batches of marked elements into units on a sink.
pub struct Driver<'s> {
    sink: &'s mut dyn Sink,
    crate_root: String,
    options: EmitOptions,
}

impl<'s> Driver<'s> {
    pub fn new(sink: &'s mut dyn Sink) -> Self {
        Self {
            sink,
            crate_root: "crate".to_string(),
            options: EmitOptions::default(),
        }
    }

    /// Leading segment of target paths. Default: `crate`
    pub fn crate_root(mut self, root: impl Into<String>) -> Self {
        self.crate_root = root.into();
        self
    }

    pub fn emit_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    /// Process one batch: records first, then instances.
    ///
    /// Every failing element yields exactly one diagnostic and no unit; the
    /// rest of the batch is unaffected.
    pub fn process(&mut self, elements: &[AnnotatedElement]) -> Report {
        let mut report = Report::default();

        for kind in MarkerKind::ALL {
            for element in elements.iter().filter(|element| element.marker.kind == kind) {
                if element.marker.inline {
                    continue;
                }
                match self.process_element(element) {
                    Ok(unit) => {
                        debug!("generated {} for {}", unit.address, element.declaration.name());
                        report.units.push(unit);
                    }
                    Err(err) => {
                        debug!("{} on {} failed: {err}", kind, element.declaration.name());
                        report
                            .diagnostics
                            .push(Diagnostic::from_error(&err, element.location.clone()));
                    }
                }
            }
        }

        report
    }

    fn process_element(&mut self, element: &AnnotatedElement) -> BuildResult<EmittedUnit> {
        let (naming, extraction) = self.prepare(element)?;
        let unit = emit(&naming, &extraction.target, &extraction.components, &self.options)?;

        self.sink
            .write_unit(&unit)
            .map_err(|source| BuildError::SinkWriteFailed {
                address: unit.address.clone(),
                source,
            })?;
        Ok(unit)
    }

    fn prepare(&self, element: &AnnotatedElement) -> BuildResult<(Naming, Extraction)> {
        let name_override = element.marker.name_override();

        match (element.marker.kind, &element.declaration) {
            (MarkerKind::Record, Declaration::Struct(item)) => {
                let naming = resolve(&item.ident.to_string(), &element.scopes, name_override, &self.crate_root)?;
                let extraction = extract_record(item, &naming.target_path()?)?;
                Ok((naming, extraction))
            }
            (
                MarkerKind::Instance,
                Declaration::Constructor {
                    class,
                    impl_generics,
                    item,
                },
            ) => {
                // The first scope is the `impl` body; the target is its self type.
                let scopes = element.scopes.get(1..).unwrap_or_default();
                let naming = resolve(&class.to_string(), scopes, name_override, &self.crate_root)?;
                let extraction = extract_constructor(item, *impl_generics, &naming.target_path()?)?;
                Ok((naming, extraction))
            }
            (marker, declaration) => Err(BuildError::unsupported(marker, declaration.kind().as_str())),
        }
    }
}
