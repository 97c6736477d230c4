//! Destinations for emitted units.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::model::EmittedUnit;

/// Receives emitted units, one write per unit.
pub trait Sink {
    fn write_unit(&mut self, unit: &EmittedUnit) -> io::Result<()>;
}

fn already_written(address: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("a unit named `{address}` was already written in this run"),
    )
}

/// Writes each unit to `<root>/<module dirs>/<Builder>.rs`.
pub struct FsSink {
    root: PathBuf,
    seen: HashSet<String>,
    written: Vec<PathBuf>,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seen: HashSet::new(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files whose content changed during this run.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path of the file holding `unit`.
    pub fn unit_path(&self, unit: &EmittedUnit) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(unit.package_name.split("::").filter(|segment| !segment.is_empty()));
        path.push(format!("{}.rs", unit.builder_name));
        path
    }
}

impl Sink for FsSink {
    fn write_unit(&mut self, unit: &EmittedUnit) -> io::Result<()> {
        if !self.seen.insert(unit.address.clone()) {
            return Err(already_written(&unit.address));
        }

        let path = self.unit_path(unit);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Unchanged files keep their mtime so cargo does not rebuild dependents.
        let unchanged = fs::read_to_string(&path).is_ok_and(|existing| existing == unit.source);
        if unchanged {
            debug!("{} is up to date", path.display());
            return Ok(());
        }

        fs::write(&path, &unit.source)?;
        info!("wrote {} to {}", unit.address, path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Keeps units in memory, keyed by address.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub units: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &str) -> Option<&str> {
        self.units.get(address).map(String::as_str)
    }
}

impl Sink for MemorySink {
    fn write_unit(&mut self, unit: &EmittedUnit) -> io::Result<()> {
        if self.units.contains_key(&unit.address) {
            return Err(already_written(&unit.address));
        }
        self.units.insert(unit.address.clone(), unit.source.clone());
        Ok(())
    }
}
