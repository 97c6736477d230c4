use std::path::PathBuf;

use anyhow::Result;
use buildergen_build::{AnnotatedElement, Scope};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use crate::commands::{ExampleGroup, configured_generator};
use crate::context::ProjectContext;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Discover Markers",
    commands: &[
        "buildergen scan                     # List markers under the configured source roots",
        "buildergen scan --src crates/app/src --output json",
    ],
}];

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Source root to scan (repeatable; default from buildergen.toml, else src)
    #[arg(long = "src", value_name = "DIR")]
    pub src: Vec<PathBuf>,
}

#[derive(Serialize)]
struct MarkerRow {
    marker: &'static str,
    declaration: String,
    kind: String,
    module: String,
    builder_name: Option<String>,
    location: Option<String>,
}

impl MarkerRow {
    fn new(element: &AnnotatedElement) -> Self {
        let module = element
            .scopes
            .iter()
            .find_map(|scope| match scope {
                Scope::Module { path } => Some(path.clone()),
                _ => None,
            })
            .unwrap_or_default();

        Self {
            marker: element.marker.kind.attribute_name(),
            declaration: element.declaration.name(),
            kind: element.declaration.kind().to_string(),
            module,
            builder_name: element.marker.name_override().map(str::to_string),
            location: element.location.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Serialize)]
struct ScanListing {
    markers: Vec<MarkerRow>,
}

impl TableDisplay for ScanListing {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Marker", "Declaration", "Kind", "Module", "Location"]);
        for row in &self.markers {
            let module = if row.module.is_empty() { "(crate root)" } else { &row.module };
            table.add_row(vec![
                Cell::new(row.marker),
                Cell::new(&row.declaration),
                Cell::new(&row.kind),
                Cell::new(module),
                Cell::new(row.location.as_deref().unwrap_or("-")),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.markers
            .iter()
            .map(|row| format!("{}:{}", row.marker, row.declaration))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn handle_scan(args: ScanArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let generator = configured_generator(&ctx, &args.src)?;

    output.heading("Markers");
    let elements = generator.scan()?;
    let listing = ScanListing {
        markers: elements.iter().map(MarkerRow::new).collect(),
    };
    output.display(&listing)?;
    output.key_value("Total", &listing.markers.len().to_string());
    Ok(())
}
