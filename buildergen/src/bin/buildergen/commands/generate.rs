use std::path::PathBuf;

use anyhow::Result;
use buildergen_build::{Report, SetterStyle};
use clap::Args;
use comfy_table::{Cell, Table};
use log::debug;
use serde::Serialize;

use crate::commands::{ExampleGroup, configured_generator};
use crate::context::ProjectContext;
use crate::output::{OutputManager, TableDisplay};
use crate::theme::FILE_ICON;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate",
        commands: &[
            "buildergen generate                          # Use buildergen.toml (or defaults)",
            "buildergen generate --src src --out gen      # Explicit source root and output directory",
            "buildergen generate --setter-style camel     # setX instead of set_x",
        ],
    },
    ExampleGroup {
        title: "Preview",
        commands: &["buildergen generate --dry-run --output json   # Print units without writing"],
    },
];

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source root to scan (repeatable; default from buildergen.toml, else src)
    #[arg(long = "src", value_name = "DIR")]
    pub src: Vec<PathBuf>,

    /// Directory receiving generated files
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Leading segment of target paths in generated code
    #[arg(long, value_name = "NAME")]
    pub crate_root: Option<String>,

    /// Setter naming: snake (set_x) or camel (setX)
    #[arg(long, value_name = "STYLE")]
    pub setter_style: Option<SetterStyle>,

    /// Generate without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
struct UnitRow {
    address: String,
    builder: String,
    module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

#[derive(Serialize)]
struct DiagnosticRow {
    kind: String,
    message: String,
    location: Option<String>,
}

#[derive(Serialize)]
struct GenerateSummary {
    output_dir: PathBuf,
    dry_run: bool,
    units: Vec<UnitRow>,
    diagnostics: Vec<DiagnosticRow>,
}

impl GenerateSummary {
    fn new(report: &Report, output_dir: PathBuf, dry_run: bool) -> Self {
        let units = report
            .units
            .iter()
            .map(|unit| UnitRow {
                address: unit.address.clone(),
                builder: unit.builder_name.clone(),
                module: unit.package_name.clone(),
                source: dry_run.then(|| unit.source.clone()),
            })
            .collect();
        let diagnostics = report
            .diagnostics
            .iter()
            .map(|diagnostic| DiagnosticRow {
                kind: diagnostic.kind.to_string(),
                message: diagnostic.message.clone(),
                location: diagnostic.location.as_ref().map(ToString::to_string),
            })
            .collect();

        Self {
            output_dir,
            dry_run,
            units,
            diagnostics,
        }
    }
}

impl TableDisplay for GenerateSummary {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["", "Builder", "Module", "File"]);
        for unit in &self.units {
            let module = if unit.module.is_empty() { "(crate root)" } else { &unit.module };
            let file = self
                .output_dir
                .join(unit.module.replace("::", "/"))
                .join(format!("{}.rs", unit.builder));
            table.add_row(vec![
                Cell::new(FILE_ICON),
                Cell::new(&unit.builder),
                Cell::new(module),
                Cell::new(file.display()),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!("units={} diagnostics={}", self.units.len(), self.diagnostics.len())
    }
}

pub fn handle_generate(args: GenerateArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    if !ctx.is_initialized() {
        output.verbose("No buildergen.toml found, using defaults");
    }

    let mut generator = configured_generator(&ctx, &args.src)?.dry_run(args.dry_run);
    if let Some(out) = args.out {
        generator = generator.output_dir(out);
    }
    if let Some(root) = args.crate_root {
        generator = generator.crate_root(root);
    }
    if let Some(style) = args.setter_style {
        generator = generator.setter_style(style);
    }
    let output_dir = generator.resolved_output_dir();
    debug!("generating into {}", output_dir.display());

    output.heading("Generate Builders");
    output.progress("Scanning sources");
    let report = generator.run()?;
    output.clear_line();

    output.display(&GenerateSummary::new(&report, output_dir.clone(), args.dry_run))?;

    for diagnostic in &report.diagnostics {
        output.error(&diagnostic.to_string());
    }
    if report.has_errors() {
        anyhow::bail!("{} marker(s) could not be generated", report.diagnostics.len());
    }

    if report.units.is_empty() {
        output.warning("No #[record_builder] or #[instance_builder] markers found");
    } else if args.dry_run {
        output.info(&format!("Dry run: {} builder(s) not written", report.units.len()));
    } else {
        output.success(&format!(
            "Generated {} builder(s) in {}",
            report.units.len(),
            output_dir.display()
        ));
    }

    Ok(())
}
