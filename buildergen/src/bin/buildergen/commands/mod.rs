pub mod generate;
pub mod init;
pub mod scan;

use std::path::PathBuf;

use anyhow::Result;
use buildergen_build::BuilderGenerator;

use crate::context::ProjectContext;

/// A titled set of command lines shown under a subcommand's `--help`.
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

/// Help examples for the subcommand called `name`.
pub fn examples_for(name: &str) -> Option<&'static [ExampleGroup]> {
    match name {
        "init" => Some(init::EXAMPLES),
        "generate" => Some(generate::EXAMPLES),
        "scan" => Some(scan::EXAMPLES),
        _ => None,
    }
}

/// Generator configured from buildergen.toml, with explicit source roots taking precedence.
fn configured_generator(ctx: &ProjectContext, src: &[PathBuf]) -> Result<BuilderGenerator> {
    let settings = ctx.settings();
    let scan_paths: Vec<PathBuf> = if src.is_empty() {
        settings.scan_paths.iter().map(|path| ctx.resolve(path)).collect()
    } else {
        src.to_vec()
    };

    let generator = scan_paths.into_iter().fold(
        BuilderGenerator::new()
            .output_dir(ctx.resolve(&settings.output_dir))
            .crate_root(settings.crate_root.clone())
            .setter_style(settings.setter_style()?)
            .cargo_directives(false),
        BuilderGenerator::scan_path,
    );
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_has_examples() {
        for name in ["init", "generate", "scan"] {
            let groups = examples_for(name).unwrap_or_default();
            assert!(!groups.is_empty(), "{name} has no help examples");
            assert!(
                groups
                    .iter()
                    .flat_map(|group| group.commands)
                    .all(|command| command.starts_with(&format!("buildergen {name}")))
            );
        }
        assert!(examples_for("migrate").is_none());
    }
}
