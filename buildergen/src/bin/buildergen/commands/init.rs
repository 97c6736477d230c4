use anyhow::{Context, Result};
use clap::Args;

use crate::commands::ExampleGroup;
use crate::context::{BuildergenConfig, ProjectContext};
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Initialize",
    commands: &[
        "buildergen init            # Write buildergen.toml next to Cargo.toml",
        "buildergen init --force    # Overwrite an existing buildergen.toml",
    ],
}];

const BUILD_SCRIPT_HINT: &str = r#"fn main() -> anyhow::Result<()> {
    buildergen_build::generate_builders().scan_path("src").run()?.ensure_clean()?;
    Ok(())
}"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(args: InitArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;

    if ctx.is_initialized() && !args.force {
        output.warning(&format!(
            "{} already exists (use --force to overwrite)",
            ctx.config_path.display()
        ));
        return Ok(());
    }

    let content = render_config(&BuildergenConfig::default())?;
    std::fs::write(&ctx.config_path, content)
        .with_context(|| format!("Failed to write {}", ctx.config_path.display()))?;

    output.success(&format!("Created {}", ctx.config_path.display()));
    output.info("To generate at build time instead, add to build.rs:");
    if !output.options.quiet {
        println!("\n{BUILD_SCRIPT_HINT}");
    }
    Ok(())
}

fn render_config(config: &BuildergenConfig) -> Result<String> {
    let body = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    Ok(format!("# buildergen configuration, read by `buildergen generate`\n\n{body}"))
}
