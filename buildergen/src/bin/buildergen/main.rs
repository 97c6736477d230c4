mod commands;
mod context;
mod output;
mod theme;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, Style},
    },
    error::ErrorKind,
};

use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use std::fmt::Write;

use commands::{
    ExampleGroup, examples_for,
    generate::{GenerateArgs, handle_generate},
    init::{InitArgs, handle_init},
    scan::{ScanArgs, handle_scan},
};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{THEME, Tone};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("RUST_LOG", "Log filter, e.g. buildergen_build=debug (default: warn, info with --verbose)"),
    ("NO_COLOR", "Disable colored output"),
];

#[derive(Parser)]
#[command(name = "buildergen")]
#[command(version)]
#[command(
    about = "Typestate step builder generator",
    long_about = r#"Generates step builders for structs marked #[record_builder] and
constructors marked #[instance_builder].

Each builder only exposes `build()` once every component has been set, in
declaration order, so a missing field is a compile error.

Commands:
  init      Write a buildergen.toml for this project
  generate  Generate builder files
  scan      List the markers found in the sources
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default buildergen.toml next to Cargo.toml
    Init(InitArgs),

    /// Scan sources and write one builder file per marker
    Generate(GenerateArgs),

    /// List markers without generating anything
    Scan(ScanArgs),
}

impl Cli {
    fn parse_with_styles() -> Self {
        let matches = build_cli_command().styles(help_styles()).get_matches();
        match Cli::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(err) => {
                let exit_code = if err.kind() == ErrorKind::DisplayHelp { 0 } else { err.exit_code() };
                let _ = err.print();
                std::process::exit(exit_code);
            }
        }
    }
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let mut command = Cli::command().after_long_help(render_top_level_appendix(use_color));
    command = command.color(if use_color { ColorChoice::Auto } else { ColorChoice::Never });

    for name in ["init", "generate", "scan"] {
        if let (Some(groups), Some(subcommand)) = (examples_for(name), command.find_subcommand_mut(name)) {
            *subcommand = subcommand.clone().after_long_help(render_examples(groups, use_color));
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{}", stylize("Examples:", THEME.heading, true, use_color));

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            buffer.push('\n');
        }
        let _ = writeln!(buffer, "  {}", stylize(group.title, THEME.title, true, use_color));
        for command in group.commands {
            let arrow = stylize(Tone::Detail.icon(), THEME.command, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {}", stylize(command, THEME.command, false, use_color));
        }
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let mut buffer = String::new();

    let _ = writeln!(buffer, "{}", stylize("Environment Variables:", THEME.heading, true, use_color));
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, THEME.key, true, use_color);
        let _ = writeln!(buffer, "  {key_text}  {}", stylize(description, THEME.value, false, use_color));
    }

    let tip_heading = stylize("Tip:", THEME.heading, true, use_color);
    let tip_text = stylize(
        "Use 'buildergen <command> --help' to view examples for each command.",
        THEME.command,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "\n{tip_heading} {tip_text}");

    buffer
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    match (use_color, bold) {
        (false, _) => text.to_string(),
        (true, true) => text.color(color).bold().to_string(),
        (true, false) => text.color(color).to_string(),
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    Styles::styled()
        .usage(style_from_color(THEME.title).bold())
        .header(style_from_color(THEME.heading).bold())
        .literal(style_from_color(THEME.command))
        .placeholder(style_from_color(THEME.muted))
        .valid(style_from_color(THEME.success))
        .invalid(style_from_color(THEME.warning))
        .error(style_from_color(THEME.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    let ansi = match color {
        ThemeColor::Red => AnsiColor::Red,
        ThemeColor::Green => AnsiColor::Green,
        ThemeColor::Yellow => AnsiColor::Yellow,
        ThemeColor::Blue => AnsiColor::Blue,
        ThemeColor::Magenta => AnsiColor::Magenta,
        ThemeColor::Cyan => AnsiColor::Cyan,
        ThemeColor::BrightBlack => AnsiColor::BrightBlack,
        ThemeColor::BrightBlue => AnsiColor::BrightBlue,
        ThemeColor::BrightCyan => AnsiColor::BrightCyan,
        _ => AnsiColor::White,
    };
    Style::new().fg_color(Some(ClapColor::Ansi(ansi)))
}

fn main() {
    let cli = Cli::parse_with_styles();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    match cli.command {
        Commands::Init(args) => handle_init(args, &output),
        Commands::Generate(args) => handle_generate(args, &output),
        Commands::Scan(args) => handle_scan(args, &output),
    }
}
