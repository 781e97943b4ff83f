use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molscene CLI - load molecular structures, derive bonds, and composite representation stacks from the command line.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a structure file and summarize its atoms, bonds, and chains.
    Info(InfoArgs),
    /// Composite the representation stack and dump the render instances.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input structure file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Derive bonds from CONECT records when present instead of geometry.
    #[arg(long)]
    pub explicit_bonds: bool,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the input structure file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Drawing style for the base layer (ball-and-stick, space-filling, lines).
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Coloring rule for the base layer (element, red, green, blue).
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Selection expression for the base layer. One of: all, backbone,
    /// residue:<n>, chain:<letter|name>, within:<radius>:residue:<n>,
    /// within:<radius>:chain:<letter|name>.
    #[arg(long, value_name = "EXPR")]
    pub select: Option<String>,

    /// TOML file with an [aliases] table mapping names to chain letters.
    #[arg(long, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    /// Emit one JSON object per instance instead of the table.
    #[arg(long)]
    pub json: bool,

    /// Derive bonds from CONECT records when present instead of geometry.
    #[arg(long)]
    pub explicit_bonds: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::parse_from([
            "molscene",
            "render",
            "input.pdb",
            "--style",
            "lines",
            "--select",
            "chain:A",
            "--json",
        ]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.style.as_deref(), Some("lines"));
                assert_eq!(args.select.as_deref(), Some("chain:A"));
                assert!(args.json);
                assert!(!args.explicit_bonds);
            }
            Commands::Info(_) => unreachable!(),
        }
    }

    #[test]
    fn verbosity_flags_are_global() {
        let cli = Cli::parse_from(["molscene", "info", "input.pdb", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
