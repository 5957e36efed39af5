use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `bidgate` binary.
#[derive(Debug, Parser)]
#[command(name = "bidgate", version, about = "bidgate - tender management API gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./bidgate.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve(ServeArgs),
    /// Print the JSON Schema of a response type
    Schema(SchemaArgs),
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Override server.port
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Response type name, e.g. `evidence` or `invite-status`
    pub type_name: String,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["bidgate", "--verbose"]).expect("cli should parse");
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_port_and_global_config() {
        let cli = Cli::try_parse_from(["bidgate", "serve", "--port", "8080", "-c", "x.toml"])
            .expect("cli should parse");
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve(args)) if args.port == Some(8080)));
    }

    #[test]
    fn schema_takes_a_type_name() {
        let cli = Cli::try_parse_from(["bidgate", "schema", "evidence"]).expect("cli should parse");
        assert!(matches!(cli.command, Some(Commands::Schema(args)) if args.type_name == "evidence"));
    }
}
