mod commands;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "llamapack")]
#[command(author, version, about = "Build and package llama.cpp server binaries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build engine variants into the package directory
    Build(commands::build::BuildArgs),

    /// Print the packaged server binary path for a variant
    Path(commands::path::PathArgs),

    /// List built variants recorded in the package manifest
    List(commands::list::ListArgs),

    /// Remove built artifacts from the package directory
    Clean(commands::clean::CleanArgs),

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Path(args) => commands::path::execute(args),
        Commands::List(args) => commands::list::execute(args),
        Commands::Clean(args) => commands::clean::execute(args),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
