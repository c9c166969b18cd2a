mod sort;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-toposort")]
#[command(version)]
#[command(about = "Order CREATE TABLE statements by foreign-key dependencies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort table definitions so every table follows the tables it references
    Sort {
        /// Input file: JSON table list or SQL script with CREATE TABLE statements
        file: PathBuf,

        /// Output file for the ordered SQL (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format: json or sql (detected from the file extension if not specified)
        #[arg(short, long)]
        format: Option<String>,

        /// Verify orderability and print the order without writing output; exit 1 on cycles
        #[arg(long)]
        check: bool,

        /// Print the resulting order without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Sort {
            file,
            output,
            format,
            check,
            dry_run,
        } => sort::run(file, output, format, check, dry_run),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sql-toposort",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
