mod pipeline;
mod run_densify;
mod run_hdi;
mod run_tab2fasta;

use crate::run_densify::*;
use crate::run_hdi::*;
use crate::run_tab2fasta::*;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Densify a variant call matrix by removing sparse sites and cells
    Densify(DensifyArgs),

    /// Highest density interval of a numeric sample or a density curve
    Hdi(HdiArgs),

    /// Export per-cell sequences of a variant call matrix as fasta
    Tab2fasta(Tab2FastaArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Densify(args) => {
            run_densify(args.clone())?;
        }
        Commands::Hdi(args) => {
            run_hdi(args.clone())?;
        }
        Commands::Tab2fasta(args) => {
            run_tab2fasta(args.clone())?;
        }
    }

    Ok(())
}
