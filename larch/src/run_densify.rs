use crate::pipeline::{Pipeline, Stage};

use vcm_util::fasta::write_fasta;
use vcm_util::vcm::{VcmTable, UNKNOWN_BASE};

use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
pub struct DensifyArgs {
    /// variant call matrix file (`.vcm`, plain or gzipped)
    #[arg(required = true)]
    vcm_file: Box<str>,

    /// remove sparse sites and cells until this fraction of base calls is
    /// known
    #[arg(long, short = 'd', default_value_t = 0.9)]
    target_density: f32,

    /// maximum number of removal steps
    #[arg(long, short = 's')]
    max_steps: Option<usize>,

    /// base call treated as unknown
    #[arg(long, default_value_t = UNKNOWN_BASE)]
    unknown: char,

    /// output file for the filtered matrix
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// also export the filtered per-cell sequences as fasta
    #[arg(long)]
    fasta: Option<Box<str>>,

    /// rerun stages whose outputs already exist
    #[arg(long, default_value_t = false)]
    force: bool,
}

pub fn run_densify(args: DensifyArgs) -> anyhow::Result<()> {
    env_logger::init();

    let out = args.out.clone();
    let unknown = args.unknown;
    let target = args.target_density;
    let max_steps = args.max_steps;

    let densify_out = out.clone();
    let mut pipeline = Pipeline::new().stage(Stage::new(
        "densify",
        PathBuf::from(out.as_ref()),
        move |input: &std::path::Path| {
            let input = input
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("non-utf8 path"))?;
            let vcm = VcmTable::read(input)?;
            info!(
                "loaded {} sites x {} cells from {}",
                vcm.nsites(),
                vcm.ncells(),
                input
            );

            let (filtered, report) = vcm.densify(unknown, target, max_steps)?;
            info!(
                "removed {} sites and {} cells over {} steps",
                report.removed_rows.len(),
                report.removed_columns.len(),
                report.density_trace.len()
            );
            info!("density trace: {:?}", report.density_trace);

            filtered.write(densify_out.as_ref())?;
            Ok(PathBuf::from(densify_out.as_ref()))
        },
    ));

    if let Some(fasta_file) = args.fasta.clone() {
        let expected = PathBuf::from(fasta_file.as_ref());
        pipeline = pipeline.stage(Stage::new(
            "fasta",
            expected.clone(),
            move |input: &std::path::Path| {
                let input = input
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("non-utf8 path"))?;
                let vcm = VcmTable::read(input)?;
                let (names, seqs): (Vec<_>, Vec<_>) = vcm.to_sequences().into_iter().unzip();
                write_fasta(fasta_file.as_ref(), &names, &seqs)?;
                Ok(expected.clone())
            },
        ));
    }

    pipeline.run(std::path::Path::new(args.vcm_file.as_ref()), args.force)?;
    info!("done -> {}", out);
    Ok(())
}
