use vcm_util::fasta::write_fasta;
use vcm_util::vcm::VcmTable;

use clap::Parser;
use log::info;

#[derive(Parser, Debug, Clone)]
pub struct Tab2FastaArgs {
    /// variant call matrix file (`.vcm`, plain or gzipped)
    #[arg(required = true)]
    vcm_file: Box<str>,

    /// output fasta file, one record per cell barcode
    #[arg(long, short, required = true)]
    out: Box<str>,
}

pub fn run_tab2fasta(args: Tab2FastaArgs) -> anyhow::Result<()> {
    env_logger::init();

    let vcm = VcmTable::read(&args.vcm_file)?;
    info!(
        "loaded {} sites x {} cells from {}",
        vcm.nsites(),
        vcm.ncells(),
        args.vcm_file
    );

    let (names, seqs): (Vec<_>, Vec<_>) = vcm.to_sequences().into_iter().unzip();
    write_fasta(&args.out, &names, &seqs)?;
    info!("wrote {} sequences -> {}", names.len(), args.out);

    Ok(())
}
