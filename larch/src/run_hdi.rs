use hdi_util::curve::hdi_from_density;
use hdi_util::sample::hdi_from_samples;
use vcm_util::common_io::{open_buf_writer, read_lines};

use clap::Parser;
use log::info;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct HdiArgs {
    /// input file: one value per line, or two whitespace-separated
    /// columns (support, density) with `--curve`
    #[arg(required = true)]
    data_file: Box<str>,

    /// probability mass left outside the interval
    #[arg(long, short = 'a', default_value_t = 0.05)]
    alpha: f32,

    /// treat the input as a discretized density curve
    #[arg(long, default_value_t = false)]
    curve: bool,

    /// output file
    #[arg(long, short, default_value = "stdout")]
    out: Box<str>,
}

pub fn run_hdi(args: HdiArgs) -> anyhow::Result<()> {
    env_logger::init();

    let lines = read_lines(&args.data_file)?;
    let rows: Vec<Vec<f32>> = lines
        .iter()
        .filter(|x| !x.trim().is_empty() && !x.starts_with('#'))
        .map(|line| {
            line.split_whitespace()
                .map(|x| {
                    x.parse::<f32>()
                        .map_err(|_| anyhow::anyhow!("bad number: {}", x))
                })
                .collect()
        })
        .collect::<anyhow::Result<_>>()?;

    let interval = if args.curve {
        let (x, y): (Vec<f32>, Vec<f32>) = rows
            .iter()
            .map(|row| {
                if row.len() != 2 {
                    anyhow::bail!("expected two columns, found {}", row.len());
                }
                Ok((row[0], row[1]))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .unzip();
        info!("density curve with {} points", x.len());
        hdi_from_density(&x, &y, args.alpha)?
    } else {
        let samples: Vec<f32> = rows.into_iter().flatten().collect();
        info!("{} observations", samples.len());
        hdi_from_samples(&samples, args.alpha)?
    };

    info!(
        "hdi(alpha = {}): [{}, {}]",
        args.alpha, interval.lower, interval.upper
    );

    let mut out = open_buf_writer(&args.out)?;
    writeln!(out, "lower\tupper")?;
    writeln!(out, "{}\t{}", interval.lower, interval.upper)?;
    out.flush()?;

    Ok(())
}
