use crate::common_io::{open_buf_reader, open_buf_writer};

use bio::io::fasta;
use ndarray::prelude::*;

/// Collapse each lane of `calls` along `margin` into a string: `Axis(0)`
/// yields one sequence per row, `Axis(1)` one per column.
pub fn tab2seq(calls: &Array2<char>, margin: Axis) -> Vec<String> {
    calls
        .axis_iter(margin)
        .map(|lane| lane.iter().collect())
        .collect()
}

/// Rebuild a character table from equally long sequences, one row per
/// sequence.
pub fn seq2tab(seqs: &[String]) -> anyhow::Result<Array2<char>> {
    if seqs.is_empty() {
        anyhow::bail!("no sequences");
    }
    let width = seqs[0].chars().count();
    let mut data = Vec::with_capacity(seqs.len() * width);
    for (k, seq) in seqs.iter().enumerate() {
        let chars: Vec<char> = seq.chars().collect();
        if chars.len() != width {
            anyhow::bail!(
                "sequence {} has length {}, expected {}",
                k,
                chars.len(),
                width
            );
        }
        data.extend(chars);
    }
    Ok(Array2::from_shape_vec((seqs.len(), width), data)?)
}

/// Write named sequences in fasta format, plain or gzipped by extension.
pub fn write_fasta(path: &str, names: &[Box<str>], seqs: &[String]) -> anyhow::Result<()> {
    if names.len() != seqs.len() {
        anyhow::bail!("{} names for {} sequences", names.len(), seqs.len());
    }
    let mut writer = fasta::Writer::new(open_buf_writer(path)?);
    for (name, seq) in names.iter().zip(seqs.iter()) {
        writer.write(name.as_ref(), None, seq.as_bytes())?;
    }
    Ok(())
}

/// Read a fasta file into parallel name and sequence vectors.
pub fn read_fasta(path: &str) -> anyhow::Result<(Vec<Box<str>>, Vec<String>)> {
    let reader = fasta::Reader::from_bufread(open_buf_reader(path)?);
    let mut names = vec![];
    let mut seqs = vec![];
    for record in reader.records() {
        let record = record?;
        names.push(Box::from(record.id()));
        seqs.push(String::from_utf8(record.seq().to_vec())?);
    }
    Ok((names, seqs))
}
