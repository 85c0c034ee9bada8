use crate::common_io::{open_buf_reader, write_lines};
use crate::densify::{densest_subset, keep_indices, DensestSubset, DensifyError};

use ndarray::prelude::*;
use rayon::prelude::*;
use std::io::BufRead;

/// Base call standing for "no information" in a variant call matrix.
pub const UNKNOWN_BASE: char = 'N';

// Contig, Position, Reference
const SITE_COLUMNS: usize = 3;

/// A variant call matrix: one row per variant site, one column per cell
/// barcode, each cell holding the most frequent base observed for that
/// cell at that site (`N` when nothing informative was observed).
#[derive(Debug, Clone, PartialEq)]
pub struct VcmTable {
    pub contigs: Vec<Box<str>>,
    pub positions: Vec<u64>,
    pub references: Vec<Box<str>>,
    pub barcodes: Vec<Box<str>>,
    pub calls: Array2<char>,
}

struct VcmRow {
    contig: Box<str>,
    position: u64,
    reference: Box<str>,
    calls: Vec<char>,
}

impl VcmTable {
    pub fn nsites(&self) -> usize {
        self.calls.nrows()
    }

    pub fn ncells(&self) -> usize {
        self.calls.ncols()
    }

    /// Read a `.vcm` table, plain or gzipped. The header line is
    /// `Contig<TAB>Position<TAB>Reference<TAB>barcode...`, then one line
    /// per variant site.
    pub fn read(path: &str) -> anyhow::Result<Self> {
        let reader = open_buf_reader(path)?;
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty vcm file: {}", path))??;
        let header: Vec<&str> = header.trim_end().split('\t').collect();
        if header.len() <= SITE_COLUMNS {
            anyhow::bail!("no barcode columns in {}", path);
        }
        let barcodes: Vec<Box<str>> = header[SITE_COLUMNS..]
            .iter()
            .map(|x| Box::from(*x))
            .collect();
        let ncells = barcodes.len();

        let raw: Vec<Box<str>> = lines
            .map_while(Result::ok)
            .filter(|x| !x.trim_end().is_empty())
            .map(|x| x.into_boxed_str())
            .collect();

        // parsing dominates reading; split the rows into parallel jobs
        let rows: Vec<VcmRow> = raw
            .par_iter()
            .map(|line| parse_vcm_line(line, ncells))
            .collect::<anyhow::Result<_>>()?;

        let nsites = rows.len();
        let mut contigs = Vec::with_capacity(nsites);
        let mut positions = Vec::with_capacity(nsites);
        let mut references = Vec::with_capacity(nsites);
        let mut data = Vec::with_capacity(nsites * ncells);
        for row in rows {
            contigs.push(row.contig);
            positions.push(row.position);
            references.push(row.reference);
            data.extend(row.calls);
        }

        Ok(VcmTable {
            contigs,
            positions,
            references,
            barcodes,
            calls: Array2::from_shape_vec((nsites, ncells), data)?,
        })
    }

    /// Write the table, plain or gzipped by extension.
    pub fn write(&self, path: &str) -> anyhow::Result<()> {
        let mut lines: Vec<Box<str>> = Vec::with_capacity(self.nsites() + 1);
        lines.push(
            format!(
                "Contig\tPosition\tReference\t{}",
                self.barcodes.join("\t")
            )
            .into_boxed_str(),
        );

        for (i, row) in self.calls.rows().into_iter().enumerate() {
            let calls = row
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            lines.push(
                format!(
                    "{}\t{}\t{}\t{}",
                    self.contigs[i], self.positions[i], self.references[i], calls
                )
                .into_boxed_str(),
            );
        }

        write_lines(&lines, path)
    }

    /// Subset sites (`rows`) and cells (`cols`), keeping the annotations
    /// aligned with the call matrix.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Self {
        VcmTable {
            contigs: rows.iter().map(|&i| self.contigs[i].clone()).collect(),
            positions: rows.iter().map(|&i| self.positions[i]).collect(),
            references: rows.iter().map(|&i| self.references[i].clone()).collect(),
            barcodes: cols.iter().map(|&j| self.barcodes[j].clone()).collect(),
            calls: self.calls.select(Axis(0), rows).select(Axis(1), cols),
        }
    }

    /// Densify the matrix by removing the sparsest sites and cells until
    /// `target_density` is reached. Returns the filtered table and the
    /// extraction report.
    pub fn densify(
        &self,
        unknown: char,
        target_density: f32,
        max_steps: Option<usize>,
    ) -> Result<(Self, DensestSubset<char>), DensifyError> {
        let report = densest_subset(&self.calls, &unknown, target_density, max_steps)?;
        let keep_rows = keep_indices(self.nsites(), &report.removed_rows);
        let keep_cols = keep_indices(self.ncells(), &report.removed_columns);
        let table = self.select(&keep_rows, &keep_cols);
        Ok((table, report))
    }

    /// One `(barcode, sequence)` pair per cell; a cell's sequence is its
    /// column of base calls read top to bottom.
    pub fn to_sequences(&self) -> Vec<(Box<str>, String)> {
        self.barcodes
            .iter()
            .cloned()
            .zip(crate::fasta::tab2seq(&self.calls, Axis(1)))
            .collect()
    }
}

fn parse_vcm_line(line: &str, ncells: usize) -> anyhow::Result<VcmRow> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();
    if fields.len() != SITE_COLUMNS + ncells {
        anyhow::bail!(
            "vcm row has {} fields, expected {}",
            fields.len(),
            SITE_COLUMNS + ncells
        );
    }

    let position = fields[1]
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("bad position: {}", fields[1]))?;

    let calls = fields[SITE_COLUMNS..]
        .iter()
        .map(|x| {
            let mut chars = x.chars();
            match (chars.next(), chars.next()) {
                (Some(call), None) => Ok(call),
                (None, _) => Err(anyhow::anyhow!("empty base call")),
                (Some(_), Some(_)) => Err(anyhow::anyhow!("base call is not a single character: {}", x)),
            }
        })
        .collect::<anyhow::Result<Vec<char>>>()?;

    Ok(VcmRow {
        contig: Box::from(fields[0]),
        position,
        reference: Box::from(fields[2]),
        calls,
    })
}
