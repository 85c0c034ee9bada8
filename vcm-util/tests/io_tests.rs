use ndarray::array;
use vcm_util::common_io::{create_temp_dir_file, read_lines, write_lines};
use vcm_util::vcm::{VcmTable, UNKNOWN_BASE};

fn toy_table() -> VcmTable {
    VcmTable {
        contigs: vec!["chr1".into(), "chr1".into(), "chr2".into()],
        positions: vec![101, 250, 77],
        references: vec!["A".into(), "C".into(), "G".into()],
        barcodes: vec!["AAAC".into(), "AACG".into(), "AATT".into()],
        calls: array![['A', 'A', 'N'], ['C', 'N', 'N'], ['G', 'G', 'T']],
    }
}

#[test]
fn vcm_round_trip() -> anyhow::Result<()> {
    let table = toy_table();

    let vcm_file = create_temp_dir_file(".vcm")?;
    let vcm_file = vcm_file.to_str().unwrap();
    table.write(vcm_file)?;

    let back = VcmTable::read(vcm_file)?;
    assert_eq!(back, table);
    Ok(())
}

#[test]
fn vcm_round_trip_gzipped() -> anyhow::Result<()> {
    let table = toy_table();

    let vcm_file = create_temp_dir_file(".vcm.gz")?;
    let vcm_file = vcm_file.to_str().unwrap();
    table.write(vcm_file)?;

    let back = VcmTable::read(vcm_file)?;
    assert_eq!(back, table);
    Ok(())
}

#[test]
fn vcm_densify_keeps_annotations_aligned() -> anyhow::Result<()> {
    let table = toy_table();
    let (filtered, report) = table.densify(UNKNOWN_BASE, 1.0, None)?;

    // the second site and the third cell are the sparse lines
    assert_eq!(report.removed_rows, vec![1]);
    assert_eq!(report.removed_columns, vec![2]);

    assert_eq!(filtered.contigs, vec![Box::from("chr1"), Box::from("chr2")]);
    assert_eq!(filtered.positions, vec![101, 77]);
    assert_eq!(filtered.references, vec![Box::from("A"), Box::from("G")]);
    assert_eq!(filtered.barcodes, vec![Box::from("AAAC"), Box::from("AACG")]);
    assert_eq!(filtered.calls, array![['A', 'A'], ['G', 'G']]);

    // every surviving call is known
    assert!(filtered.calls.iter().all(|&c| c != UNKNOWN_BASE));
    Ok(())
}

#[test]
fn malformed_rows_are_rejected() -> anyhow::Result<()> {
    let vcm_file = create_temp_dir_file(".vcm")?;
    let vcm_file = vcm_file.to_str().unwrap();

    let lines = [
        "Contig\tPosition\tReference\tAAAC\tAACG",
        "chr1\t101\tA\tA", // one call short
    ];
    write_lines(&lines, vcm_file)?;
    assert!(VcmTable::read(vcm_file).is_err());

    let lines = [
        "Contig\tPosition\tReference\tAAAC",
        "chr1\tnot_a_number\tA\tA",
    ];
    write_lines(&lines, vcm_file)?;
    assert!(VcmTable::read(vcm_file).is_err());

    // a call field must be exactly one character, not quietly truncated
    let lines = [
        "Contig\tPosition\tReference\tAAAC\tAACG",
        "chr1\t101\tA\tAC\tG",
    ];
    write_lines(&lines, vcm_file)?;
    assert!(VcmTable::read(vcm_file).is_err());

    Ok(())
}

#[test]
fn line_io_round_trip() -> anyhow::Result<()> {
    let lines = ["alpha", "beta", "gamma"];
    let file = create_temp_dir_file(".txt.gz")?;
    let file = file.to_str().unwrap();
    write_lines(&lines, file)?;

    let back = read_lines(file)?;
    assert_eq!(back.len(), 3);
    assert_eq!(back[0].as_ref(), "alpha");
    assert_eq!(back[2].as_ref(), "gamma");
    Ok(())
}
