pub mod common_io; // gz-aware buffered line io and temp files
pub mod densify; // densest submatrix extraction
pub mod fasta; // table/sequence conversion and fasta io
pub mod indexed_counts; // axis counts paired with original indices
pub mod traits; // missing-value detection
pub mod vcm; // variant call matrix tables
