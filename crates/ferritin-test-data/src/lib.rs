//! ferretin-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Small site tables are included in the crate distribution as reference inputs.
//!
//! The test files are represented as `TestFile` objects which package the raw binary data
//! and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ferritin_test_data::TestFile;
/// let (table, _temp) = TestFile::sites_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Headerless site table: TP53 (P04637) and histone H4 (P62805).
    ///
    /// 15 rows: rows 1-9 and 13 are serine/threonine sites, the other five are tyrosines.
    pub fn sites_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/sites_01.csv"),
            suffix: "csv",
        }
    }
    /// The first four TP53 rows of `sites_01`, with a header line.
    pub fn sites_header_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/sites_header_01.csv"),
            suffix: "csv",
        }
    }
    /// Second row carries a position that is not an integer.
    pub fn sites_malformed_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/sites_malformed_01.csv"),
            suffix: "csv",
        }
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
