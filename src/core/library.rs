use serde::{Deserialize, Serialize};

/// Sentinel for a library whose minimum mapping quality was not given
pub const MAPQ_UNSPECIFIED: i32 = -1;

/// Insert-size statistics and input file for a single sequencing library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Library name (unique within a `BamConfig`)
    pub name: String,

    /// Mapping file the library's reads live in
    pub bam_file: String,

    /// Dense index assigned when the table is finalized
    pub index: usize,

    pub mean_insertsize: f64,
    pub std_insertsize: f64,
    pub uppercutoff: f64,
    pub lowercutoff: f64,

    /// Read length from the last config line for this library
    pub readlens: f64,

    /// Minimum mapping quality, or [`MAPQ_UNSPECIFIED`]
    pub min_mapping_quality: i32,
}

impl LibraryConfig {
    pub fn new(name: impl Into<String>, bam_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bam_file: bam_file.into(),
            index: 0,
            mean_insertsize: 0.0,
            std_insertsize: 0.0,
            uppercutoff: 0.0,
            lowercutoff: 0.0,
            readlens: 0.0,
            min_mapping_quality: MAPQ_UNSPECIFIED,
        }
    }

    /// Minimum mapping quality if one was configured
    #[must_use]
    pub fn min_mapping_quality(&self) -> Option<u32> {
        u32::try_from(self.min_mapping_quality).ok()
    }
}
