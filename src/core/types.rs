use serde::{Deserialize, Serialize};

/// Placeholder used by the legacy format for a field that could not be found
pub const NOT_FOUND: &str = "NA";

/// Canonical identifier for a loosely-spelled legacy config field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    BamFile,
    InsertSizeMean,
    InsertSizeStddev,
    ReadLength,
    InsertSizeUpperCutoff,
    InsertSizeLowerCutoff,
    MinMapQual,
    LibraryName,
    SampleName,
}

impl CanonicalField {
    /// All fields, in classification order
    pub const ALL: [CanonicalField; 9] = [
        Self::BamFile,
        Self::InsertSizeMean,
        Self::InsertSizeStddev,
        Self::ReadLength,
        Self::InsertSizeUpperCutoff,
        Self::InsertSizeLowerCutoff,
        Self::MinMapQual,
        Self::LibraryName,
        Self::SampleName,
    ];

    /// Standard field name used in place of the legacy spelling
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BamFile => "bam_file",
            Self::InsertSizeMean => "insert_size_mean",
            Self::InsertSizeStddev => "insert_size_stddev",
            Self::ReadLength => "read_length",
            Self::InsertSizeUpperCutoff => "insert_size_upper_cutoff",
            Self::InsertSizeLowerCutoff => "insert_size_lower_cutoff",
            Self::MinMapQual => "min_map_qual",
            Self::LibraryName => "library_name",
            Self::SampleName => "sample_name",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
