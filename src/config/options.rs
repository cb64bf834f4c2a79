use serde::{Deserialize, Serialize};

/// Default multiple of the standard deviation used to derive insert-size cutoffs
pub const DEFAULT_CUTOFF_FACTOR: f64 = 3.0;

/// Caller-supplied parameters for building a [`BamConfig`](super::bam_config::BamConfig)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BamConfigOptions {
    /// Multiplier applied to the insert-size standard deviation when a line
    /// lacks explicit upper/lower cutoffs
    pub cutoff_factor: f64,

    /// When set, FASTQ output paths are registered for every library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastq_output_prefix: Option<String>,
}

impl Default for BamConfigOptions {
    fn default() -> Self {
        Self {
            cutoff_factor: DEFAULT_CUTOFF_FACTOR,
            fastq_output_prefix: None,
        }
    }
}

impl BamConfigOptions {
    #[must_use]
    pub fn with_cutoff_factor(mut self, cutoff_factor: f64) -> Self {
        self.cutoff_factor = cutoff_factor;
        self
    }

    #[must_use]
    pub fn with_fastq_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fastq_output_prefix = Some(prefix.into());
        self
    }

    /// Paths of the paired FASTQ files for a library, or `None` without a prefix.
    ///
    /// Only the names are produced; creating the files is left to the caller.
    #[must_use]
    pub fn fastq_output_paths(&self, library: &str) -> Option<[String; 2]> {
        self.fastq_output_prefix.as_ref().map(|prefix| {
            [
                format!("{prefix}.{library}.1.fastq"),
                format!("{prefix}.{library}.2.fastq"),
            ]
        })
    }
}
