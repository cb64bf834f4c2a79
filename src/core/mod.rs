//! Core data types for legacy library configuration.
//!
//! - [`CanonicalField`]: The fixed set of field identifiers legacy field names map to
//! - [`LibraryConfig`]: Insert-size statistics and input file for one library
//!
//! ## Canonical Fields
//!
//! | Field | Legacy spellings |
//! |-------|------------------|
//! | `bam_file` | map |
//! | `insert_size_mean` | mean, mean_insert |
//! | `insert_size_stddev` | std, stddev, insert_stddev |
//! | `read_length` | readlen, average_readlength |
//! | `insert_size_upper_cutoff` | upp, upper |
//! | `insert_size_lower_cutoff` | low, lower |
//! | `min_map_qual` | mapqual, mapping_quality |
//! | `library_name` | lib, libname |
//! | `sample_name` | samp, sample |

pub mod library;
pub mod types;
