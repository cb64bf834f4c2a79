use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::options::BamConfigOptions;
use crate::config::{library_name, read_line_lossy, section_lines};
use crate::core::library::{LibraryConfig, MAPQ_UNSPECIFIED};
use crate::core::types::NOT_FOUND;
use crate::parsing::line::{find_exact, find_prefixed, find_two_keys};

/// Viewer command used for a mapping file whose lines give none
pub const DEFAULT_VIEWER_COMMAND: &str = "cat";

/// Floor applied to the derived read window size
pub const MIN_READ_WINDOW_SIZE: i32 = 50;

/// Running minimum the window size starts from before any line is seen
const INITIAL_READ_WINDOW_SIZE: i32 = 100_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Please use identical exe commands to open the same input file: \
         '{bam_file}' is opened with '{existing}' and '{found}'"
    )]
    ConflictingViewerCommand {
        bam_file: String,
        existing: String,
        found: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Library index {index} out of range ({count} libraries)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Raw field values found on one config line
struct LineFields<'a> {
    bam_file: Option<&'a str>,
    mean: Option<&'a str>,
    std: Option<&'a str>,
    readlen: Option<&'a str>,
    upper: Option<&'a str>,
    lower: Option<&'a str>,
    mapqual: Option<&'a str>,
    library: Option<&'a str>,
    readgroup: Option<&'a str>,
    platform: Option<&'a str>,
    exe: Option<&'a str>,
}

impl<'a> LineFields<'a> {
    fn parse(line: &'a str) -> Self {
        Self {
            bam_file: find_exact(line, "map"),
            mean: find_prefixed(line, "mean"),
            std: find_prefixed(line, "std"),
            readlen: find_prefixed(line, "readlen"),
            upper: find_prefixed(line, "upp"),
            lower: find_prefixed(line, "low"),
            mapqual: find_two_keys(line, "map", "qual"),
            library: library_name(line),
            readgroup: find_exact(line, "group"),
            platform: find_exact(line, "platform"),
            exe: find_prefixed(line, "exe"),
        }
    }
}

/// Parse the leading number of a value, as C's `atof` does.
///
/// Trailing text is ignored (`400bp` is 400); a value with no leading number is zero.
fn parse_or_zero(value: &str) -> f64 {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let skip_digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let int_start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = skip_digits(int_start);
    let mut has_digits = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = skip_digits(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    value[..end].parse().unwrap_or(0.0)
}

fn parse_mapping_quality(value: Option<&str>) -> i32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(MAPQ_UNSPECIFIED)
}

/// Per-library configuration aggregated from a legacy config file.
///
/// Libraries are deduplicated by name (the last line for a library wins) and
/// indexed densely in lexicographic name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BamConfig {
    libraries: Vec<LibraryConfig>,
    #[serde(skip)]
    lib_names_to_indices: BTreeMap<String, usize>,
    readgroup_library: BTreeMap<String, String>,
    readgroup_platform: BTreeMap<String, String>,
    bam_files: Vec<String>,
    exes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fastq_outputs: BTreeMap<String, String>,
    max_readlen: f64,
    max_read_window_size: i32,
}

impl Default for BamConfig {
    fn default() -> Self {
        Self {
            libraries: Vec::new(),
            lib_names_to_indices: BTreeMap::new(),
            readgroup_library: BTreeMap::new(),
            readgroup_platform: BTreeMap::new(),
            bam_files: Vec::new(),
            exes: BTreeMap::new(),
            fastq_outputs: BTreeMap::new(),
            max_readlen: 0.0,
            max_read_window_size: INITIAL_READ_WINDOW_SIZE,
        }
    }
}

impl BamConfig {
    /// Aggregate config lines, stopping at the first empty line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingViewerCommand` if two lines open the
    /// same mapping file with different viewer commands.
    pub fn from_lines<I, S>(lines: I, options: &BamConfigOptions) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = BamConfigBuilder::new(options);
        for line in lines {
            let line = line.as_ref();
            if line.is_empty() {
                break;
            }
            builder.add_line(line)?;
        }
        Ok(builder.finish())
    }

    /// Aggregate the first section of a config held in memory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingViewerCommand` on conflicting viewer commands.
    pub fn from_text(text: &str, options: &BamConfigOptions) -> Result<Self, ConfigError> {
        Self::from_lines(section_lines(text), options)
    }

    /// Aggregate the first section of a config read from `reader`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if reading fails, or
    /// `ConfigError::ConflictingViewerCommand` on conflicting viewer commands.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        options: &BamConfigOptions,
    ) -> Result<Self, ConfigError> {
        let mut builder = BamConfigBuilder::new(options);
        let mut buf = Vec::new();
        while let Some(line) = read_line_lossy(&mut reader, &mut buf)? {
            if line.is_empty() {
                break;
            }
            builder.add_line(&line)?;
        }
        Ok(builder.finish())
    }

    /// Look up a library by name
    ///
    /// # Errors
    ///
    /// Returns `LookupError::LibraryNotFound` if no library has this name.
    pub fn library_config_by_name(&self, name: &str) -> Result<&LibraryConfig, LookupError> {
        let index = self.library_index_by_name(name)?;
        Ok(&self.libraries[index])
    }

    /// Look up a library by its index
    ///
    /// # Errors
    ///
    /// Returns `LookupError::IndexOutOfRange` if `index >= num_libs()`.
    pub fn library_config_by_index(&self, index: usize) -> Result<&LibraryConfig, LookupError> {
        self.libraries
            .get(index)
            .ok_or(LookupError::IndexOutOfRange {
                index,
                count: self.libraries.len(),
            })
    }

    /// Index of a library by name
    ///
    /// # Errors
    ///
    /// Returns `LookupError::LibraryNotFound` if no library has this name.
    pub fn library_index_by_name(&self, name: &str) -> Result<usize, LookupError> {
        self.lib_names_to_indices
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::LibraryNotFound(name.to_string()))
    }

    /// Library a read group belongs to
    #[must_use]
    pub fn readgroup_library(&self, readgroup: &str) -> Option<&str> {
        self.readgroup_library.get(readgroup).map(String::as_str)
    }

    /// Sequencing platform of a read group, if its line named one
    #[must_use]
    pub fn readgroup_platform(&self, readgroup: &str) -> Option<&str> {
        self.readgroup_platform.get(readgroup).map(String::as_str)
    }

    /// All read groups with the library each belongs to
    #[must_use]
    pub fn readgroup_libraries(&self) -> &BTreeMap<String, String> {
        &self.readgroup_library
    }

    #[must_use]
    pub fn num_libs(&self) -> usize {
        self.libraries.len()
    }

    /// Libraries in index order
    #[must_use]
    pub fn libraries(&self) -> &[LibraryConfig] {
        &self.libraries
    }

    /// Distinct mapping files, sorted
    #[must_use]
    pub fn bam_files(&self) -> &[String] {
        &self.bam_files
    }

    /// Command used to stream a mapping file's contents
    #[must_use]
    pub fn viewer_command(&self, bam_file: &str) -> Option<&str> {
        self.exes.get(bam_file).map(String::as_str)
    }

    /// Viewer commands keyed by mapping file
    #[must_use]
    pub fn exes(&self) -> &BTreeMap<String, String> {
        &self.exes
    }

    /// Registered FASTQ output paths (first and second mate) for a library
    #[must_use]
    pub fn fastq_output_paths(&self, library: &str) -> Option<(&str, &str)> {
        let first = self.fastq_outputs.get(&format!("{library}1"))?;
        let second = self.fastq_outputs.get(&format!("{library}2"))?;
        Some((first.as_str(), second.as_str()))
    }

    /// Longest read length seen on any line
    #[must_use]
    pub fn max_readlen(&self) -> f64 {
        self.max_readlen
    }

    /// Smallest `mean - 2 * readlen` across lines, floored at [`MIN_READ_WINDOW_SIZE`]
    #[must_use]
    pub fn max_read_window_size(&self) -> i32 {
        self.max_read_window_size
    }
}

/// Accumulates config lines one at a time into a [`BamConfig`]
pub struct BamConfigBuilder<'o> {
    options: &'o BamConfigOptions,
    libraries: BTreeMap<String, LibraryConfig>,
    readgroup_library: BTreeMap<String, String>,
    readgroup_platform: BTreeMap<String, String>,
    exes: BTreeMap<String, String>,
    fastq_outputs: BTreeMap<String, String>,
    max_readlen: f64,
    window_size: i32,
}

impl<'o> BamConfigBuilder<'o> {
    #[must_use]
    pub fn new(options: &'o BamConfigOptions) -> Self {
        Self {
            options,
            libraries: BTreeMap::new(),
            readgroup_library: BTreeMap::new(),
            readgroup_platform: BTreeMap::new(),
            exes: BTreeMap::new(),
            fastq_outputs: BTreeMap::new(),
            max_readlen: 0.0,
            window_size: INITIAL_READ_WINDOW_SIZE,
        }
    }

    /// Fold one non-empty config line into the table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingViewerCommand` if the line's viewer
    /// command differs from the one already registered for its mapping file.
    pub fn add_line(&mut self, line: &str) -> Result<(), ConfigError> {
        let fields = LineFields::parse(line);

        let library = fields.library.unwrap_or_else(|| {
            warn!(line = %line, "Config line has no library or sample name");
            NOT_FOUND
        });
        let bam_file = fields.bam_file.unwrap_or_else(|| {
            warn!(library = %library, "Config line has no mapping file");
            NOT_FOUND
        });
        let readgroup = fields.readgroup.unwrap_or(library);

        self.readgroup_library
            .insert(readgroup.to_string(), library.to_string());
        match fields.platform {
            Some(platform) => {
                self.readgroup_platform
                    .insert(readgroup.to_string(), platform.to_string());
            }
            None => {
                self.readgroup_platform.remove(readgroup);
            }
        }

        if let Some([first, second]) = self.options.fastq_output_paths(library) {
            self.fastq_outputs.insert(format!("{library}1"), first);
            self.fastq_outputs.insert(format!("{library}2"), second);
        }

        let mut config = LibraryConfig::new(library, bam_file);
        config.min_mapping_quality = parse_mapping_quality(fields.mapqual);

        // Statistics only count when both mean and stddev are present
        if let (Some(mean), Some(std)) = (fields.mean, fields.std) {
            config.mean_insertsize = parse_or_zero(mean);
            config.std_insertsize = parse_or_zero(std);
            if let (Some(upper), Some(lower)) = (fields.upper, fields.lower) {
                config.uppercutoff = parse_or_zero(upper);
                config.lowercutoff = parse_or_zero(lower);
            } else {
                let spread = config.std_insertsize * self.options.cutoff_factor;
                config.uppercutoff = config.mean_insertsize + spread;
                config.lowercutoff = (config.mean_insertsize - spread).max(0.0);
            }
        }

        config.readlens = fields.readlen.map_or(0.0, parse_or_zero);
        self.max_readlen = self.max_readlen.max(config.readlens);

        #[allow(clippy::cast_possible_truncation)] // Legacy window size is integral
        let window = (config.mean_insertsize - 2.0 * config.readlens) as i32;
        self.window_size = self.window_size.min(window);

        debug!(
            library = %library,
            readgroup = %readgroup,
            bam_file = %bam_file,
            mean = config.mean_insertsize,
            std = config.std_insertsize,
            "Parsed config line"
        );

        if self.libraries.insert(library.to_string(), config).is_some() {
            debug!(library = %library, "Repeated library, keeping the latest line");
        }

        let command = fields.exe.unwrap_or(DEFAULT_VIEWER_COMMAND);
        match self.exes.entry(bam_file.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(command.to_string());
            }
            Entry::Occupied(entry) => {
                if entry.get() != command {
                    return Err(ConfigError::ConflictingViewerCommand {
                        bam_file: bam_file.to_string(),
                        existing: entry.get().clone(),
                        found: command.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Index the libraries and produce the finished table
    #[must_use]
    pub fn finish(self) -> BamConfig {
        let mut libraries = Vec::with_capacity(self.libraries.len());
        let mut lib_names_to_indices = BTreeMap::new();

        for (name, mut config) in self.libraries {
            config.index = libraries.len();
            lib_names_to_indices.insert(name, config.index);
            libraries.push(config);
        }

        let bam_files = self.exes.keys().cloned().collect();

        BamConfig {
            libraries,
            lib_names_to_indices,
            readgroup_library: self.readgroup_library,
            readgroup_platform: self.readgroup_platform,
            bam_files,
            exes: self.exes,
            fastq_outputs: self.fastq_outputs,
            max_readlen: self.max_readlen,
            max_read_window_size: self.window_size.max(MIN_READ_WINDOW_SIZE),
        }
    }
}
