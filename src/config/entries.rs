use std::collections::BTreeSet;
use std::io::BufRead;

use serde::Serialize;

use crate::config::bam_config::ConfigError;
use crate::config::{library_name, read_line_lossy, section_lines};
use crate::core::types::{CanonicalField, NOT_FOUND};
use crate::parsing::line::find_exact;
use crate::parsing::token::classify;

/// One line of a legacy config, kept as written.
///
/// Only the read group is resolved up front; other fields are looked up from
/// the stored line when asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub readgroup: String,
    line: String,
}

impl ConfigEntry {
    /// Build an entry from a non-empty config line.
    ///
    /// The read group is the `group:` value, falling back to the library
    /// (then sample) name the same way the aggregated table does.
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        let readgroup = find_exact(&line, "group")
            .or_else(|| library_name(&line))
            .unwrap_or(NOT_FOUND)
            .to_string();
        Self { readgroup, line }
    }

    /// The line this entry was built from
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// `(key, value)` pairs of the tab-separated tokens, split at the first colon.
    ///
    /// Tokens without a colon are skipped.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.line.split('\t').filter_map(|token| token.split_once(':'))
    }

    /// First value whose key classifies as `field`
    #[must_use]
    pub fn field(&self, field: CanonicalField) -> Option<&str> {
        self.fields()
            .find(|(key, _)| classify(key) == Some(field))
            .map(|(_, value)| value)
    }

    /// Value of a key spelled exactly as given
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        find_exact(&self.line, "platform")
    }

    /// Library name, or the sample name when no library is given.
    ///
    /// Looked up the same way [`BamConfig`](super::bam_config::BamConfig)
    /// does, so an entry always names the library its line aggregates into.
    #[must_use]
    pub fn library_name(&self) -> Option<&str> {
        library_name(&self.line)
    }

    /// Mapping file, from the `map:` field
    #[must_use]
    pub fn bam_file(&self) -> Option<&str> {
        find_exact(&self.line, "map")
    }
}

/// Every line of a config section, in input order and without deduplication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawEntryLog {
    entries: Vec<ConfigEntry>,
}

impl RawEntryLog {
    /// Collect entries up to the first empty line
    pub fn collect<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .take_while(|line| !line.as_ref().is_empty())
            .map(|line| ConfigEntry::new(line.as_ref()))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::collect(section_lines(text))
    }

    /// Collect entries from a reader, up to the first empty line
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if reading fails.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        let mut buf = Vec::new();
        while let Some(line) = read_line_lossy(&mut reader, &mut buf)? {
            if line.is_empty() {
                break;
            }
            entries.push(ConfigEntry::new(line));
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct read groups across all entries
    #[must_use]
    pub fn readgroups(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.readgroup.clone()).collect()
    }

    /// Entries for a read group, in input order
    pub fn entries_for_readgroup<'a>(
        &'a self,
        readgroup: &'a str,
    ) -> impl Iterator<Item = &'a ConfigEntry> + 'a {
        self.entries.iter().filter(move |e| e.readgroup == readgroup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "readgroup:rg1\tplatform:illumina\tmap:x.bam\treadlen:90.00\tlib:lib1\tmean:467.59\tstd:31.91\texe:samtools view";

    #[test]
    fn test_entry_fields_on_demand() {
        let entry = ConfigEntry::new(LINE);

        assert_eq!(entry.readgroup, "rg1");
        assert_eq!(entry.platform(), Some("illumina"));
        assert_eq!(entry.library_name(), Some("lib1"));
        assert_eq!(entry.bam_file(), Some("x.bam"));
        assert_eq!(entry.field(CanonicalField::InsertSizeMean), Some("467.59"));
        assert_eq!(entry.field(CanonicalField::ReadLength), Some("90.00"));
        assert_eq!(entry.field(CanonicalField::MinMapQual), None);
        assert_eq!(entry.get("exe"), Some("samtools view"));
        assert_eq!(entry.get("EXE"), None);
        assert_eq!(entry.fields().count(), 8);
    }

    #[test]
    fn test_entry_readgroup_falls_back_to_library() {
        assert_eq!(ConfigEntry::new("map:x.bam\tlib:lib9").readgroup, "lib9");
        assert_eq!(ConfigEntry::new("map:x.bam\tsample:S1").readgroup, "S1");
        assert_eq!(ConfigEntry::new("map:x.bam").readgroup, NOT_FOUND);
    }

    #[test]
    fn test_entry_library_name_falls_back_to_sample() {
        let entry = ConfigEntry::new("map:x.bam\tsample_name:S1");
        assert_eq!(entry.library_name(), Some("S1"));
    }

    #[test]
    fn test_entry_library_name_matches_table_lookup() {
        // "lib" inside a value is skipped by the resumed scan, as in the table
        let entry = ConfigEntry::new("readgroup:rg1\tnote:my lib\tlib:L1");
        assert_eq!(entry.library_name(), None);
        assert_eq!(entry.field(CanonicalField::LibraryName), Some("L1"));

        let entry = ConfigEntry::new("readgroup:rg1\tnote:my lib\tmap:x.bam\tlib:L1");
        assert_eq!(entry.library_name(), Some("L1"));
    }

    #[test]
    fn test_log_keeps_duplicates_in_order() {
        let text = "readgroup:rg2\tlib:lib1\n\
                    readgroup:rg1\tlib:lib1\n\
                    readgroup:rg2\tlib:lib2\n";
        let log = RawEntryLog::from_text(text);

        assert_eq!(log.len(), 3);
        let rgs: Vec<_> = log.entries().iter().map(|e| e.readgroup.as_str()).collect();
        assert_eq!(rgs, ["rg2", "rg1", "rg2"]);
        assert_eq!(log.readgroups().len(), 2);

        let libs: Vec<_> = log
            .entries_for_readgroup("rg2")
            .filter_map(ConfigEntry::library_name)
            .collect();
        assert_eq!(libs, ["lib1", "lib2"]);
    }

    #[test]
    fn test_log_stops_at_first_empty_line() {
        let log = RawEntryLog::from_text("readgroup:rg1\tlib:a\n\nreadgroup:rg2\tlib:b\n");
        assert_eq!(log.len(), 1);

        let log = RawEntryLog::collect(["readgroup:rg1", "", "readgroup:rg2"]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_log_from_reader_tolerates_invalid_utf8() {
        let bytes: &[u8] = b"readgroup:rg1\tlib:a\tnote:caf\xE9\nreadgroup:rg\xE9\tlib:b\n";
        let log = RawEntryLog::from_reader(bytes).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].readgroup, "rg1");
        assert_eq!(log.entries()[0].get("note"), Some("caf\u{FFFD}"));
        assert_eq!(log.entries()[1].readgroup, "rg\u{FFFD}");
        assert_eq!(log.entries()[1].library_name(), Some("b"));
    }

    #[test]
    fn test_log_from_reader() {
        let text = "readgroup:rg1\tlib:a\nreadgroup:rg2\tlib:b\n";
        let log = RawEntryLog::from_reader(text.as_bytes()).unwrap();
        assert_eq!(log, RawEntryLog::from_text(text));
        assert!(!log.is_empty());
    }
}
