//! Extraction of `key:value` fields from a single legacy config line.
//!
//! Lines are tab-separated `key:value` pairs, but values may contain spaces
//! (`exe:samtools view`) and keys are matched as substrings, so a key can turn
//! up inside unrelated text. Values always run from just after the colon to
//! the next tab, or to the end of the line.
//!
//! Three lookups are supported:
//!
//! - [`find_exact`]: `key:` must appear verbatim
//! - [`find_prefixed`]: the first occurrence of `key` whose following colon is
//!   not separated from it by whitespace; false positives are skipped
//! - [`find_two_keys`]: `first` followed later by `second`, as in `mapqual`

fn is_field_whitespace(c: char) -> bool {
    c == '\t' || c == ' '
}

/// Value starting at byte offset `start`, ending at the next tab or end of line
fn value_at(line: &str, start: usize) -> &str {
    let rest = &line[start..];
    rest.find('\t').map_or(rest, |end| &rest[..end])
}

/// Find the value of `key:` in the line.
///
/// Matches anywhere, so `group` finds the value of `readgroup:rg1`.
#[must_use]
pub fn find_exact<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("{key}:");
    let pos = line.find(&pattern)?;
    Some(value_at(line, pos + pattern.len()))
}

/// Find the value of the first real field whose name contains `key`.
///
/// An occurrence of `key` is a false positive when whitespace sits between it
/// and the next colon; scanning then resumes from that colon. Each retry
/// starts strictly further into the line, so the scan is linear.
#[must_use]
pub fn find_prefixed<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut from = 0;
    loop {
        let start = from + line[from..].find(key)?;
        let after = start + key.len();
        let colon = after + line[after..].find(':')?;

        if line[after..colon].contains(is_field_whitespace) {
            from = colon;
            continue;
        }

        return Some(value_at(line, colon + 1));
    }
}

/// Find the value of a field named by two ordered substrings, e.g. `map` then `qual`.
///
/// Only the first occurrence of `first` is considered, and any whitespace
/// between the end of `first` and the closing colon rejects the match
/// outright; there is no retry further along the line.
#[must_use]
pub fn find_two_keys<'a>(line: &'a str, first: &str, second: &str) -> Option<&'a str> {
    let after_first = line.find(first)? + first.len();
    let after_second = after_first + line[after_first..].find(second)? + second.len();
    let colon = after_second + line[after_second..].find(':')?;

    if line[after_first..colon].contains(is_field_whitespace) {
        return None;
    }
    Some(value_at(line, colon + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "readgroup:rg1\tplatform:illumina\tmap:x.bam\treadlen:90.00\tlib:lib1\tnum:10001\tlower:277.03\tupper:525.50\tmean:467.59\tstd:31.91\tSWnormality:minus infinity\texe:samtools view";

    #[test]
    fn test_exact_fields() {
        assert_eq!(find_exact(LINE, "map"), Some("x.bam"));
        assert_eq!(find_exact(LINE, "group"), Some("rg1"));
        assert_eq!(find_exact(LINE, "platform"), Some("illumina"));
        assert_eq!(find_exact(LINE, "missing"), None);
    }

    #[test]
    fn test_prefixed_fields() {
        assert_eq!(find_prefixed(LINE, "lib"), Some("lib1"));
        assert_eq!(find_prefixed(LINE, "mean"), Some("467.59"));
        assert_eq!(find_prefixed(LINE, "std"), Some("31.91"));
        assert_eq!(find_prefixed(LINE, "readlen"), Some("90.00"));
        assert_eq!(find_prefixed(LINE, "upp"), Some("525.50"));
        assert_eq!(find_prefixed(LINE, "low"), Some("277.03"));
        assert_eq!(find_prefixed(LINE, "samp"), None);
    }

    #[test]
    fn test_value_runs_to_end_of_line() {
        assert_eq!(find_prefixed(LINE, "exe"), Some("samtools view"));
    }

    #[test]
    fn test_prefixed_skips_false_positive() {
        // "lib" first appears inside a value; the next colon is past whitespace,
        // so scanning resumes from that colon
        let line = "note:a lib here\tlower:1\tlib:L7\tmap:y.bam";
        assert_eq!(find_prefixed(line, "lib"), Some("L7"));
    }

    #[test]
    fn test_prefixed_skips_several_false_positives() {
        let line = "a:std dev\tb:c\tnote:std again\tx:1\tstddev:12.5";
        assert_eq!(find_prefixed(line, "std"), Some("12.5"));
    }

    #[test]
    fn test_prefixed_resume_skips_key_before_colon() {
        // The real "library" key sits before the colon scanning resumes from
        let line = "note:a lib here\tlibrary:L7";
        assert_eq!(find_prefixed(line, "lib"), None);
    }

    #[test]
    fn test_prefixed_no_colon_after_key() {
        assert_eq!(find_prefixed("map:x.bam\ttrailing lib", "lib"), None);
        assert_eq!(find_prefixed("a:one lib\tb two", "lib"), None);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(find_exact("map:\tlib:L1", "map"), Some(""));
        assert_eq!(find_prefixed("lib:", "lib"), Some(""));
    }

    #[test]
    fn test_two_keys() {
        let line = "mapqual:20\tmap:x.bam";
        assert_eq!(find_two_keys(line, "map", "qual"), Some("20"));

        let line = "mapping_quality:35\tlib:L1";
        assert_eq!(find_two_keys(line, "map", "qual"), Some("35"));
    }

    #[test]
    fn test_two_keys_rejects_whitespace_without_retry() {
        // First "map" belongs to map:x.bam, so the span to "qual" crosses a tab
        let line = "map:x.bam\tmapqual:20";
        assert_eq!(find_two_keys(line, "map", "qual"), None);
        assert_eq!(find_two_keys(LINE, "map", "qual"), None);
    }
}
