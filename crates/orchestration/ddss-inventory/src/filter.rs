//! Journal file selection.

/// Key suffix of a compressed Splunk raw-data journal.
pub const JOURNAL_SUFFIX: &str = "journal.zst";

/// Returns true if the key names a DDSS journal file.
pub fn is_journal_key(key: &str) -> bool {
    key.ends_with(JOURNAL_SUFFIX)
}
