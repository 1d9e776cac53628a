//! Configuration types
//!
//! Device configuration is fixed at build time. The firmware build script
//! parses `classifier.toml` into these types and embeds the result as a
//! constant.

pub mod types;

pub use types::{ConfigError, DeviceConfig, DisplaySettings, PipelineConfig, SerialSettings};

/// Longest prefix of `text` holding at most `max_chars` characters
///
/// Cuts on a char boundary. Used to fit build-time config diagnostics into
/// fixed-width boxes.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_prefix_short_text_unchanged() {
        assert_eq!(char_prefix("baudrate", 61), "baudrate");
        assert_eq!(char_prefix("", 3), "");
        assert_eq!(char_prefix("abc", 3), "abc");
    }

    #[test]
    fn test_char_prefix_counts_chars_not_bytes() {
        assert_eq!(char_prefix("abcdef", 2), "ab");
        assert_eq!(char_prefix("ãéîõü", 3), "ãéî");
    }

    #[test]
    fn test_char_prefix_multibyte_across_cut() {
        // 60 ASCII bytes then a 2-byte char straddling byte 61
        let mut line = "x".repeat(60);
        line.push_str("éééé");
        let cut = char_prefix(&line, 61);
        assert_eq!(cut.chars().count(), 61);
        assert!(cut.ends_with('é'));
        assert_eq!(cut.len(), 62);
    }
}
