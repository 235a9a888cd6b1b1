//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `loot-tower <version> (<date> <commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "loot-tower {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_mentions_build() {
        let line = version_line();
        assert!(line.starts_with("loot-tower "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.contains(BUILD_DATE));
    }

    #[test]
    fn test_build_commit_format() {
        assert!(!BUILD_COMMIT.is_empty(), "failed git lookup must fall back");
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_has_no_empty_fields() {
        assert!(!version_line().contains("( "));
        assert!(!version_line().contains(" )"));
    }
}
