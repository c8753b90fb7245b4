/// Parses the comma-separated skills text surface into the skills sequence.
///
/// Split on commas, trim each piece, drop empty pieces. The result fully
/// replaces the previous sequence.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the skills sequence back as the text surface.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_empty_and_whitespace_pieces() {
        assert_eq!(
            parse_skills("React, , TypeScript ,"),
            vec!["React".to_string(), "TypeScript".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_text_yields_no_skills() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ,,").is_empty());
    }

    #[test]
    fn test_trailing_comma_keystroke_does_not_add_a_skill() {
        assert_eq!(parse_skills("Rust,"), vec!["Rust".to_string()]);
    }

    #[test]
    fn test_join_then_parse_preserves_clean_skills() {
        let skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        assert_eq!(join_skills(&skills), "Rust,PostgreSQL");
        assert_eq!(parse_skills(&join_skills(&skills)), skills);
    }
}
