use crate::document::ResumeDocument;
use crate::errors::AppError;

pub const MAX_TITLE_CHARS: usize = 200;

/// Checks a resume title. Errors name the field first: `title: ...`.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title: must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "title: must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Shape checks on a document arriving through a write payload.
/// Stops at the first violated field.
pub fn validate_document(content: &ResumeDocument) -> Result<(), AppError> {
    if let Some(i) = content.skills.iter().position(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(format!(
            "content.skills[{i}]: must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_title_fails() {
        assert_eq!(
            message(validate_title("   ").unwrap_err()),
            "title: must not be empty"
        );
    }

    #[test]
    fn test_long_title_fails() {
        let title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(message(validate_title(&title).unwrap_err()).starts_with("title:"));
    }

    #[test]
    fn test_reasonable_title_passes() {
        assert!(validate_title("Backend Engineer 2025").is_ok());
    }

    #[test]
    fn test_first_empty_skill_is_reported() {
        let doc = ResumeDocument {
            skills: vec!["Rust".into(), " ".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(
            message(validate_document(&doc).unwrap_err()),
            "content.skills[1]: must not be empty"
        );
    }

    #[test]
    fn test_partially_filled_document_passes() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(crate::document::ExperienceEntry::blank());
        assert!(validate_document(&doc).is_ok());
    }
}
