//! Draft generation: asks the text generator for a full résumé document.
//!
//! The output is accepted only if it parses as a JSON object matching the
//! document schema. Anything else fails the whole request; nothing is merged.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::generation::prompts::{
    DRAFT_PROMPT_TEMPLATE, DRAFT_SYSTEM_TEMPLATE, FALLBACK_EDUCATION, FALLBACK_PROJECTS,
    FALLBACK_SKILLS,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json_object, TextGenerator};

/// Request body for draft generation. camelCase keys are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftRequest {
    #[serde(alias = "jobRole")]
    pub job_role: String,
    #[serde(alias = "experienceLevel")]
    pub experience_level: String,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default, alias = "currentEducation")]
    pub current_education: Option<String>,
    #[serde(default, alias = "projectsContext")]
    pub projects_context: Option<String>,
}

impl DraftRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.job_role.trim().is_empty() {
            return Err(AppError::Validation("job_role: must not be empty".to_string()));
        }
        if self.experience_level.trim().is_empty() {
            return Err(AppError::Validation(
                "experience_level: must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Calls the generator and parses its answer into a document.
pub async fn generate_draft(
    generator: &dyn TextGenerator,
    request: &DraftRequest,
) -> Result<ResumeDocument, AppError> {
    request.validate()?;

    let system = DRAFT_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_SYSTEM);
    let prompt = build_draft_prompt(request);

    info!(
        "Generating draft for role '{}' ({})",
        request.job_role, request.experience_level
    );
    let raw = generator
        .complete(&system, &prompt)
        .await
        .map_err(|e| AppError::Generation(format!("Draft LLM call failed: {e}")))?;

    let draft = parse_draft(&raw)?;
    info!(
        "Draft generated: {} experience, {} education, {} skills, {} projects",
        draft.experience.len(),
        draft.education.len(),
        draft.skills.len(),
        draft.projects.len()
    );
    Ok(draft)
}

fn build_draft_prompt(request: &DraftRequest) -> String {
    fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
    }

    DRAFT_PROMPT_TEMPLATE
        .replace("{job_role}", request.job_role.trim())
        .replace("{experience_level}", request.experience_level.trim())
        .replace("{skills}", or_fallback(&request.skills, FALLBACK_SKILLS))
        .replace(
            "{education}",
            or_fallback(&request.current_education, FALLBACK_EDUCATION),
        )
        .replace(
            "{projects}",
            or_fallback(&request.projects_context, FALLBACK_PROJECTS),
        )
}

/// Strict parse: the text must carry a JSON object whose fields have the
/// declared types.
fn parse_draft(raw: &str) -> Result<ResumeDocument, AppError> {
    let json = extract_json_object(raw);

    let value: Value = serde_json::from_str(json).map_err(|e| {
        warn!("Draft output is not JSON: {e}");
        AppError::Generation(format!("AI output is not valid JSON: {e}"))
    })?;
    if !value.is_object() {
        return Err(AppError::Generation(
            "AI output is not a JSON object".to_string(),
        ));
    }

    let mut draft: ResumeDocument = serde_json::from_value(value).map_err(|e| {
        AppError::Generation(format!("AI output does not match the resume schema: {e}"))
    })?;

    // Keep the no-empty-skill invariant for drafts that are later saved as-is.
    draft.skills.retain(|s| !s.trim().is_empty());
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Returns canned text and remembers the last prompt.
    struct CannedGenerator {
        reply: Result<String, ()>,
        last_prompt: Mutex<Option<(String, String)>>,
    }

    impl CannedGenerator {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last_prompt: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            *self.last_prompt.lock().unwrap() = Some((system.to_string(), prompt.to_string()));
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }
    }

    fn request() -> DraftRequest {
        DraftRequest {
            job_role: "Backend Engineer".into(),
            experience_level: "Senior".into(),
            skills: Some("Rust, PostgreSQL".into()),
            current_education: None,
            projects_context: Some("  ".into()),
        }
    }

    const DRAFT: &str = r#"{
        "personalInfo": { "fullName": "Alex Doe", "location": "Berlin" },
        "experience": [{ "role": "Engineer", "company": "Acme", "startDate": "2021-01", "endDate": "Present", "description": "• Built things" }],
        "education": [{ "degree": "BSc", "school": "TU", "startDate": "2015", "endDate": "2019" }],
        "skills": ["Rust", "", "PostgreSQL"],
        "projects": [{ "name": "vitae", "description": "Resume builder", "link": "", "techStack": ["Rust"] }]
    }"#;

    #[tokio::test]
    async fn test_valid_draft_is_parsed() {
        let generator = CannedGenerator::ok(DRAFT);
        let draft = generate_draft(&generator, &request()).await.unwrap();

        assert_eq!(draft.personal_info.full_name.as_deref(), Some("Alex Doe"));
        assert_eq!(draft.experience.len(), 1);
        assert!(!draft.experience[0].current);
        assert_eq!(draft.skills, vec!["Rust".to_string(), "PostgreSQL".to_string()]);
        assert_eq!(draft.projects[0].tech_stack, vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_fenced_draft_with_prose_is_accepted() {
        let generator = CannedGenerator::ok(&format!("```json\n{DRAFT}\n```"));
        assert!(generate_draft(&generator, &request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_json_fails_generation() {
        let generator = CannedGenerator::ok("{\"personalInfo\": {\"fullName\": \"Al");
        let err = generate_draft(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_schema_mismatch_fails_generation() {
        let generator = CannedGenerator::ok(r#"{"skills": "Rust, Go", "experience": []}"#);
        let err = generate_draft(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_non_object_fails_generation() {
        let generator = CannedGenerator::ok("[]");
        let err = generate_draft(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_is_generation_failure() {
        let generator = CannedGenerator::failing();
        let err = generate_draft(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_blank_role_is_rejected_before_calling() {
        let generator = CannedGenerator::ok(DRAFT);
        let mut req = request();
        req.job_role = " ".into();

        let err = generate_draft(&generator, &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(generator.last_prompt.lock().unwrap().is_none());
    }

    #[test]
    fn test_request_accepts_camel_case_keys() {
        let req: DraftRequest = serde_json::from_value(serde_json::json!({
            "jobRole": "Designer",
            "experienceLevel": "Mid",
            "currentEducation": "BA Design",
            "projectsContext": "Portfolio site"
        }))
        .unwrap();
        assert_eq!(req.job_role, "Designer");
        assert_eq!(req.experience_level, "Mid");
        assert_eq!(req.current_education.as_deref(), Some("BA Design"));
        assert_eq!(req.projects_context.as_deref(), Some("Portfolio site"));
    }

    #[tokio::test]
    async fn test_prompt_uses_fallbacks_for_missing_context() {
        let generator = CannedGenerator::ok(DRAFT);
        generate_draft(&generator, &request()).await.unwrap();

        let (system, prompt) = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(system.contains("Return ONLY valid JSON"));
        assert!(system.contains("\"personalInfo\""));
        assert!(prompt.contains("Job Role: Backend Engineer"));
        assert!(prompt.contains("Skills: Rust, PostgreSQL"));
        assert!(prompt.contains("Education: Relevant education"));
        assert!(prompt.contains("Projects: Relevant projects"));
    }
}
