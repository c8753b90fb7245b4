// Prompt constants for AI draft generation.
// Reuses the JSON-only fragment from llm_client::prompts.

/// System prompt template. Replace `{json_only}` before sending.
pub const DRAFT_SYSTEM_TEMPLATE: &str = r#"You are an expert resume writer.
{json_only}

JSON schema:
{
  "personalInfo": { "fullName": "", "email": "", "phone": "", "bio": "", "linkedin": "", "github": "", "location": "" },
  "experience": [{ "role": "", "company": "", "startDate": "YYYY-MM", "endDate": "YYYY-MM or Present", "description": "• Point 1\n• Point 2", "current": false }],
  "education": [{ "degree": "", "school": "", "startDate": "YYYY-MM", "endDate": "YYYY-MM" }],
  "skills": [],
  "projects": [{ "name": "", "description": "", "link": "", "techStack": [] }]
}"#;

/// User prompt template.
/// Replace: {job_role}, {experience_level}, {skills}, {education}, {projects}
pub const DRAFT_PROMPT_TEMPLATE: &str = "Job Role: {job_role}
Experience Level: {experience_level}
Skills: {skills}
Education: {education}
Projects: {projects}";

pub const FALLBACK_SKILLS: &str = "Relevant skills";
pub const FALLBACK_EDUCATION: &str = "Relevant education";
pub const FALLBACK_PROJECTS: &str = "Relevant projects";
