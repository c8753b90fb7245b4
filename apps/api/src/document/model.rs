use serde::{Deserialize, Serialize};

/// The résumé content aggregate. Persisted as JSON with camelCase keys.
///
/// Missing keys deserialize to empty values and absent optional strings are
/// omitted on serialization, so a document survives a store round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    /// Carried through the editor untouched; there is no projects section editor.
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub current: bool,
}

impl ExperienceEntry {
    /// The record the editor appends: blank text fields, no end date, not current.
    pub fn blank() -> Self {
        Self {
            role: Some(String::new()),
            company: Some(String::new()),
            start_date: Some(String::new()),
            end_date: None,
            description: Some(String::new()),
            current: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl EducationEntry {
    pub fn blank() -> Self {
        Self {
            school: Some(String::new()),
            degree: Some(String::new()),
            start_date: Some(String::new()),
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub tech_stack: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_a_valid_document() {
        let doc: ResumeDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(doc, ResumeDocument::default());
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Ada Lovelace" },
            "experience": [{ "role": "Analyst", "startDate": "1842-01", "current": true }],
            "projects": [{ "name": "Engine notes", "techStack": ["Punch cards"] }]
        }))
        .unwrap();

        assert_eq!(doc.personal_info.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(doc.experience[0].start_date.as_deref(), Some("1842-01"));
        assert!(doc.experience[0].current);
        assert_eq!(doc.projects[0].tech_stack, vec!["Punch cards".to_string()]);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let value = serde_json::to_value(ExperienceEntry::blank()).unwrap();
        assert!(value.get("endDate").is_none());
        assert_eq!(value["role"], "");
        assert_eq!(value["current"], false);
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result: Result<ResumeDocument, _> =
            serde_json::from_value(json!({ "skills": "Rust, Go" }));
        assert!(result.is_err());
    }
}
