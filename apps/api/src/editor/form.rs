use serde::{Deserialize, Serialize};

use crate::document::skills::{join_skills, parse_skills};
use crate::document::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument};
use crate::editor::sections::{EditableEntry, EditorError, FieldValue, SectionList};

/// The editor's working copy: one document split into independently edited
/// sections. Nothing here is persisted until the session saves.
#[derive(Debug, Clone, Default)]
pub struct ResumeForm {
    personal_info: PersonalInfo,
    experience: SectionList<ExperienceEntry>,
    education: SectionList<EducationEntry>,
    skills: Vec<String>,
    projects: Vec<ProjectEntry>,
}

/// One edit applied to the working copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    SetPersonal {
        field: String,
        value: String,
    },
    AppendExperience {
        #[serde(default)]
        entry: Option<ExperienceEntry>,
    },
    RemoveExperience {
        index: usize,
    },
    UpdateExperience {
        index: usize,
        field: String,
        value: FieldValue,
    },
    AppendEducation {
        #[serde(default)]
        entry: Option<EducationEntry>,
    },
    RemoveEducation {
        index: usize,
    },
    UpdateEducation {
        index: usize,
        field: String,
        value: FieldValue,
    },
    SetSkillsText {
        text: String,
    },
}

impl ResumeForm {
    pub fn from_document(doc: ResumeDocument) -> Self {
        let mut form = Self::default();
        form.reset(doc);
        form
    }

    /// Replaces the entire working copy. Unsaved edits are discarded.
    pub fn reset(&mut self, doc: ResumeDocument) {
        self.personal_info = doc.personal_info;
        self.experience.replace_all(doc.experience);
        self.education.replace_all(doc.education);
        self.skills = doc.skills;
        self.projects = doc.projects;
    }

    pub fn to_document(&self) -> ResumeDocument {
        ResumeDocument {
            personal_info: self.personal_info.clone(),
            experience: self.experience.to_vec(),
            education: self.education.to_vec(),
            skills: self.skills.clone(),
            projects: self.projects.clone(),
        }
    }

    pub fn apply(&mut self, command: EditCommand) -> Result<(), EditorError> {
        match command {
            EditCommand::SetPersonal { field, value } => self
                .personal_info
                .set_field(&field, FieldValue::Text(value)),
            EditCommand::AppendExperience { entry } => {
                self.experience
                    .append(entry.unwrap_or_else(ExperienceEntry::blank));
                Ok(())
            }
            EditCommand::RemoveExperience { index } => self.experience.remove(index).map(|_| ()),
            EditCommand::UpdateExperience {
                index,
                field,
                value,
            } => self.experience.update(index, &field, value),
            EditCommand::AppendEducation { entry } => {
                self.education
                    .append(entry.unwrap_or_else(EducationEntry::blank));
                Ok(())
            }
            EditCommand::RemoveEducation { index } => self.education.remove(index).map(|_| ()),
            EditCommand::UpdateEducation {
                index,
                field,
                value,
            } => self.education.update(index, &field, value),
            EditCommand::SetSkillsText { text } => {
                self.skills = parse_skills(&text);
                Ok(())
            }
        }
    }

    pub fn skills_text(&self) -> String {
        join_skills(&self.skills)
    }

    pub fn experience_keys(&self) -> Vec<u64> {
        self.experience.keyed().iter().map(|e| e.key).collect()
    }

    pub fn education_keys(&self) -> Vec<u64> {
        self.education.keyed().iter().map(|e| e.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use serde_json::json;

    #[test]
    fn test_from_document_round_trips() {
        let doc = sample_document();
        assert_eq!(ResumeForm::from_document(doc.clone()).to_document(), doc);
    }

    #[test]
    fn test_skills_text_command_replaces_sequence() {
        let mut form = ResumeForm::from_document(sample_document());
        form.apply(EditCommand::SetSkillsText {
            text: "React, , TypeScript ,".into(),
        })
        .unwrap();
        assert_eq!(
            form.to_document().skills,
            vec!["React".to_string(), "TypeScript".to_string()]
        );
        assert_eq!(form.skills_text(), "React,TypeScript");
    }

    #[test]
    fn test_append_uses_blank_default_entry() {
        let mut form = ResumeForm::default();
        form.apply(EditCommand::AppendExperience { entry: None })
            .unwrap();
        form.apply(EditCommand::AppendEducation { entry: None })
            .unwrap();
        let doc = form.to_document();
        assert_eq!(doc.experience, vec![ExperienceEntry::blank()]);
        assert_eq!(doc.education, vec![EducationEntry::blank()]);
    }

    #[test]
    fn test_projects_survive_edits_untouched() {
        let doc = sample_document();
        let mut form = ResumeForm::from_document(doc.clone());
        form.apply(EditCommand::RemoveExperience { index: 0 })
            .unwrap();
        assert_eq!(form.to_document().projects, doc.projects);
    }

    #[test]
    fn test_reset_discards_local_edits() {
        let doc = sample_document();
        let mut form = ResumeForm::from_document(doc.clone());
        form.apply(EditCommand::SetPersonal {
            field: "fullName".into(),
            value: "Someone Else".into(),
        })
        .unwrap();

        form.reset(doc.clone());
        assert_eq!(form.to_document(), doc);
    }

    #[test]
    fn test_reset_issues_fresh_keys() {
        let mut form = ResumeForm::from_document(sample_document());
        let before = form.experience_keys();
        form.reset(sample_document());
        assert_ne!(form.experience_keys(), before);
    }

    #[test]
    fn test_commands_deserialize_from_tagged_json() {
        let cmd: EditCommand = serde_json::from_value(json!({
            "op": "update_experience",
            "index": 0,
            "field": "current",
            "value": true
        }))
        .unwrap();
        assert_eq!(
            cmd,
            EditCommand::UpdateExperience {
                index: 0,
                field: "current".into(),
                value: FieldValue::Flag(true)
            }
        );

        let cmd: EditCommand =
            serde_json::from_value(json!({ "op": "append_education" })).unwrap();
        assert_eq!(cmd, EditCommand::AppendEducation { entry: None });
    }
}
