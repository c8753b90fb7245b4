use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{EducationEntry, ExperienceEntry, PersonalInfo};
use crate::errors::AppError;

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("{section}[{index}]: index out of range (len {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{section}.{field}: unknown field")]
    UnknownField { section: &'static str, field: String },

    #[error("{section}.{field}: expected {expected}")]
    FieldType {
        section: &'static str,
        field: String,
        expected: &'static str,
    },
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Scalar value written by a field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    fn into_text(self, section: &'static str, field: &str) -> Result<String, EditorError> {
        match self {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Flag(_) => Err(EditorError::FieldType {
                section,
                field: field.to_string(),
                expected: "text",
            }),
        }
    }

    fn into_flag(self, section: &'static str, field: &str) -> Result<bool, EditorError> {
        match self {
            FieldValue::Flag(b) => Ok(b),
            FieldValue::Text(_) => Err(EditorError::FieldType {
                section,
                field: field.to_string(),
                expected: "boolean",
            }),
        }
    }
}

/// A record whose scalar fields can be set by their JSON (camelCase) name.
pub trait EditableEntry {
    const SECTION: &'static str;

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError>;
}

fn unknown(section: &'static str, field: &str) -> EditorError {
    EditorError::UnknownField {
        section,
        field: field.to_string(),
    }
}

impl EditableEntry for ExperienceEntry {
    const SECTION: &'static str = "experience";

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        let slot = match field {
            "role" => &mut self.role,
            "company" => &mut self.company,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "description" => &mut self.description,
            "current" => {
                self.current = value.into_flag(Self::SECTION, field)?;
                return Ok(());
            }
            _ => return Err(unknown(Self::SECTION, field)),
        };
        *slot = Some(value.into_text(Self::SECTION, field)?);
        Ok(())
    }
}

impl EditableEntry for EducationEntry {
    const SECTION: &'static str = "education";

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        let slot = match field {
            "school" => &mut self.school,
            "degree" => &mut self.degree,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            _ => return Err(unknown(Self::SECTION, field)),
        };
        *slot = Some(value.into_text(Self::SECTION, field)?);
        Ok(())
    }
}

impl EditableEntry for PersonalInfo {
    const SECTION: &'static str = "personalInfo";

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        let slot = match field {
            "fullName" => &mut self.full_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "bio" => &mut self.bio,
            "linkedin" => &mut self.linkedin,
            "github" => &mut self.github,
            "location" => &mut self.location,
            _ => return Err(unknown(Self::SECTION, field)),
        };
        *slot = Some(value.into_text(Self::SECTION, field)?);
        Ok(())
    }
}

/// An entry plus the ephemeral key the view uses to track it across edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyed<T> {
    pub key: u64,
    pub value: T,
}

/// Positionally indexed collection of repeated entries.
///
/// Keys are issued from a monotonic counter and never reused, so a view can
/// keep row identity stable while indices shift. Keys are never persisted.
#[derive(Debug, Clone)]
pub struct SectionList<T> {
    entries: Vec<Keyed<T>>,
    next_key: u64,
}

impl<T> Default for SectionList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_key: 0,
        }
    }
}

impl<T: EditableEntry + Clone> SectionList<T> {
    pub fn from_entries(values: Vec<T>) -> Self {
        let mut list = Self::default();
        for value in values {
            list.append(value);
        }
        list
    }

    /// Adds `value` at the end and returns its key.
    pub fn append(&mut self, value: T) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.push(Keyed { key, value });
        key
    }

    /// Deletes the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<T, EditorError> {
        self.check(index)?;
        Ok(self.entries.remove(index).value)
    }

    pub fn update(&mut self, index: usize, field: &str, value: FieldValue) -> Result<(), EditorError> {
        self.check(index)?;
        self.entries[index].value.set_field(field, value)
    }

    /// Swaps in a fresh set of entries, keeping the key counter monotonic.
    pub fn replace_all(&mut self, values: Vec<T>) {
        self.entries.clear();
        for value in values {
            self.append(value);
        }
    }

    pub fn keyed(&self) -> &[Keyed<T>] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }

    fn check(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.entries.len() {
            return Err(EditorError::IndexOutOfRange {
                section: T::SECTION,
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_append_then_remove_restores_empty_list() {
        let mut list: SectionList<ExperienceEntry> = SectionList::default();
        let before = list.to_vec();

        list.append(ExperienceEntry::blank());
        assert_eq!(list.keyed().len(), 1);
        list.remove(0).unwrap();

        assert_eq!(list.to_vec(), before);
    }

    #[test]
    fn test_append_then_remove_restores_one_element_list() {
        let mut list = SectionList::from_entries(vec![ExperienceEntry {
            role: Some("Engineer".into()),
            ..Default::default()
        }]);
        let before = list.to_vec();

        list.append(ExperienceEntry::blank());
        list.remove(1).unwrap();

        assert_eq!(list.to_vec(), before);
    }

    #[test]
    fn test_remove_shifts_later_entries_and_keeps_their_keys() {
        let mut list: SectionList<EducationEntry> = SectionList::default();
        let k0 = list.append(EducationEntry::blank());
        let k1 = list.append(EducationEntry::blank());
        let k2 = list.append(EducationEntry::blank());

        list.remove(0).unwrap();

        let keys: Vec<u64> = list.keyed().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![k1, k2]);
        assert_ne!(k0, k1);
    }

    #[test]
    fn test_keys_are_not_reused_after_removal() {
        let mut list: SectionList<EducationEntry> = SectionList::default();
        let first = list.append(EducationEntry::blank());
        list.remove(0).unwrap();
        let second = list.append(EducationEntry::blank());
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_out_of_range_fails() {
        let mut list: SectionList<ExperienceEntry> = SectionList::default();
        let err = list.remove(0).unwrap_err();
        assert_eq!(err.to_string(), "experience[0]: index out of range (len 0)");
    }

    #[test]
    fn test_field_update_touches_only_target_entry() {
        let mut list =
            SectionList::from_entries(vec![ExperienceEntry::blank(), ExperienceEntry::blank()]);
        list.update(1, "company", text("Acme")).unwrap();
        list.update(1, "current", FieldValue::Flag(true)).unwrap();

        let entries = list.to_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ExperienceEntry::blank());
        assert_eq!(entries[1].company.as_deref(), Some("Acme"));
        assert!(entries[1].current);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut list = SectionList::from_entries(vec![EducationEntry::blank()]);
        let err = list.update(0, "gpa", text("4.0")).unwrap_err();
        assert!(matches!(err, EditorError::UnknownField { .. }));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let mut entry = ExperienceEntry::blank();
        assert!(entry.set_field("current", text("yes")).is_err());
        assert!(entry.set_field("role", FieldValue::Flag(true)).is_err());
    }

    #[test]
    fn test_personal_info_fields_by_name() {
        let mut info = PersonalInfo::default();
        info.set_field("github", text("gh/ada")).unwrap();
        assert_eq!(info.github.as_deref(), Some("gh/ada"));
    }

    #[test]
    fn test_field_value_deserializes_untagged() {
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Flag(true));
        let v: FieldValue = serde_json::from_str("\"Acme\"").unwrap();
        assert_eq!(v, text("Acme"));
    }
}
