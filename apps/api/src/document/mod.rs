// Résumé document model: the JSON content persisted with every resume.
// Shape only: any string may be empty and every field is optional.

pub mod model;
pub mod sample;
pub mod skills;
pub mod validation;

pub use model::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument};
