use serde::Serialize;

use crate::document::{ExperienceEntry, ResumeDocument};

/// Printable visual representation of a résumé document.
///
/// Produced by [`render`]; serialized to HTML by [`crate::render::html`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreviewTree {
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub headline: String,
    pub contacts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    Entries { items: Vec<Item> },
    Tags { tags: Vec<String> },
}

/// One entry row: bold title, secondary line, right-aligned period, body lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    pub period: String,
    pub lines: Vec<String>,
    pub tags: Vec<String>,
}

/// Projects a document onto its visual tree.
///
/// Pure and total: every field is optional, absent fields render as empty
/// strings and empty collections drop their section.
pub fn render(doc: &ResumeDocument) -> PreviewTree {
    let info = &doc.personal_info;
    let header = Header {
        name: text(&info.full_name),
        headline: text(&info.bio),
        contacts: [
            &info.email,
            &info.phone,
            &info.location,
            &info.linkedin,
            &info.github,
        ]
        .into_iter()
        .map(text)
        .filter(|c| !c.is_empty())
        .collect(),
    };

    let mut sections = Vec::new();

    if !doc.experience.is_empty() {
        sections.push(Section {
            kind: SectionKind::Experience,
            body: SectionBody::Entries {
                items: doc.experience.iter().map(experience_item).collect(),
            },
        });
    }

    if !doc.education.is_empty() {
        let items = doc
            .education
            .iter()
            .map(|e| Item {
                title: text(&e.school),
                subtitle: text(&e.degree),
                period: period(&e.start_date, &e.end_date, false),
                ..Default::default()
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Education,
            body: SectionBody::Entries { items },
        });
    }

    if !doc.skills.is_empty() {
        sections.push(Section {
            kind: SectionKind::Skills,
            body: SectionBody::Tags {
                tags: doc.skills.clone(),
            },
        });
    }

    if !doc.projects.is_empty() {
        let items = doc
            .projects
            .iter()
            .map(|p| Item {
                title: text(&p.name),
                subtitle: text(&p.link),
                period: String::new(),
                lines: lines(&p.description),
                tags: p.tech_stack.clone(),
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Projects,
            body: SectionBody::Entries { items },
        });
    }

    PreviewTree { header, sections }
}

fn experience_item(e: &ExperienceEntry) -> Item {
    Item {
        title: text(&e.role),
        subtitle: text(&e.company),
        period: period(&e.start_date, &e.end_date, e.current),
        lines: lines(&e.description),
        tags: Vec::new(),
    }
}

fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn lines(field: &Option<String>) -> Vec<String> {
    field
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// `start – end`, with an empty end on a current role reading "Present".
fn period(start: &Option<String>, end: &Option<String>, current: bool) -> String {
    let start = text(start);
    let mut end = text(end);
    if end.is_empty() && current {
        end = "Present".to_string();
    }
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{start} – {end}"),
    }
}
