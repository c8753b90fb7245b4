use crate::document::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument};

pub const SAMPLE_TITLE: &str = "Sample Resume";

/// Demo content seeded for `DEMO_USER_ID` on non-production deployments.
pub fn sample_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            full_name: Some("Demo User".to_string()),
            email: Some("demo@example.com".to_string()),
            phone: Some("+1 234 567 8900".to_string()),
            bio: Some(
                "Experienced Software Engineer with a passion for building scalable applications."
                    .to_string(),
            ),
            location: Some("San Francisco, CA".to_string()),
            ..Default::default()
        },
        experience: vec![ExperienceEntry {
            role: Some("Senior Developer".to_string()),
            company: Some("Tech Corp".to_string()),
            start_date: Some("2020-01".to_string()),
            end_date: Some("Present".to_string()),
            description: Some(
                "• Led a team of 5 developers.\n• Architected microservices.".to_string(),
            ),
            current: true,
        }],
        education: vec![EducationEntry {
            degree: Some("BS Computer Science".to_string()),
            school: Some("University of Tech".to_string()),
            start_date: Some("2015-09".to_string()),
            end_date: Some("2019-05".to_string()),
        }],
        skills: ["React", "Node.js", "TypeScript", "PostgreSQL"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        projects: vec![ProjectEntry {
            name: Some("Resume Builder".to_string()),
            description: Some("An AI-powered resume builder app.".to_string()),
            link: Some("https://example.com".to_string()),
            tech_stack: vec![],
        }],
    }
}
