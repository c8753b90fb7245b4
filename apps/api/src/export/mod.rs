// Export / print trigger. Renders the full-scale preview and hands it to the
// print surface; the artifact is named after the resume title.

pub mod surface;

pub use surface::{ExportArtifact, PrintJob, PrintSurface, S3PrintSurface};

use tracing::info;
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::render::render;

const DEFAULT_ARTIFACT_STEM: &str = "Resume";
const MAX_STEM_CHARS: usize = 100;

/// File name for a print artifact: the title with path and control characters
/// replaced, `Resume` when nothing usable is left.
pub fn artifact_filename(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let stem = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() {
        DEFAULT_ARTIFACT_STEM
    } else {
        stem
    };
    format!("{stem}.html")
}

/// Renders `content` at full scale and prints it.
pub async fn export_document(
    surface: &dyn PrintSurface,
    owner: Uuid,
    resume_id: Uuid,
    title: &str,
    content: &ResumeDocument,
) -> Result<ExportArtifact, AppError> {
    let tree = render(content);
    let artifact = surface
        .print(PrintJob {
            owner,
            resume_id,
            title,
            tree: &tree,
        })
        .await?;
    info!(
        "Exported resume {} as {} ({} bytes)",
        resume_id, artifact.filename, artifact.size_bytes
    );
    Ok(artifact)
}
