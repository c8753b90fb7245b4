use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::artifact_filename;
use crate::render::{to_html, PreviewTree, Scale};

/// A print request: the full-scale preview tree plus naming context.
pub struct PrintJob<'a> {
    pub owner: Uuid,
    pub resume_id: Uuid,
    pub title: &'a str,
    pub tree: &'a PreviewTree,
}

/// Descriptor of a produced print artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportArtifact {
    pub id: Uuid,
    pub filename: String,
    pub key: String,
    pub url: String,
    pub size_bytes: usize,
    pub created_at: DateTime<Utc>,
}

/// The platform print pipeline: accepts a renderable tree and a title and
/// produces a downloadable artifact.
#[async_trait]
pub trait PrintSurface: Send + Sync {
    async fn print(&self, job: PrintJob<'_>) -> Result<ExportArtifact, AppError>;
}

/// Uploads the print document to an S3-compatible bucket and hands back a
/// presigned download URL.
#[derive(Clone)]
pub struct S3PrintSurface {
    client: aws_sdk_s3::Client,
    bucket: String,
    url_ttl: Duration,
}

impl S3PrintSurface {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, url_ttl: Duration) -> Self {
        Self {
            client,
            bucket,
            url_ttl,
        }
    }
}

#[async_trait]
impl PrintSurface for S3PrintSurface {
    async fn print(&self, job: PrintJob<'_>) -> Result<ExportArtifact, AppError> {
        let id = Uuid::new_v4();
        let filename = artifact_filename(job.title);
        let key = format!("exports/{}/{}/{}/{}", job.owner, job.resume_id, id, filename);
        let html = to_html(job.tree, job.title, Scale::Full);
        let size_bytes = html.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(Bytes::from(html)))
            .content_type("text/html; charset=utf-8")
            .content_disposition(format!("attachment; filename=\"{filename}\""))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded print artifact to s3://{}/{}", self.bucket, key);

        let presign = PresigningConfig::expires_in(self.url_ttl)
            .map_err(|e| AppError::Storage(format!("Invalid presign TTL: {e}")))?;
        let url = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(presign)
            .await
            .map_err(|e| AppError::Storage(format!("S3 presign failed: {e}")))?
            .uri()
            .to_string();

        Ok(ExportArtifact {
            id,
            filename,
            key,
            url,
            size_bytes,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
pub use recording::RecordingPrintSurface;
