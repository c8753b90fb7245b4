//! Editor sessions: one working copy of one resume per session.
//!
//! Edits are applied synchronously under the registry lock. Network-bound
//! operations (save, reload, export) snapshot what they need, release the lock,
//! and mark themselves in flight so a duplicate request for the same operation
//! is refused until the first completes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::editor::address::{EditorAddress, AUTO_EXPORT_DELAY};
use crate::editor::form::{EditCommand, ResumeForm};
use crate::errors::AppError;
use crate::export::{export_document, ExportArtifact, PrintSurface};
use crate::models::resume::Resume;
use crate::render::{render, to_html, Scale};
use crate::resumes::bridge;
use crate::resumes::store::ResumeStore;

/// Open sessions one user may hold; opening past it evicts their least
/// recently used idle session.
pub const MAX_SESSIONS_PER_OWNER: usize = 16;
/// How often the sweeper looks for idle sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// Auto export tries while a manual export holds the export slot.
const AUTO_EXPORT_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Save,
    Reload,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoExport {
    None,
    Pending,
    Fired,
}

pub struct EditorSession {
    id: Uuid,
    owner: Uuid,
    resume_id: Uuid,
    title: String,
    address: EditorAddress,
    form: ResumeForm,
    in_flight: HashSet<Operation>,
    auto_export: AutoExport,
    exports: Vec<ExportArtifact>,
    last_touched: Instant,
}

impl EditorSession {
    fn begin(&mut self, op: Operation) -> Result<(), AppError> {
        if !self.in_flight.insert(op) {
            return Err(AppError::Conflict(format!(
                "{op:?} already in progress for editor session {}",
                self.id
            )));
        }
        Ok(())
    }

    fn view(&self) -> EditorView {
        let document = self.form.to_document();
        let preview_html = to_html(&render(&document), &self.title, Scale::Inline);
        EditorView {
            session_id: self.id,
            resume_id: self.resume_id,
            title: self.title.clone(),
            address: self.address.to_string(),
            skills_text: self.form.skills_text(),
            experience_keys: self.form.experience_keys(),
            education_keys: self.form.education_keys(),
            document,
            preview_html,
            in_flight: self.in_flight.iter().copied().collect(),
            auto_export: self.auto_export,
            exports: self.exports.clone(),
        }
    }
}

/// Snapshot of a session returned after every open, edit and reload.
#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub session_id: Uuid,
    pub resume_id: Uuid,
    pub title: String,
    /// Navigable address with any download marker already removed.
    pub address: String,
    pub document: ResumeDocument,
    pub skills_text: String,
    pub experience_keys: Vec<u64>,
    pub education_keys: Vec<u64>,
    pub preview_html: String,
    pub in_flight: Vec<Operation>,
    pub auto_export: AutoExport,
    pub exports: Vec<ExportArtifact>,
}

#[derive(Clone, Default)]
pub struct EditorRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, EditorSession>>>,
}

impl EditorRegistry {
    /// Opens a session on `address.resume_id`, loading the persisted document
    /// as the working copy. A `download=true` marker schedules one export.
    pub async fn open(
        &self,
        store: &dyn ResumeStore,
        print: Arc<dyn PrintSurface>,
        owner: Uuid,
        address: EditorAddress,
    ) -> Result<EditorView, AppError> {
        let resume = bridge::load(store, owner, address.resume_id).await?;
        let wants_download = address.wants_download();

        let session = EditorSession {
            id: Uuid::new_v4(),
            owner,
            resume_id: resume.id,
            title: resume.title,
            address: address.without_download_marker(),
            form: ResumeForm::from_document(resume.content),
            in_flight: HashSet::new(),
            auto_export: if wants_download {
                AutoExport::Pending
            } else {
                AutoExport::None
            },
            exports: Vec::new(),
            last_touched: Instant::now(),
        };
        let session_id = session.id;
        let view = session.view();
        {
            let mut sessions = self.sessions.lock().await;
            evict_over_cap(&mut sessions, owner);
            sessions.insert(session_id, session);
        }
        info!("Opened editor session {session_id} on resume {}", resume.id);

        if wants_download {
            let registry = self.clone();
            tokio::spawn(async move {
                registry.run_auto_export(print.as_ref(), session_id).await;
            });
        }

        Ok(view)
    }

    pub async fn view(&self, owner: Uuid, session_id: Uuid) -> Result<EditorView, AppError> {
        self.with_session(owner, session_id, |s| Ok(s.view())).await
    }

    pub async fn preview_html(&self, owner: Uuid, session_id: Uuid) -> Result<String, AppError> {
        self.with_session(owner, session_id, |s| {
            Ok(to_html(
                &render(&s.form.to_document()),
                &s.title,
                Scale::Inline,
            ))
        })
        .await
    }

    pub async fn apply(
        &self,
        owner: Uuid,
        session_id: Uuid,
        command: EditCommand,
    ) -> Result<EditorView, AppError> {
        self.with_session(owner, session_id, |s| {
            s.form.apply(command)?;
            Ok(s.view())
        })
        .await
    }

    /// Commits the working copy to the store, replacing the persisted content.
    pub async fn save(
        &self,
        store: &dyn ResumeStore,
        owner: Uuid,
        session_id: Uuid,
    ) -> Result<Resume, AppError> {
        let (resume_id, document) = self
            .with_session(owner, session_id, |s| {
                s.begin(Operation::Save)?;
                Ok((s.resume_id, s.form.to_document()))
            })
            .await?;

        let result = bridge::save(store, owner, resume_id, None, &document).await;
        self.finish(session_id, Operation::Save, |_| {}).await;
        result
    }

    /// Reloads the persisted document. Load wins over unsaved local edits.
    pub async fn reload(
        &self,
        store: &dyn ResumeStore,
        owner: Uuid,
        session_id: Uuid,
    ) -> Result<EditorView, AppError> {
        let resume_id = self
            .with_session(owner, session_id, |s| {
                s.begin(Operation::Reload)?;
                Ok(s.resume_id)
            })
            .await?;

        let result = bridge::load(store, owner, resume_id).await;
        let view = self
            .finish(session_id, Operation::Reload, |s| {
                if let Ok(resume) = &result {
                    s.title = resume.title.clone();
                    s.form.reset(resume.content.clone());
                }
                s.view()
            })
            .await;
        result?;
        view.ok_or_else(|| AppError::NotFound(format!("Editor session {session_id} not found")))
    }

    /// Prints the current working copy, saved or not.
    pub async fn export(
        &self,
        print: &dyn PrintSurface,
        owner: Uuid,
        session_id: Uuid,
    ) -> Result<ExportArtifact, AppError> {
        self.with_session(owner, session_id, |s| s.begin(Operation::Export))
            .await?;
        self.export_started(print, session_id).await
    }

    /// Drops the session. Unsaved edits are discarded; in-flight saves are not awaited.
    pub async fn close(&self, owner: Uuid, session_id: Uuid) -> Result<(), AppError> {
        self.with_session(owner, session_id, |_| Ok(())).await?;
        self.sessions.lock().await.remove(&session_id);
        info!("Closed editor session {session_id}");
        Ok(())
    }

    /// Drops every session open on `resume_id`. Used once the resume is deleted.
    pub async fn close_for_resume(&self, resume_id: Uuid) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.resume_id != resume_id);
        let closed = before - sessions.len();
        if closed > 0 {
            info!("Closed {closed} editor session(s) on deleted resume {resume_id}");
        }
        closed
    }

    /// Drops sessions untouched for longer than `max_idle`. Sessions with an
    /// operation in flight are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.in_flight.is_empty() || s.last_touched.elapsed() <= max_idle);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle editor session(s)");
        }
        evicted
    }

    /// Runs [`Self::evict_idle`] every [`SWEEP_INTERVAL`] for the life of the process.
    pub fn spawn_sweeper(&self, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                registry.evict_idle(max_idle).await;
            }
        })
    }

    /// Fires the export requested by a download marker. When a manual export
    /// holds the export slot, waits and tries again rather than dropping it.
    async fn run_auto_export(&self, print: &dyn PrintSurface, session_id: Uuid) {
        for attempt in 1..=AUTO_EXPORT_ATTEMPTS {
            tokio::time::sleep(AUTO_EXPORT_DELAY).await;

            let claim = {
                let mut sessions = self.sessions.lock().await;
                match sessions.get_mut(&session_id) {
                    Some(s) if s.auto_export == AutoExport::Pending => {
                        if s.begin(Operation::Export).is_ok() {
                            s.auto_export = AutoExport::Fired;
                            Some(true)
                        } else if attempt == AUTO_EXPORT_ATTEMPTS {
                            s.auto_export = AutoExport::Fired;
                            None
                        } else {
                            Some(false)
                        }
                    }
                    Some(_) => return,
                    None => {
                        debug!("Editor session {session_id} closed before auto export");
                        return;
                    }
                }
            };

            match claim {
                Some(true) => {
                    if let Err(e) = self.export_started(print, session_id).await {
                        warn!("Auto export for editor session {session_id} failed: {e}");
                    }
                    return;
                }
                Some(false) => debug!(
                    "Export already in flight for editor session {session_id}, retrying auto export (attempt {attempt})"
                ),
                None => warn!(
                    "Auto export for editor session {session_id} abandoned: export still in flight"
                ),
            }
        }
    }

    /// Runs an export whose in-flight marker is already set.
    async fn export_started(
        &self,
        print: &dyn PrintSurface,
        session_id: Uuid,
    ) -> Result<ExportArtifact, AppError> {
        let snapshot = {
            let sessions = self.sessions.lock().await;
            sessions
                .get(&session_id)
                .map(|s| (s.owner, s.resume_id, s.title.clone(), s.form.to_document()))
        };
        let Some((owner, resume_id, title, document)) = snapshot else {
            return Err(AppError::NotFound(format!(
                "Editor session {session_id} not found"
            )));
        };

        let result = export_document(print, owner, resume_id, &title, &document).await;
        self.finish(session_id, Operation::Export, |s| {
            if let Ok(artifact) = &result {
                s.exports.push(artifact.clone());
            }
        })
        .await;
        result
    }

    async fn with_session<T>(
        &self,
        owner: Uuid,
        session_id: Uuid,
        f: impl FnOnce(&mut EditorSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::NotFound(format!("Editor session {session_id} not found")))?;
        if session.owner != owner {
            return Err(AppError::Forbidden);
        }
        session.last_touched = Instant::now();
        f(session)
    }

    /// Clears the in-flight marker. A session closed meanwhile is skipped.
    async fn finish<T>(
        &self,
        session_id: Uuid,
        op: Operation,
        f: impl FnOnce(&mut EditorSession) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&session_id)?;
        session.in_flight.remove(&op);
        session.last_touched = Instant::now();
        Some(f(session))
    }
}

/// Makes room for one more session of `owner` by dropping their least recently
/// touched idle sessions.
fn evict_over_cap(sessions: &mut HashMap<Uuid, EditorSession>, owner: Uuid) {
    let mut idle: Vec<(Instant, Uuid)> = sessions
        .values()
        .filter(|s| s.owner == owner)
        .filter(|s| s.in_flight.is_empty())
        .map(|s| (s.last_touched, s.id))
        .collect();
    let held = sessions.values().filter(|s| s.owner == owner).count();
    if held < MAX_SESSIONS_PER_OWNER {
        return;
    }
    idle.sort();
    for (_, id) in idle.into_iter().take(held + 1 - MAX_SESSIONS_PER_OWNER) {
        sessions.remove(&id);
        debug!("Evicted editor session {id} of user {owner}: session cap reached");
    }
}
