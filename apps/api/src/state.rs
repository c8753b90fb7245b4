use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::editor::session::EditorRegistry;
use crate::export::PrintSurface;
use crate::llm_client::TextGenerator;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    /// `None` when no provider key is configured; draft requests then fail.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub print: Arc<dyn PrintSurface>,
    /// Open editor sessions, each holding one unsaved working copy.
    pub editors: EditorRegistry,
    pub jwt: JwtKeys,
}

#[cfg(test)]
impl AppState {
    /// State backed by in-memory fakes; nothing touches the network.
    pub fn fake(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        use crate::config::Config;
        use crate::export::surface::RecordingPrintSurface;
        use crate::resumes::store::MemoryResumeStore;

        Self {
            store: Arc::new(MemoryResumeStore::default()),
            generator,
            print: Arc::new(RecordingPrintSurface::default()),
            editors: EditorRegistry::default(),
            jwt: JwtKeys::from_config(&Config::for_tests()),
        }
    }
}
