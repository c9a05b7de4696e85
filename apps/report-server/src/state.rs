//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use report_core::ReportComposer;
use typst_engine::TypstBackend;

use crate::detector::Detector;
use crate::store::ReportStore;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn Detector>,
    pub store: Arc<dyn ReportStore>,
    pub composer: Arc<ReportComposer<TypstBackend>>,
    /// Where rendered reports are written before being stored
    pub spool_dir: PathBuf,
    pub render_timeout: Duration,
}

impl AppState {
    pub fn new(
        detector: Arc<dyn Detector>,
        store: Arc<dyn ReportStore>,
        spool_dir: PathBuf,
        render_timeout: Duration,
    ) -> Self {
        Self {
            detector,
            store,
            composer: Arc::new(ReportComposer::new(TypstBackend::new())),
            spool_dir,
            render_timeout,
        }
    }
}
