//! Process-wide responder
//!
//! A `Responder` owns the settings every response needs (view directory,
//! download options, the view renderer). Handlers either receive one by
//! reference or reach the process-wide instance installed by [`configure`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use super::ResponseBuilder;
use crate::config::{Config, DownloadConfig, ViewConfig};
use crate::logger;
use crate::view::{PlaceholderRenderer, ViewRenderer};

static RESPONDER: OnceLock<Responder> = OnceLock::new();

pub struct Responder {
    views: ViewConfig,
    view_base_path: Option<PathBuf>,
    download: DownloadConfig,
    renderer: Arc<dyn ViewRenderer>,
}

impl Responder {
    /// Build a responder rendering views with the built-in placeholder engine
    pub fn new(views: ViewConfig, download: DownloadConfig) -> Self {
        let renderer = Arc::new(PlaceholderRenderer::new(&views));
        Self {
            view_base_path: views.base_path.as_ref().map(PathBuf::from),
            views,
            download,
            renderer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.views.clone(), config.download.clone())
    }

    /// Replace the view renderer
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ViewRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Start a new response
    pub fn response(&self) -> ResponseBuilder<'_> {
        ResponseBuilder::new(self)
    }

    pub fn view_base_path(&self) -> Option<&Path> {
        self.view_base_path.as_deref()
    }

    pub fn script_extension(&self) -> &str {
        &self.views.script_extension
    }

    pub const fn download_config(&self) -> &DownloadConfig {
        &self.download
    }

    pub fn renderer(&self) -> &dyn ViewRenderer {
        self.renderer.as_ref()
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("views", &self.views)
            .field("download", &self.download)
            .finish_non_exhaustive()
    }
}

/// Install the process-wide responder for a view directory
///
/// Only the first call creates it; later calls return the existing
/// instance and their path is ignored.
pub fn configure(view_base_path: impl Into<String>) -> &'static Responder {
    let requested = view_base_path.into();
    let responder = configure_with(Responder::new(
        ViewConfig::with_base_path(requested.clone()),
        DownloadConfig::default(),
    ));

    if responder.view_base_path() != Some(Path::new(&requested)) {
        logger::log_warning(&format!(
            "Responder already configured, ignoring view path '{requested}'"
        ));
    }
    responder
}

/// Install a fully built responder as the process-wide instance
///
/// Returns the already installed instance if there is one.
pub fn configure_with(responder: Responder) -> &'static Responder {
    let mut created = false;
    let installed = RESPONDER.get_or_init(|| {
        created = true;
        responder
    });
    if created {
        logger::log_debug(&format!(
            "Responder configured with view path {:?}",
            installed.view_base_path()
        ));
    }
    installed
}

/// The process-wide responder, or `None` before [`configure`]
pub fn instance() -> Option<&'static Responder> {
    RESPONDER.get()
}
