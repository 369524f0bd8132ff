//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::{ApplicationResult, ReplayService, Session};
use crate::config::Settings;
use crate::infrastructure::svg::SvgCanvas;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Event replay
    pub replay: ReplayService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let replay = ReplayService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            replay,
        }
    }

    /// A fresh session over the configured root disc.
    pub fn session(&self) -> ApplicationResult<Session> {
        Session::from_settings(&self.settings)
    }

    /// An empty SVG canvas sized and coloured from settings.
    pub fn svg_canvas(&self) -> SvgCanvas {
        let size = self.settings.canvas.size;
        SvgCanvas::new(size, size).with_colors(
            self.settings.style.stroke.clone(),
            self.settings.style.background.clone(),
        )
    }
}
