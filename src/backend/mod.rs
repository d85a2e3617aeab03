use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::capture::{ExportDependencies, ScreenSource};
use crate::config::Config;
use crate::input::ExportRequest;
use crate::util::Rect;

pub mod headless;
pub mod script;

pub use headless::{HeadlessSession, SessionOutcome};
pub use script::{Script, ScriptEvent};

/// What a headless run should do after the screenshot is captured.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub region: Option<Rect>,
    pub script: Option<Script>,
    /// Save after the script; `Some(None)` generates a file name
    pub save: Option<Option<PathBuf>>,
    pub copy: bool,
    /// Writes the final on-screen rendering to this PNG
    pub preview: Option<PathBuf>,
}

/// Run one capture session headlessly.
///
/// # Arguments
/// * `source` - Screen capture provider, called once
/// * `config` - Validated configuration
/// * `options` - Region, script and final exports
pub fn run_headless(
    source: &dyn ScreenSource,
    config: &Config,
    options: RunOptions,
) -> Result<SessionOutcome> {
    let screenshot = source.capture().context("Failed to capture the screen")?;
    let save_path = options.save.clone().flatten();
    let mut session = HeadlessSession::new(screenshot, config, ExportDependencies::default())?
        .with_save_path(save_path);

    if let Some(region) = options.region {
        session.select_region(region);
    }
    if let Some(script) = &options.script {
        session.run_script(script);
    }

    if let Some(path) = &options.preview {
        crate::ui::write_preview(session.input_state(), path)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
    }

    if !session.input_state().is_closed() {
        if options.save.is_some() {
            session.request_export(ExportRequest::SaveToFile);
        }
        if options.copy && !session.input_state().is_closed() {
            session.request_export(ExportRequest::CopyToClipboard);
        }
    }

    session.finish()
}
