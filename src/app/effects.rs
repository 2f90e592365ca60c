use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::{App, Message, Model};
use crate::gallery::ImageSink;

/// Saves viewer images into a download directory by copying local files.
pub(super) struct FsImageSink {
    download_dir: PathBuf,
    base_dir: PathBuf,
}

impl FsImageSink {
    pub(super) fn new(download_dir: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            download_dir,
            base_dir,
        }
    }

    fn resolve(&self, src: &str) -> Result<PathBuf> {
        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
            anyhow::bail!("only local images can be saved: {src}");
        }
        let src = src.strip_prefix("file://").unwrap_or(src);
        let path = Path::new(src);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.base_dir.join(path))
        }
    }

    /// Target filename: suggested name plus the source's extension.
    fn target_name(source: &Path, suggested_name: &str) -> String {
        match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{suggested_name}.{ext}"),
            None => suggested_name.to_string(),
        }
    }
}

impl ImageSink for FsImageSink {
    fn save(&self, src: &str, suggested_name: &str) -> Result<()> {
        let source = self.resolve(src)?;
        fs::create_dir_all(&self.download_dir).with_context(|| {
            format!("Failed to create {}", self.download_dir.display())
        })?;
        let target = self
            .download_dir
            .join(Self::target_name(&source, suggested_name));
        fs::copy(&source, &target)
            .with_context(|| format!("Failed to save {}", target.display()))?;
        tracing::info!(target = %target.display(), "saved image");
        Ok(())
    }
}

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::ViewerDownload) {
            let download_dir = model
                .download_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            let sink = FsImageSink::new(download_dir, model.loader.base_path().to_path_buf());
            model.viewer.download(&sink);
        }
    }
}
