//! Voicemail and call recording downloads.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use gv_core::error::{GvError, GvResult};
use gv_models::MessageId;

use crate::client::VoiceClient;

/// File name a recording is saved under.
pub fn recording_file_name(id: &MessageId) -> String {
    format!("{id}.mp3")
}

impl VoiceClient {
    /// Fetch a recording's MP3 bytes.
    pub async fn fetch_recording(&self, id: &MessageId) -> GvResult<Vec<u8>> {
        self.fetch_recording_with_progress(id, |_, _| {}).await
    }

    /// Fetch a recording, reporting `(bytes_downloaded, total_bytes)`.
    pub async fn fetch_recording_with_progress<F>(&self, id: &MessageId, progress: F) -> GvResult<Vec<u8>>
    where
        F: Fn(u64, u64),
    {
        let response = match self.get_raw(&self.endpoints().download(), id.as_str()).await {
            Ok(r) => r,
            Err(GvError::NotLoggedIn) => return Err(GvError::NotLoggedIn),
            Err(e) => return Err(GvError::Download(format!("{id}: {e}"))),
        };
        Self::response_bytes_with_progress(response, progress)
            .await
            .map_err(|e| GvError::Download(format!("{id}: {e}")))
    }

    /// Save a recording as `<dir>/<id>.mp3` and return the path.
    pub async fn download(&self, id: &MessageId, dir: &Path) -> GvResult<PathBuf> {
        self.download_with_progress(id, dir, |_, _| {}).await
    }

    /// Like [`download`](Self::download), reporting progress.
    pub async fn download_with_progress<F>(&self, id: &MessageId, dir: &Path, progress: F) -> GvResult<PathBuf>
    where
        F: Fn(u64, u64),
    {
        let bytes = self.fetch_recording_with_progress(id, progress).await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(recording_file_name(id));
        tokio::fs::write(&path, &bytes).await?;
        debug!("wrote {} bytes", bytes.len());
        info!("saved recording {id} to {}", path.display());
        Ok(path)
    }
}
