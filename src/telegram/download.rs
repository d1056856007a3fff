//! Photo download from Telegram into a per-request temp directory

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use futures_util::StreamExt;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, MessageId};
use tokio::io::AsyncWriteExt;

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::utils::progress_text;
use crate::telegram::Bot;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Directory owned by a single request.
///
/// Prefer [`cleanup`](Self::cleanup); dropping the guard on an error path hands the removal to
/// the blocking pool so a tokio worker never waits on the filesystem.
#[derive(Debug)]
pub struct TempDownload {
    dir: PathBuf,
}

impl TempDownload {
    /// Creates `<root>/<user_id><unix_millis>_<seq>`.
    pub async fn create(root: &Path, user_id: u64) -> AppResult<Self> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let dir = root.join(format!("{}{}_{}", user_id, millis, seq));

        fs_err::tokio::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Removes the directory now and disarms the guard.
    pub async fn cleanup(mut self) {
        let dir = std::mem::take(&mut self.dir);
        log_removal(&dir, fs_err::tokio::remove_dir_all(&dir).await);
    }
}

impl Drop for TempDownload {
    fn drop(&mut self) {
        // Empty after cleanup()
        if self.dir.as_os_str().is_empty() {
            return;
        }

        let dir = std::mem::take(&mut self.dir);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || log_removal(&dir, fs_err::remove_dir_all(&dir)));
            }
            Err(_) => log_removal(&dir, fs_err::remove_dir_all(&dir)),
        }
    }
}

fn log_removal(dir: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => log::debug!("🧹 Removed temp dir {}", dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("⚠️ Failed to remove temp dir: {}", e),
    }
}

/// Throttled progress edits of the "Processing" reply.
pub struct ProgressMessage {
    chat_id: ChatId,
    message_id: MessageId,
    interval: Duration,
    last_edit: Option<Instant>,
}

impl ProgressMessage {
    pub fn new(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id,
            interval: config::progress::edit_interval(),
            last_edit: None,
        }
    }

    /// Edits are rate limited, except the final one.
    pub fn should_edit(&self, done: u64, total: u64, now: Instant) -> bool {
        if total > 0 && done >= total {
            return true;
        }
        match self.last_edit {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    pub async fn report(&mut self, bot: &Bot, done: u64, total: u64) {
        let now = Instant::now();
        if !self.should_edit(done, total, now) {
            return;
        }
        self.last_edit = Some(now);

        // "message is not modified" and similar are harmless here
        if let Err(e) = bot
            .edit_message_text(self.chat_id, self.message_id, progress_text(done, total))
            .await
        {
            log::debug!("Progress edit skipped: {}", e);
        }
    }
}

/// Streams a Telegram file into `dir` and returns the local path.
pub async fn download_photo(bot: &Bot, file_id: &FileId, dir: &Path, progress: &mut ProgressMessage) -> AppResult<PathBuf> {
    let file = bot.get_file(file_id.clone()).await?;
    let total = u64::from(file.size);

    let file_name = Path::new(&file.path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "photo.jpg".to_string());
    let dest = dir.join(file_name);

    log::info!("📥 Downloading {} ({} bytes) to {}", file.path, total, dest.display());

    let mut out = fs_err::tokio::File::create(&dest).await?;
    let mut stream = bot.download_file_stream(&file.path);
    let mut done = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        out.write_all(&chunk).await?;
        done += chunk.len() as u64;
        progress.report(bot, done, total).await;
    }
    out.flush().await?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> ProgressMessage {
        ProgressMessage::new(ChatId(1), MessageId(1))
    }

    #[test]
    fn test_first_report_always_edits() {
        assert!(progress().should_edit(1, 100, Instant::now()));
    }

    #[test]
    fn test_reports_are_throttled_until_complete() {
        let mut p = progress();
        let start = Instant::now();
        p.last_edit = Some(start);

        assert!(!p.should_edit(50, 100, start + Duration::from_secs(1)));
        assert!(p.should_edit(60, 100, start + Duration::from_secs(3)));
        // Completion bypasses the throttle
        assert!(p.should_edit(100, 100, start + Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_temp_download_cleanup_removes_dir() {
        let root = tempfile::tempdir().unwrap();
        let temp = TempDownload::create(root.path(), 42).await.unwrap();
        std::fs::write(temp.dir().join("photo.jpg"), b"data").unwrap();
        assert!(temp.dir().starts_with(root.path()));
        assert!(temp
            .dir()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("42")));

        let dir = temp.dir().to_path_buf();
        temp.cleanup().await;
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_temp_download_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let dir = {
            let temp = TempDownload::create(root.path(), 42).await.unwrap();
            std::fs::write(temp.dir().join("photo.jpg"), b"data").unwrap();
            temp.dir().to_path_buf()
        };

        // Removal runs on the blocking pool
        for _ in 0..200 {
            if !dir.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!dir.exists());
    }

    #[test]
    fn test_drop_outside_runtime_removes_inline() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("7_0");
        std::fs::create_dir_all(&dir).unwrap();

        drop(TempDownload { dir: dir.clone() });
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_temp_downloads_do_not_collide() {
        let root = tempfile::tempdir().unwrap();
        let a = TempDownload::create(root.path(), 7).await.unwrap();
        let b = TempDownload::create(root.path(), 7).await.unwrap();
        assert_ne!(a.dir(), b.dir());
    }
}
