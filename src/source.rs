use std::io::SeekFrom;
use std::path::PathBuf;

use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::AppError;

/// Byte-range access to the monitored log file. Every request fetches fresh;
/// nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn fetch_full(&self) -> Result<Vec<u8>, AppError> {
        Ok(fs::read(&self.path).await?)
    }

    /// First `limit` bytes, fewer when the file is shorter.
    pub async fn fetch_head(&self, limit: usize) -> Result<Vec<u8>, AppError> {
        let file = fs::File::open(&self.path).await?;
        let mut chunk = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut chunk).await?;
        Ok(chunk)
    }

    /// Last `limit` bytes, fewer when the file is shorter.
    pub async fn fetch_tail(&self, limit: usize) -> Result<Vec<u8>, AppError> {
        let mut file = fs::File::open(&self.path).await?;
        let len = file.metadata().await?.len();
        let start = len.saturating_sub(limit as u64);
        file.seek(SeekFrom::Start(start)).await?;
        let mut chunk = Vec::with_capacity((len - start) as usize);
        file.read_to_end(&mut chunk).await?;
        Ok(chunk)
    }
}
