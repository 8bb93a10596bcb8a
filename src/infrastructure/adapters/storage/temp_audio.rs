//! Temp Audio - 请求级临时音频文件
//!
//! 合成结果先落盘成临时文件，再以流的形式返回给客户端。
//! 文件由 `TempPath` 持有：流被丢弃时（发送完成、客户端断开或出错）立即删除。

use futures_util::Stream;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::{NamedTempFile, TempPath};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::domain::AudioArtifact;

const FILE_PREFIX: &str = "podcast_";

/// 已写入磁盘的临时音频
#[derive(Debug)]
pub struct TempAudioFile {
    path: TempPath,
    size: u64,
}

impl TempAudioFile {
    /// 在 `dir` 下创建临时文件并写入音频
    pub async fn create(dir: &Path, artifact: &AudioArtifact) -> io::Result<Self> {
        let dir = dir.to_path_buf();
        let suffix = format!(".{}", artifact.format().extension());

        let path = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(FILE_PREFIX)
                .suffix(&suffix)
                .tempfile_in(&dir)
                .map(NamedTempFile::into_temp_path)
        })
        .await
        .map_err(io::Error::other)??;

        // 写入失败时 path 被 drop，文件随之删除
        tokio::fs::write(&path, artifact.data()).await?;

        tracing::debug!(
            path = %path.display(),
            size = artifact.len(),
            "Temporary audio file written"
        );

        Ok(Self {
            path,
            size: artifact.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 打开文件，返回持有删除责任的字节流
    pub async fn into_stream(self) -> io::Result<TempAudioStream> {
        let file = File::open(&self.path).await?;
        Ok(TempAudioStream {
            inner: ReaderStream::new(file),
            path: self.path,
        })
    }
}

/// 临时音频文件的字节流
///
/// 字段按声明顺序释放：先关闭文件，再删除路径
pub struct TempAudioStream {
    inner: ReaderStream<File>,
    path: TempPath,
}

impl Stream for TempAudioStream {
    type Item = <ReaderStream<File> as Stream>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        Pin::new(&mut this.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl Drop for TempAudioStream {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "Releasing temporary audio file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tempfile::tempdir;

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_create_writes_audio() {
        let temp_dir = tempdir().unwrap();
        let artifact = AudioArtifact::wav(b"RIFF....WAVE".to_vec());

        let file = TempAudioFile::create(temp_dir.path(), &artifact).await.unwrap();

        assert_eq!(file.len(), 12);
        assert!(file.path().exists());
        let name = file.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("podcast_"));
        assert!(name.ends_with(".wav"));
        assert_eq!(std::fs::read(file.path()).unwrap(), b"RIFF....WAVE");
    }

    #[tokio::test]
    async fn test_stream_deletes_file_when_dropped() {
        let temp_dir = tempdir().unwrap();
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        let artifact = AudioArtifact::wav(data.clone());

        let file = TempAudioFile::create(temp_dir.path(), &artifact).await.unwrap();
        let path = file.path().to_path_buf();
        let mut stream = file.into_stream().await.unwrap();

        let mut received = Vec::new();
        while let Some(chunk) = stream.next().await {
            received.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(received, data);
        assert!(path.exists());

        drop(stream);
        assert!(!path.exists());
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_partial_stream_still_deletes_file() {
        let temp_dir = tempdir().unwrap();
        let artifact = AudioArtifact::wav(vec![7u8; 64 * 1024]);

        let file = TempAudioFile::create(temp_dir.path(), &artifact).await.unwrap();
        let mut stream = file.into_stream().await.unwrap();
        let _first = stream.next().await;

        drop(stream);
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_unsent_file_is_deleted() {
        let temp_dir = tempdir().unwrap();
        let artifact = AudioArtifact::wav(b"data".to_vec());

        let file = TempAudioFile::create(temp_dir.path(), &artifact).await.unwrap();
        assert_eq!(file_count(temp_dir.path()), 1);

        drop(file);
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let artifact = AudioArtifact::wav(b"data".to_vec());

        assert!(TempAudioFile::create(&missing, &artifact).await.is_err());
    }
}
