//! Feed retrieval.
//!
//! A build performs exactly one fetch. There is no retry and no timeout; any
//! failure is fatal to the build.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read feed file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can hand back the raw feed payload
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve the raw text payload
    async fn fetch(&self) -> Result<String, RetrievalError>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Fetches the feed over HTTP(S) with a single GET
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpSource {
    async fn fetch(&self) -> Result<String, RetrievalError> {
        let transport = |source: reqwest::Error| RetrievalError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(RetrievalError::Status {
                endpoint: self.endpoint.clone(),
                status: response.status(),
            });
        }

        response.text().await.map_err(transport)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Reads a previously saved payload from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileSource {
    async fn fetch(&self) -> Result<String, RetrievalError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RetrievalError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed payload; handy for tests and embedding
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch(&self) -> Result<String, RetrievalError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "<inline payload>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.txt");
        std::fs::write(&path, "cb({\"table\":{}});").unwrap();

        let payload = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(payload, "cb({\"table\":{}});");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.txt"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Io { .. }));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // port 9 (discard) on localhost is essentially never listening
        let err = HttpSource::new("http://127.0.0.1:9/feed")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let n = socket.read(&mut buf).await.unwrap();
            assert!(buf[..n].starts_with(b"GET /feed"));
            socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await
                .unwrap();
            let _ = socket.shutdown().await;
        });

        let endpoint = format!("http://{}/feed", addr);
        let err = HttpSource::new(endpoint.clone()).fetch().await.unwrap_err();
        server.await.unwrap();

        match err {
            RetrievalError::Status {
                endpoint: reported,
                status,
            } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(reported, endpoint);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
