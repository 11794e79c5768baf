//! Diagram asset retrieval.
//!
//! Fetches run on background threads and report back over a channel so the
//! UI thread never blocks; responses are applied by the viewer only when
//! their ticket is still the active one.

use crate::error::FetchError;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Where diagram markup comes from.
pub trait DiagramSource: Send + Sync {
    /// Returns the raw markup stored at `asset_path` (e.g. `maps/floor-1.svg`).
    fn fetch(&self, asset_path: &str) -> Result<String, FetchError>;

    /// Human-readable location of `asset_path`, for logs.
    fn describe(&self, asset_path: &str) -> String {
        asset_path.to_string()
    }
}

/// Reads assets relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl DiagramSource for FileSource {
    fn fetch(&self, asset_path: &str) -> Result<String, FetchError> {
        let path = self.root.join(asset_path);
        std::fs::read_to_string(&path).map_err(|source| FetchError::Read { path, source })
    }

    fn describe(&self, asset_path: &str) -> String {
        self.root.join(asset_path).display().to_string()
    }
}

/// Retrieves assets with HTTP GET relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpSource {
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    #[must_use]
    pub fn url_for(&self, asset_path: &str) -> String {
        format!("{}/{}", self.base_url, asset_path.trim_start_matches('/'))
    }
}

impl DiagramSource for HttpSource {
    fn fetch(&self, asset_path: &str) -> Result<String, FetchError> {
        let url = self.url_for(asset_path);

        let mut request = ureq::get(&url).set("User-Agent", "floor-navigator/1.0");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        match request.call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| FetchError::Transport {
                    url,
                    message: e.to_string(),
                }),
            Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { url, status }),
            Err(ureq::Error::Transport(transport)) => Err(FetchError::Transport {
                url,
                message: transport.to_string(),
            }),
        }
    }

    fn describe(&self, asset_path: &str) -> String {
        self.url_for(asset_path)
    }
}

/// A diagram load the viewer is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: u64,
    pub floor: u32,
    pub asset_path: String,
}

impl LoadRequest {
    /// Performs the fetch on the current thread.
    #[must_use]
    pub fn resolve(self, source: &dyn DiagramSource) -> LoadResponse {
        let result = source.fetch(&self.asset_path);
        LoadResponse {
            ticket: self.ticket,
            floor: self.floor,
            result,
        }
    }
}

/// Outcome of a [`LoadRequest`], tagged with the request's ticket.
#[derive(Debug)]
pub struct LoadResponse {
    pub ticket: u64,
    pub floor: u32,
    pub result: Result<String, FetchError>,
}

/// Runs fetches on background threads and collects their responses.
pub struct FetchWorker {
    source: Arc<dyn DiagramSource>,
    tx: Sender<LoadResponse>,
    rx: Receiver<LoadResponse>,
}

impl FetchWorker {
    pub fn new(source: Arc<dyn DiagramSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    pub fn spawn(&self, request: LoadRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tracing::debug!(
            floor = request.floor,
            ticket = request.ticket,
            location = %source.describe(&request.asset_path),
            "fetching diagram"
        );

        std::thread::spawn(move || {
            let response = request.resolve(source.as_ref());
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(response);
        });
    }

    /// Next finished response, if any. Never blocks.
    #[must_use]
    pub fn try_recv(&self) -> Option<LoadResponse> {
        self.rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next finished response.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadResponse> {
        self.rx.recv_timeout(timeout).ok()
    }
}
