use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use converter_logging::{conv_info, conv_warn};

use crate::client::{ClientSettings, ConversionClient, ReqwestClient, Upload};
use crate::filename::safe_file_name;
use crate::persist::AtomicFileWriter;
use crate::{ClientError, EngineEvent, FailureKind, RequestId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub settings: ClientSettings,
    pub download_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_download_dir(download_dir: PathBuf) -> Self {
        Self {
            settings: ClientSettings::default(),
            download_dir,
        }
    }
}

enum EngineCommand {
    Convert {
        request_id: RequestId,
        url: String,
        upload: Upload,
    },
    Download {
        request_id: RequestId,
        url: String,
        save_as: String,
    },
    LoadCatalog {
        url: String,
    },
}

/// Runs network requests on a background tokio runtime and reports their
/// completion as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        let client = Arc::new(ReqwestClient::new(config.settings));
        Self::with_client(client, config.download_dir)
    }

    pub fn with_client(
        client: Arc<dyn ConversionClient>,
        download_dir: PathBuf,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("converter-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    let download_dir = download_dir.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), &download_dir, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn convert(&self, request_id: RequestId, url: impl Into<String>, upload: Upload) {
        let _ = self.cmd_tx.send(EngineCommand::Convert {
            request_id,
            url: url.into(),
            upload,
        });
    }

    pub fn download(
        &self,
        request_id: RequestId,
        url: impl Into<String>,
        save_as: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            request_id,
            url: url.into(),
            save_as: save_as.into(),
        });
    }

    pub fn load_catalog(&self, url: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::LoadCatalog { url: url.into() });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ConversionClient,
    download_dir: &std::path::Path,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Convert {
            request_id,
            url,
            upload,
        } => {
            let result = client.convert(&url, &upload).await;
            if let Err(err) = &result {
                conv_warn!("Conversion request {} failed: {}", request_id, err);
            }
            EngineEvent::ConversionCompleted { request_id, result }
        }
        EngineCommand::Download {
            request_id,
            url,
            save_as,
        } => {
            let result = download_to_dir(client, &url, download_dir, &save_as).await;
            EngineEvent::DownloadCompleted { request_id, result }
        }
        EngineCommand::LoadCatalog { url } => {
            let result = client.list_files(&url).await;
            EngineEvent::CatalogLoaded { result }
        }
    };
    let _ = event_tx.send(event);
}

async fn download_to_dir(
    client: &dyn ConversionClient,
    url: &str,
    download_dir: &std::path::Path,
    save_as: &str,
) -> Result<PathBuf, ClientError> {
    let bytes = client.download(url).await?;
    let dir = download_dir.to_path_buf();
    let file_name = safe_file_name(save_as);
    let path = tokio::task::spawn_blocking(move || {
        AtomicFileWriter::new(dir).write(&file_name, &bytes)
    })
    .await
    .map_err(|err| ClientError::new(FailureKind::Persist, err.to_string()))?
    .map_err(|err| ClientError::new(FailureKind::Persist, err.to_string()))?;
    conv_info!("Downloaded {} to {:?}", url, path);
    Ok(path)
}
