use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use converter_core::{Effect, Msg, SelectedFile, TransportFailure, CSV_MIME};
use converter_engine::{ClientError, EngineConfig, EngineEvent, EngineHandle, FailureKind, Upload};
use converter_logging::conv_info;

use super::input::Command;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Executes core effects on the engine and feeds engine events back as
/// messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, tx: mpsc::Sender<Command>) -> std::io::Result<Self> {
        let engine = Arc::new(EngineHandle::new(config)?);
        let runner = Self { engine };
        runner.spawn_event_loop(tx)?;
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadCatalog { url } => {
                    conv_info!("LoadCatalog url={}", url);
                    self.engine.load_catalog(url.as_str());
                }
                Effect::SubmitConversion { attempt, url, file } => {
                    conv_info!(
                        "SubmitConversion attempt={} url={} file={:?}",
                        attempt,
                        url,
                        file.source
                    );
                    self.engine.convert(attempt, url.as_str(), upload_for(file));
                }
                Effect::DownloadResult {
                    download,
                    url,
                    save_as,
                } => {
                    conv_info!(
                        "DownloadResult download={} url={} save_as={}",
                        download,
                        url,
                        save_as
                    );
                    self.engine.download(download, url.as_str(), save_as);
                }
            }
        }
    }

    fn spawn_event_loop(&self, tx: mpsc::Sender<Command>) -> std::io::Result<()> {
        let engine = self.engine.clone();
        thread::Builder::new()
            .name("engine-events".to_string())
            .spawn(move || loop {
                let Some(event) = engine.recv_timeout(EVENT_POLL) else {
                    continue;
                };
                if tx.send(Command::Msg(event_to_msg(event))).is_err() {
                    break;
                }
            })?;
        Ok(())
    }
}

fn upload_for(file: SelectedFile) -> Upload {
    // Files accepted by extension may carry `.csv` instead of a content type.
    let mime = if file.mime_or_extension.contains('/') {
        file.mime_or_extension
    } else {
        CSV_MIME.to_string()
    };
    Upload {
        path: file.source,
        file_name: file.name,
        mime,
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ConversionCompleted { request_id, result } => Msg::ConversionCompleted {
            attempt: request_id,
            result: result.map_err(transport_failure),
        },
        EngineEvent::DownloadCompleted { request_id, result } => Msg::DownloadCompleted {
            download: request_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::CatalogLoaded { result } => {
            Msg::CatalogLoaded(result.map_err(|err| err.to_string()))
        }
    }
}

fn transport_failure(err: ClientError) -> TransportFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => TransportFailure::Status {
            code,
            body: err.message,
        },
        _ => TransportFailure::Network(err.to_string()),
    }
}
