use std::path::PathBuf;

use crate::{AttemptId, DownloadId, FileCandidate, TransportFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up.
    Started,
    /// User dropped a file on the drop zone.
    FileDropped(FileCandidate),
    /// User chose a file with the picker.
    FilePicked(FileCandidate),
    /// User edited the output file name.
    OutputNameChanged(String),
    /// User removed the selected file.
    ClearClicked,
    /// User clicked Convert.
    ConvertClicked,
    /// Engine finished a conversion upload. `Ok` carries the raw response body.
    ConversionCompleted {
        attempt: AttemptId,
        result: Result<String, TransportFailure>,
    },
    /// User clicked Download.
    DownloadClicked,
    /// Engine finished fetching and saving a converted file.
    DownloadCompleted {
        download: DownloadId,
        result: Result<PathBuf, String>,
    },
    /// Engine answered the startup catalog request.
    CatalogLoaded(Result<Vec<String>, String>),
    /// Periodic timer, used to expire notifications.
    Tick,
}
