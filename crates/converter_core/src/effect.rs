use url::Url;

use crate::{AttemptId, DownloadId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the list of files already produced by the server.
    LoadCatalog { url: Url },
    /// Upload the selected file for conversion.
    SubmitConversion {
        attempt: AttemptId,
        url: Url,
        file: SelectedFile,
    },
    /// Fetch a converted spreadsheet and save it locally as `save_as`.
    DownloadResult {
        download: DownloadId,
        url: Url,
        save_as: String,
    },
}
