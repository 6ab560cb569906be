use std::time::Instant;

use url::Url;

use crate::intake::default_output_name;
use crate::notification::{NotificationKind, NotificationQueue};
use crate::view_model::{
    AppViewModel, NotificationView, RequestPhase, SelectedFileView,
};
use crate::{Endpoints, SelectedFile};

pub type AttemptId = u64;
pub type DownloadId = u64;

/// What the server produced for the last successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub converted_file_name: String,
    /// Download URL for the output name; `None` when the name was blanked
    /// while the upload was in flight.
    pub download_locator: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting {
        attempt: AttemptId,
    },
    Succeeded(ConversionResult),
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    endpoints: Endpoints,
    selected: Option<SelectedFile>,
    output_name: String,
    request: RequestState,
    last_attempt: AttemptId,
    download: Option<DownloadId>,
    last_download: DownloadId,
    error: Option<String>,
    catalog: Vec<String>,
    catalog_requested: bool,
    notifications: NotificationQueue,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> AppViewModel {
        let (phase, converted_file_name) = match &self.request {
            RequestState::Idle => (RequestPhase::Idle, None),
            RequestState::Submitting { .. } => (RequestPhase::Submitting, None),
            RequestState::Succeeded(result) => (
                RequestPhase::Succeeded,
                Some(result.converted_file_name.clone()),
            ),
            RequestState::Failed { .. } => (RequestPhase::Failed, None),
        };

        AppViewModel {
            selected_file: self.selected.as_ref().map(|file| SelectedFileView {
                name: file.name.clone(),
                byte_size: file.byte_size,
            }),
            output_name: self.output_name.clone(),
            phase,
            converted_file_name,
            error: self.error.clone(),
            can_convert: self.can_convert(),
            can_download: self.can_download(),
            downloading: self.download.is_some(),
            notifications: self
                .notifications
                .active(now)
                .map(|n| NotificationView {
                    id: n.id,
                    kind: n.kind,
                    text: n.text.clone(),
                })
                .collect(),
            catalog: self.catalog.clone(),
            dirty: self.dirty,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// True while a network operation started by the user is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self.request, RequestState::Submitting { .. }) || self.download.is_some()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_convert(&self) -> bool {
        self.selected.is_some()
            && !self.output_name.trim().is_empty()
            && !matches!(self.request, RequestState::Submitting { .. })
    }

    pub(crate) fn can_download(&self) -> bool {
        match &self.request {
            RequestState::Succeeded(result) => {
                self.download.is_none()
                    && (result.download_locator.is_some()
                        || !result.converted_file_name.is_empty())
            }
            _ => false,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, kind: NotificationKind, text: impl Into<String>, now: Instant) {
        self.notifications.push(kind, text, now);
        self.dirty = true;
    }

    /// Inline error plus a notification carrying the same text.
    pub(crate) fn report_error(&mut self, text: String, now: Instant) {
        self.notify(NotificationKind::Error, text.clone(), now);
        self.error = Some(text);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn prune_notifications(&mut self, now: Instant) -> usize {
        self.notifications.prune(now)
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.output_name = default_output_name(&file.name);
        self.selected = Some(file);
        self.request = RequestState::Idle;
        self.error = None;
        self.download = None;
        self.dirty = true;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        self.output_name.clear();
        self.request = RequestState::Idle;
        self.error = None;
        self.download = None;
        self.dirty = true;
    }

    pub(crate) fn set_output_name(&mut self, name: String) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.output_name = name;
        self.dirty = true;
        true
    }

    pub(crate) fn begin_submission(&mut self) -> AttemptId {
        self.last_attempt += 1;
        let attempt = self.last_attempt;
        self.request = RequestState::Submitting { attempt };
        self.error = None;
        self.download = None;
        self.dirty = true;
        attempt
    }

    pub(crate) fn is_current_attempt(&self, attempt: AttemptId) -> bool {
        self.request == RequestState::Submitting { attempt }
    }

    pub(crate) fn set_request(&mut self, request: RequestState) {
        self.request = request;
        self.dirty = true;
    }

    pub(crate) fn begin_download(&mut self) -> DownloadId {
        self.last_download += 1;
        let download = self.last_download;
        self.download = Some(download);
        self.dirty = true;
        download
    }

    /// Ends the tracked download; false when `download` is not the one in
    /// flight.
    pub(crate) fn finish_download(&mut self, download: DownloadId) -> bool {
        if self.download != Some(download) {
            return false;
        }
        self.download = None;
        self.dirty = true;
        true
    }

    pub(crate) fn take_catalog_request(&mut self) -> bool {
        !std::mem::replace(&mut self.catalog_requested, true)
    }

    pub(crate) fn replace_catalog(&mut self, files: Vec<String>) {
        self.catalog = files;
        self.dirty = true;
    }
}
