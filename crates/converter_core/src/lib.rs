//! Converter core: pure state machine and view-model helpers.
mod effect;
mod endpoints;
mod intake;
mod msg;
mod notification;
mod response;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use endpoints::{EndpointError, Endpoints, DEFAULT_BASE_URL};
pub use intake::{
    default_output_name, validate_candidate, FileCandidate, IntakeError, IntakeSource,
    SelectedFile, CSV_MIME,
};
pub use msg::Msg;
pub use notification::{
    Notification, NotificationId, NotificationKind, NotificationQueue, NOTIFICATION_LIFETIME,
};
pub use response::{unquote_converted_name, TransportFailure};
pub use state::{AppState, AttemptId, ConversionResult, DownloadId, RequestState};
pub use update::{update, update_at};
pub use view_model::{AppViewModel, NotificationView, RequestPhase, SelectedFileView};
