use crate::{NotificationId, NotificationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub selected_file: Option<SelectedFileView>,
    pub output_name: String,
    pub phase: RequestPhase,
    pub converted_file_name: Option<String>,
    pub error: Option<String>,
    pub can_convert: bool,
    pub can_download: bool,
    pub downloading: bool,
    pub notifications: Vec<NotificationView>,
    pub catalog: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub byte_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
}
