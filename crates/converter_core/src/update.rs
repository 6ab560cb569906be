use std::time::Instant;

use converter_logging::{conv_debug, conv_info, conv_warn};

use crate::intake::validate_candidate;
use crate::notification::NotificationKind;
use crate::response::unquote_converted_name;
use crate::{
    AppState, AttemptId, ConversionResult, Effect, FileCandidate, IntakeSource, Msg,
    RequestState, TransportFailure,
};

const CONVERSION_SUCCEEDED: &str = "Conversion completed successfully!";
const MISSING_FILE: &str = "Please select a CSV file first.";
const MISSING_OUTPUT_NAME: &str = "Please enter an output filename.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    update_at(state, msg, Instant::now())
}

/// Same as [`update`] with an explicit clock reading, used for notification
/// timestamps and expiry.
pub fn update_at(mut state: AppState, msg: Msg, now: Instant) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if !state.take_catalog_request() {
                return (state, Vec::new());
            }
            match state.endpoints().files_url() {
                Ok(url) => vec![Effect::LoadCatalog { url }],
                Err(err) => {
                    conv_warn!("Catalog url unavailable: {}", err);
                    Vec::new()
                }
            }
        }
        Msg::FileDropped(candidate) => {
            accept_candidate(&mut state, candidate, IntakeSource::Dropped, now);
            Vec::new()
        }
        Msg::FilePicked(candidate) => {
            accept_candidate(&mut state, candidate, IntakeSource::Picked, now);
            Vec::new()
        }
        Msg::OutputNameChanged(name) => {
            if !state.set_output_name(name) {
                conv_debug!("Ignoring output name edit without a selected file");
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_selection();
            Vec::new()
        }
        Msg::ConvertClicked => submit(&mut state, now),
        Msg::ConversionCompleted { attempt, result } => {
            complete_conversion(&mut state, attempt, result, now);
            Vec::new()
        }
        Msg::DownloadClicked => download(&mut state),
        Msg::DownloadCompleted { download, result } => {
            if !state.finish_download(download) {
                conv_warn!("Discarding completion of superseded download {}", download);
                return (state, Vec::new());
            }
            match result {
                Ok(path) => {
                    conv_info!("Saved converted file to {:?}", path);
                    state.notify(
                        NotificationKind::Success,
                        format!("Saved to {}", path.display()),
                        now,
                    );
                }
                Err(message) => {
                    state.report_error(format!("Download failed: {message}"), now);
                }
            }
            Vec::new()
        }
        Msg::CatalogLoaded(result) => {
            match result {
                Ok(files) => {
                    conv_info!("Catalog loaded with {} entries", files.len());
                    state.replace_catalog(files);
                }
                Err(message) => {
                    // Informational only; never surfaced to the user.
                    conv_warn!("Failed to load file catalog: {}", message);
                }
            }
            Vec::new()
        }
        Msg::Tick => {
            if state.prune_notifications(now) > 0 {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn accept_candidate(
    state: &mut AppState,
    candidate: FileCandidate,
    source: IntakeSource,
    now: Instant,
) {
    match validate_candidate(candidate) {
        Ok(file) => {
            conv_info!("Selected {} ({} bytes)", file.name, file.byte_size);
            state.select_file(file);
        }
        Err(err) => {
            conv_debug!("Rejected candidate: {}", err);
            state.report_error(source.rejection_message().to_string(), now);
        }
    }
}

fn submit(state: &mut AppState, now: Instant) -> Vec<Effect> {
    if let RequestState::Submitting { attempt } = state.request() {
        conv_warn!("Conversion {} still in flight; ignoring submit", attempt);
        return Vec::new();
    }
    let Some(file) = state.selected_file().cloned() else {
        state.report_error(MISSING_FILE.to_string(), now);
        return Vec::new();
    };
    let output_name = state.output_name().trim().to_string();
    if output_name.is_empty() {
        state.report_error(MISSING_OUTPUT_NAME.to_string(), now);
        return Vec::new();
    }

    let url = match state.endpoints().convert_url(&output_name) {
        Ok(url) => url,
        Err(err) => {
            let message = format!("Conversion failed: {err}");
            state.set_request(RequestState::Failed {
                message: message.clone(),
            });
            state.report_error(message, now);
            return Vec::new();
        }
    };

    let attempt = state.begin_submission();
    conv_info!(
        "Submitting attempt {} for {} as {}",
        attempt,
        file.name,
        output_name
    );
    vec![Effect::SubmitConversion { attempt, url, file }]
}

fn complete_conversion(
    state: &mut AppState,
    attempt: AttemptId,
    result: Result<String, TransportFailure>,
    now: Instant,
) {
    if !state.is_current_attempt(attempt) {
        conv_warn!("Discarding completion of superseded attempt {}", attempt);
        return;
    }
    match result {
        Ok(body) => {
            let converted_file_name = unquote_converted_name(&body).to_string();
            let output_name = state.output_name().trim().to_string();
            let download_locator = if output_name.is_empty() {
                None
            } else {
                match state.endpoints().download_url(&output_name) {
                    Ok(url) => Some(url),
                    Err(err) => {
                        conv_warn!("No download locator for {}: {}", output_name, err);
                        None
                    }
                }
            };
            conv_info!("Attempt {} converted to {}", attempt, converted_file_name);
            state.set_request(RequestState::Succeeded(ConversionResult {
                converted_file_name,
                download_locator,
            }));
            state.clear_error();
            state.notify(NotificationKind::Success, CONVERSION_SUCCEEDED, now);
        }
        Err(failure) => {
            let message = format!("Conversion failed: {failure}");
            conv_warn!("Attempt {} failed: {}", attempt, failure);
            state.set_request(RequestState::Failed {
                message: message.clone(),
            });
            state.report_error(message, now);
        }
    }
}

fn download(state: &mut AppState) -> Vec<Effect> {
    if !state.can_download() {
        return Vec::new();
    }
    let RequestState::Succeeded(result) = state.request() else {
        return Vec::new();
    };

    let url = match &result.download_locator {
        Some(url) => url.clone(),
        None => match state.endpoints().download_url(&result.converted_file_name) {
            Ok(url) => url,
            Err(err) => {
                conv_warn!(
                    "Cannot build download url for {}: {}",
                    result.converted_file_name,
                    err
                );
                return Vec::new();
            }
        },
    };

    let output_name = state.output_name().trim();
    let save_as = if output_name.is_empty() {
        result.converted_file_name.clone()
    } else {
        output_name.to_string()
    };

    let download = state.begin_download();
    conv_info!("Starting download {} of {}", download, url);
    vec![Effect::DownloadResult {
        download,
        url,
        save_as,
    }]
}
