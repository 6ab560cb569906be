//! End-to-end flows through the update function.

use std::path::PathBuf;
use std::time::Instant;

use converter_core::{
    update_at, AppState, Effect, FileCandidate, Msg, NotificationKind, RequestPhase,
    TransportFailure,
};

fn init_logging() {
    converter_logging::initialize_for_tests();
}

fn sales_csv() -> FileCandidate {
    FileCandidate {
        name: "sales.csv".to_string(),
        mime: "text/csv".to_string(),
        byte_size: 1024,
        source: PathBuf::from("/data/sales.csv"),
    }
}

#[test]
fn successful_conversion_enables_download() {
    init_logging();
    let now = Instant::now();
    let (state, _) = update_at(AppState::new(), Msg::FileDropped(sales_csv()), now);
    assert_eq!(state.view_at(now).output_name, "sales_converted.xlsx");

    let (state, effects) = update_at(state, Msg::ConvertClicked, now);
    let attempt = match &effects[..] {
        [Effect::SubmitConversion { attempt, file, .. }] => {
            assert_eq!(file.source, PathBuf::from("/data/sales.csv"));
            assert_eq!(file.byte_size, 1024);
            *attempt
        }
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update_at(
        state,
        Msg::ConversionCompleted {
            attempt,
            result: Ok("\"sales_converted.xlsx\"".to_string()),
        },
        now,
    );

    let view = state.view_at(now);
    assert_eq!(view.phase, RequestPhase::Succeeded);
    assert_eq!(
        view.converted_file_name.as_deref(),
        Some("sales_converted.xlsx")
    );
    assert!(view.can_download);
    assert_eq!(view.error, None);
    let success: Vec<_> = view
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::Success)
        .map(|n| n.text.as_str())
        .collect();
    assert_eq!(success, vec!["Conversion completed successfully!"]);
}

#[test]
fn non_csv_drop_is_rejected() {
    init_logging();
    let now = Instant::now();
    let (state, effects) = update_at(
        AppState::new(),
        Msg::FileDropped(FileCandidate {
            name: "report.txt".to_string(),
            mime: "text/plain".to_string(),
            byte_size: 20,
            source: PathBuf::from("report.txt"),
        }),
        now,
    );

    assert!(effects.is_empty());
    let view = state.view_at(now);
    assert!(view.selected_file.is_none());
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].kind, NotificationKind::Error);
    assert_eq!(view.notifications[0].text, "Please upload a CSV file.");
}

#[test]
fn server_error_fails_conversion() {
    init_logging();
    let now = Instant::now();
    let (state, _) = update_at(AppState::new(), Msg::FileDropped(sales_csv()), now);
    let (state, effects) = update_at(state, Msg::ConvertClicked, now);
    let attempt = match &effects[..] {
        [Effect::SubmitConversion { attempt, .. }] => *attempt,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update_at(
        state,
        Msg::ConversionCompleted {
            attempt,
            result: Err(TransportFailure::Status {
                code: 500,
                body: "disk full".to_string(),
            }),
        },
        now,
    );

    let view = state.view_at(now);
    assert_eq!(view.phase, RequestPhase::Failed);
    assert!(!view.can_download);
    let error = view
        .notifications
        .iter()
        .find(|n| n.kind == NotificationKind::Error)
        .expect("error notification");
    assert!(error.text.contains("500"));
    assert!(error.text.contains("disk full"));
    assert_eq!(view.error.as_deref(), Some(error.text.as_str()));

    let (_state, effects) = update_at(state, Msg::DownloadClicked, now);
    assert!(effects.is_empty());
}
