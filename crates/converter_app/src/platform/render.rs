use converter_core::{AppViewModel, NotificationKind, RequestPhase};

/// Renders the view model as plain text lines for the terminal.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("== CSV to XLSX Converter ==".to_string());

    match &view.selected_file {
        Some(file) => {
            lines.push(format!(
                "File:    {} ({})",
                file.name,
                format_size(file.byte_size)
            ));
            lines.push(format!("Output:  {}", view.output_name));
        }
        None => lines.push("File:    none (use `drop <path>` or `open <path>`)".to_string()),
    }

    let status = match view.phase {
        RequestPhase::Idle => "idle".to_string(),
        RequestPhase::Submitting => "converting...".to_string(),
        RequestPhase::Succeeded => match &view.converted_file_name {
            Some(name) => format!("converted ({name})"),
            None => "converted".to_string(),
        },
        RequestPhase::Failed => "failed".to_string(),
    };
    lines.push(format!("Status:  {status}"));

    if let Some(error) = &view.error {
        lines.push(format!("Error:   {error}"));
    }

    lines.push(format!(
        "Actions: convert [{}]  download [{}]",
        enabled_label(view.can_convert),
        if view.downloading {
            "saving"
        } else {
            enabled_label(view.can_download)
        }
    ));

    for notification in &view.notifications {
        let marker = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "!!",
        };
        lines.push(format!("  [{marker}] {}", notification.text));
    }

    if !view.catalog.is_empty() {
        lines.push("Available files:".to_string());
        lines.extend(view.catalog.iter().map(|name| format!("  - {name}")));
    }

    lines
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "ready"
    } else {
        "disabled"
    }
}

/// `1536` becomes `1.5 KB`.
fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_core::{NotificationId, NotificationView, SelectedFileView};

    #[test]
    fn empty_view_prompts_for_a_file() {
        let lines = render(&AppViewModel::default());
        assert!(lines.iter().any(|l| l.starts_with("File:    none")));
        assert!(lines.contains(&"Status:  idle".to_string()));
        assert!(lines.contains(&"Actions: convert [disabled]  download [disabled]".to_string()));
    }

    #[test]
    fn succeeded_view_shows_result_notifications_and_catalog() {
        let view = AppViewModel {
            selected_file: Some(SelectedFileView {
                name: "sales.csv".to_string(),
                byte_size: 1024,
            }),
            output_name: "sales_converted.xlsx".to_string(),
            phase: RequestPhase::Succeeded,
            converted_file_name: Some("sales_converted.xlsx".to_string()),
            can_convert: true,
            can_download: true,
            notifications: vec![NotificationView {
                id: NotificationId(1),
                kind: NotificationKind::Success,
                text: "Conversion completed successfully!".to_string(),
            }],
            catalog: vec!["old.xlsx".to_string()],
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert_eq!(
            lines,
            vec![
                "== CSV to XLSX Converter ==",
                "File:    sales.csv (1.0 KB)",
                "Output:  sales_converted.xlsx",
                "Status:  converted (sales_converted.xlsx)",
                "Actions: convert [ready]  download [ready]",
                "  [ok] Conversion completed successfully!",
                "Available files:",
                "  - old.xlsx",
            ]
        );
    }

    #[test]
    fn failure_shows_inline_error() {
        let view = AppViewModel {
            phase: RequestPhase::Failed,
            error: Some("Conversion failed: HTTP status 500: disk full".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert!(lines.contains(&"Status:  failed".to_string()));
        assert!(lines.contains(&"Error:   Conversion failed: HTTP status 500: disk full".to_string()));
    }

    #[test]
    fn sizes_use_one_decimal_kilobyte() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(0), "0.0 KB");
    }
}
