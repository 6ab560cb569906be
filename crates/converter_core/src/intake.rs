use std::path::PathBuf;

use thiserror::Error;

pub const CSV_MIME: &str = "text/csv";
const CSV_SUFFIX: &str = ".csv";
const OUTPUT_SUFFIX: &str = "_converted.xlsx";

/// Raw file offered by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub byte_size: u64,
    pub source: PathBuf,
}

/// A validated CSV file ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_or_extension: String,
    pub source: PathBuf,
}

/// How the candidate reached the intake; only the rejection wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    Dropped,
    Picked,
}

impl IntakeSource {
    pub fn rejection_message(self) -> &'static str {
        match self {
            IntakeSource::Dropped => "Please upload a CSV file.",
            IntakeSource::Picked => "Please select a CSV file.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("not a csv file: {name} ({mime})")]
    NotCsv { name: String, mime: String },
}

/// Shared by the drop and pick paths.
pub fn validate_candidate(candidate: FileCandidate) -> Result<SelectedFile, IntakeError> {
    let is_csv = candidate.mime == CSV_MIME || candidate.name.ends_with(CSV_SUFFIX);
    if !is_csv {
        return Err(IntakeError::NotCsv {
            name: candidate.name,
            mime: candidate.mime,
        });
    }
    let mime_or_extension = if candidate.mime.is_empty() {
        CSV_SUFFIX.to_string()
    } else {
        candidate.mime
    };
    Ok(SelectedFile {
        name: candidate.name,
        byte_size: candidate.byte_size,
        mime_or_extension,
        source: candidate.source,
    })
}

/// `sales.csv` becomes `sales_converted.xlsx`.
pub fn default_output_name(file_name: &str) -> String {
    let base = file_name.strip_suffix(CSV_SUFFIX).unwrap_or(file_name);
    format!("{base}{OUTPUT_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, mime: &str) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            mime: mime.to_string(),
            byte_size: 10,
            source: PathBuf::from(name),
        }
    }

    #[test]
    fn accepts_by_extension_or_mime() {
        assert!(validate_candidate(candidate("a.csv", "")).is_ok());
        assert!(validate_candidate(candidate("export", CSV_MIME)).is_ok());
        assert!(validate_candidate(candidate("a.txt", "text/plain")).is_err());
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        assert!(validate_candidate(candidate("A.CSV", "")).is_err());
    }

    #[test]
    fn output_name_strips_only_trailing_extension() {
        assert_eq!(default_output_name("sales.csv"), "sales_converted.xlsx");
        assert_eq!(default_output_name("a.csv.csv"), "a.csv_converted.xlsx");
        assert_eq!(default_output_name("export"), "export_converted.xlsx");
    }
}
