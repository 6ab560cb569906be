use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use converter_core::{FileCandidate, Msg, CSV_MIME};
use thiserror::Error;

pub(crate) const HELP_TEXT: &str = "\
Commands:
  drop <path>     drop a CSV file onto the converter
  open <path>     pick a CSV file
  name <text>     set the output file name
  clear           remove the selected file
  convert         upload the file for conversion
  download        save the converted spreadsheet
  show            redraw the current state
  help            show this help
  quit            exit once running requests finish";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Msg(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a file path")]
    MissingPath(&'static str),
    #[error("cannot use {path:?}: {source}")]
    File { path: PathBuf, source: io::Error },
}

/// Parses one line of terminal input. Blank lines yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    let command = match word.trim_end() {
        "drop" => Command::Msg(Msg::FileDropped(candidate_arg("drop", rest)?)),
        "open" | "pick" => Command::Msg(Msg::FilePicked(candidate_arg("open", rest)?)),
        // The name is taken verbatim so blank names reach validation.
        "name" => Command::Msg(Msg::OutputNameChanged(rest.to_string())),
        "clear" => Command::Msg(Msg::ClearClicked),
        "convert" => Command::Msg(Msg::ConvertClicked),
        "download" => Command::Msg(Msg::DownloadClicked),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn candidate_arg(command: &'static str, raw: &str) -> Result<FileCandidate, InputError> {
    let path = unquote_path(raw.trim());
    if path.is_empty() {
        return Err(InputError::MissingPath(command));
    }
    let path = PathBuf::from(path);
    candidate_from_path(&path).map_err(|source| InputError::File { path, source })
}

/// Terminals quote dragged paths that contain spaces.
fn unquote_path(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

pub(crate) fn candidate_from_path(path: &Path) -> io::Result<FileCandidate> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileCandidate {
        name,
        mime: mime_for_path(path).to_string(),
        byte_size: meta.len(),
        source: path.to_path_buf(),
    })
}

/// Extension-based content type, matched case-insensitively.
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => CSV_MIME,
        "txt" => "text/plain",
        "json" => "application/json",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "",
    }
}
