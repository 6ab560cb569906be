const FALLBACK_NAME: &str = "converted.xlsx";
const MAX_NAME_LEN: usize = 120;

/// Windows-safe local file name for a download.
///
/// Path separators and reserved characters become `_`, so a server-supplied
/// name can never escape the download directory.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    let mut final_name = truncate_on_char_boundary(compacted, MAX_NAME_LEN);
    let stem_len = final_name.split('.').next().map_or(0, str::len);
    if is_reserved_windows_name(&final_name[..stem_len]) {
        final_name.insert(stem_len, '_');
    }
    final_name
}

fn truncate_on_char_boundary(mut name: String, max_len: usize) -> String {
    if name.len() > max_len {
        let mut cut = max_len;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
