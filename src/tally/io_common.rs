use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The declared type of an input: the explicit type if any, else the file
/// extension. The content of the file is not looked at.
pub fn declared_type(path: &str, input_type: Option<&str>) -> Option<String> {
    match input_type {
        Some(t) => Some(t.to_lowercase()),
        None => Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase()),
    }
}

pub fn is_declared_csv(path: &str, input_type: Option<&str>) -> bool {
    declared_type(path, input_type).as_deref() == Some("csv")
}
