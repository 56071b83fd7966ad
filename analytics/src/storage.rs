//! JSON-lines files holding one exported document per line.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{AnalyticsError, Result};

/// Reads every document in `path`. A missing file is an empty collection;
/// blank lines are ignored and any line that fails to decode is an error.
pub fn load_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            AnalyticsError::Store(format!("{}:{}: {e}", path.display(), index + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::records::Customer;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Vec<Customer> = load_lines(&dir.path().join("customers.jsonl")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.jsonl");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"id": 1, "default_address": {{"city": "Lyon"}}}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": 2}}"#).unwrap();

        let loaded: Vec<Customer> = load_lines(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].city(), Some("Lyon"));
    }

    #[test]
    fn undecodable_line_names_its_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.jsonl");
        fs::write(&path, "{\"id\": 1}\n{\"id\": \"one\"}\n").unwrap();

        let err = load_lines::<Customer>(&path).unwrap_err();
        match err {
            AnalyticsError::Store(message) => assert!(message.contains("customers.jsonl:2")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
