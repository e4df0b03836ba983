use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Read and deserialize a local JSON file, keeping the path in the error.
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_is_read_error() {
        let result: Result<Vec<u32>> = read_json("does/not/exist.json");
        assert!(matches!(result, Err(Error::InputRead { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result: Result<HashMap<String, u32>> = read_json(file.path());
        match result {
            Err(Error::InputParse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
