use std::fs;

use camino::Utf8Path;

use crate::error::GeodataError;

pub fn read_token(path: &Utf8Path) -> Result<String, GeodataError> {
    let content = fs::read_to_string(path.as_std_path())
        .map_err(|_| GeodataError::MissingCredentials(path.as_std_path().to_path_buf()))?;
    let token = content.trim();
    if token.is_empty() {
        return Err(GeodataError::EmptyCredentials(
            path.as_std_path().to_path_buf(),
        ));
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use camino::Utf8PathBuf;

    use super::*;

    #[test]
    fn token_is_trimmed() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("key.txt")).unwrap();
        fs::write(path.as_std_path(), "  abc123\n").unwrap();
        assert_eq!(read_token(&path).unwrap(), "abc123");
    }

    #[test]
    fn missing_and_empty_files() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("key.txt")).unwrap();
        assert_matches!(read_token(&path), Err(GeodataError::MissingCredentials(_)));
        fs::write(path.as_std_path(), "\n \n").unwrap();
        assert_matches!(read_token(&path), Err(GeodataError::EmptyCredentials(_)));
    }
}
