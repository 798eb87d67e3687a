use std::path::Path;

use crate::error::Error;
use crate::options::Encoding;

/// External `.env` parsing boundary.
///
/// Implementations own the file grammar. The resolver only consumes the
/// returned entries, in file order, and applies merge policy itself.
pub trait ParseSource {
    fn parse(&self, path: &Path, encoding: Encoding) -> Result<Vec<(String, String)>, Error>;
}

/// Default source backed by the `dotenvy` parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvSource;

impl ParseSource for DotenvSource {
    fn parse(&self, path: &Path, encoding: Encoding) -> Result<Vec<(String, String)>, Error> {
        let bytes = std::fs::read(path)?;
        let content = decode(&bytes, encoding)?;
        dotenvy::from_read_iter(content.as_bytes())
            .map(|item| item.map_err(Error::from))
            .collect()
    }
}

fn decode(bytes: &[u8], encoding: Encoding) -> Result<&str, Error> {
    match encoding {
        Encoding::Utf8 => Ok(std::str::from_utf8(bytes)?),
    }
}

#[cfg(test)]
mod tests {
    use super::{DotenvSource, ParseSource};
    use crate::error::Error;
    use crate::options::Encoding;

    #[test]
    fn parses_entries_in_file_order() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join(".env");
        std::fs::write(&file, "B=2\n# comment\nA=1\n").expect("failed to write fixture");

        let entries = DotenvSource
            .parse(&file, Encoding::Utf8)
            .expect("parse should succeed");

        assert_eq!(
            entries,
            vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_file_returns_io_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("missing.env");

        let err = DotenvSource
            .parse(&missing, Encoding::Utf8)
            .expect_err("expected I/O error");

        match err {
            Error::Io(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_returns_encoding_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join(".env");
        std::fs::write(&file, [0x41, 0x3d, 0x80, 0x0a]).expect("failed to write fixture");

        let err = DotenvSource
            .parse(&file, Encoding::Utf8)
            .expect_err("expected encoding error");

        match err {
            Error::Encoding(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
