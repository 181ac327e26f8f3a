use crate::error::Error;
use std::fs;
use std::path::Path;

/// Source file lines as is, including blank lines, comments and labels, so that line numbers
/// from a map file point to the right place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceListing {
    lines: Box<[String]>,
}

impl SourceListing {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = fs::read(path)?;
        let text = String::from_utf8(data).map_err(|e| Error::Format {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from(text.as_str()))
    }

    /// Return line by its 1-based number.
    pub fn line(&self, number: u64) -> Option<&str> {
        let idx = usize::try_from(number.checked_sub(1)?).ok()?;
        self.lines.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for SourceListing {
    fn from(text: &str) -> Self {
        Self {
            lines: text.lines().map(ToString::to_string).collect(),
        }
    }
}
