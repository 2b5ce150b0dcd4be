//! Items of a batch and the locators they point at.
//!
//! # Examples
//!
//! ```rust
//! use tranche::download::Item;
//!
//! let item = Item::new("lecture-01", "https://drive.google.com/file/d/abc123/view");
//! assert_eq!(item.name, "lecture-01");
//! assert_eq!(item.locator.as_str(), "https://drive.google.com/file/d/abc123/view");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque identifier of a remote resource.
///
/// A locator is usually a URL, but its interpretation belongs to the
/// [`Fetcher`](crate::fetch::Fetcher) that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    /// Wraps a raw locator string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the locator as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique name, used as the progress table key and the output file stem.
    pub name: String,
    /// Where the file comes from.
    pub locator: Locator,
}

impl Item {
    /// Creates a new [`Item`].
    pub fn new(name: impl Into<String>, locator: impl Into<Locator>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }

    /// Path the item is written to: `{directory}/{name}.{extension}`.
    pub fn destination(&self, directory: &Path, extension: &str) -> PathBuf {
        if extension.is_empty() {
            directory.join(&self.name)
        } else {
            directory.join(format!("{}.{}", self.name, extension))
        }
    }
}

impl<N, L> From<(N, L)> for Item
where
    N: Into<String>,
    L: Into<Locator>,
{
    /// Builds an item from a `(name, locator)` pair.
    fn from((name, locator): (N, L)) -> Self {
        Self::new(name, locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_with_extension() {
        let item = Item::new("2Yil2Ay1Gun", "https://example.com/a");
        assert_eq!(
            item.destination(Path::new("downloads"), "mp4"),
            PathBuf::from("downloads/2Yil2Ay1Gun.mp4")
        );
    }

    #[test]
    fn test_destination_without_extension() {
        let item = Item::new("raw", "https://example.com/a");
        assert_eq!(
            item.destination(Path::new("out"), ""),
            PathBuf::from("out/raw")
        );
    }

    #[test]
    fn test_item_from_pair() {
        let item: Item = ("clip", "https://example.com/clip").into();
        assert_eq!(item.name, "clip");
        assert_eq!(item.locator, Locator::from("https://example.com/clip"));
    }
}
