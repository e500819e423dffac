/// Downloadable file definitions
///
/// A `File` starts life as a row of an article's download table and is later
/// enriched with the links found on its own download page.

/// Number of fixed columns in a flattened file row (mirrors trail after these)
pub const FIXED_COLUMNS: usize = 8;

/// One downloadable artifact of a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    /// Display name of the download
    pub name: String,

    /// Version label shown in the download table
    pub version: String,

    /// Language label shown in the download table
    pub language: String,

    /// Identifier taken from the download-page path segment
    pub identifier: String,

    /// Size as display text (e.g. "1.2MB")
    pub size: String,

    /// Checksum as display text
    pub checksum: String,

    /// Architecture label (e.g. "x86")
    pub architecture: String,

    /// Content-addressed storage link, empty when the download page has none
    pub storage_link: String,

    /// Mirror links in download-page order
    pub mirror_links: Vec<String>,
}

impl File {
    /// Returns true if a distributed-storage link was found for this file
    pub fn has_storage_link(&self) -> bool {
        !self.storage_link.is_empty()
    }

    /// Flattens the file into an output row
    ///
    /// The eight fixed columns come first, followed by one column per mirror link,
    /// so the row width varies with the mirror count.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(FIXED_COLUMNS + self.mirror_links.len());
        record.push(self.name.clone());
        record.push(self.version.clone());
        record.push(self.language.clone());
        record.push(self.identifier.clone());
        record.push(self.size.clone());
        record.push(self.checksum.clone());
        record.push(self.architecture.clone());
        record.push(self.storage_link.clone());
        record.extend(self.mirror_links.iter().cloned());
        record
    }
}
