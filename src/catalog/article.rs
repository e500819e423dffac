use crate::catalog::File;

/// One catalog entry (a named piece of software) at one version grouping
///
/// Built as a stub from the search listing, then filled with files from its
/// detail page. An article keeps its title and version even if no files could be
/// extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// Software title from the search listing
    pub title: String,

    /// Version label of this grouping
    pub version: String,

    /// Link to the detail page, as found in the listing markup
    pub link: String,

    /// Files in detail-page table order
    pub files: Vec<File>,
}

impl Article {
    /// Creates an article stub with no files
    pub fn stub(
        title: impl Into<String>,
        version: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            link: link.into(),
            files: Vec::new(),
        }
    }

    /// Iterates over the output rows of every file in this article
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.files.iter().map(File::to_record)
    }
}
