//! HTML parser for the archive's page types
//!
//! This module turns raw markup into structured values. It performs no I/O:
//! - Search listing root: the pagination upper bound
//! - Search listing page: catalog entries and their version links
//! - Detail page: one [`File`] per download-table row
//! - Download page: the storage link and mirror links

use crate::catalog::File;
use crate::ScraperError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const PAGINATION_ITEMS: &str = "#searchPagination>li";
const LISTING_ENTRIES: &str = ".media>.media-body";
const ENTRY_TITLE: &str = ".mt-0 a";
const VERSION_LINKS: &str = ".nav>.nav-link>a";
const DOWNLOAD_ROWS: &str = "#downloadsTable tbody tr";
const ROW_CELLS: &str = "td";
const STORAGE_LINK: &str = "#localClientLink a";
const MIRROR_LINKS: &str = "#mirrorsList a";

/// A field of [`File`] that can be filled from the download table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileField {
    Name,
    Identifier,
    Version,
    Language,
    Architecture,
    Size,
    Checksum,
}

/// How a value is pulled out of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Trimmed text content of the whole cell
    CellText,
    /// Attribute of the first element matching `selector` inside the cell
    ChildAttr {
        selector: &'static str,
        attr: &'static str,
    },
}

/// Maps one download-table column to one file field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub column: usize,
    pub field: FileField,
    pub extraction: Extraction,
}

/// Layout of the detail page's download table
///
/// A column may feed several fields. Columns not listed here (such as the
/// download counter) are ignored.
pub const FILE_TABLE_COLUMNS: &[ColumnRule] = &[
    ColumnRule {
        column: 0,
        field: FileField::Name,
        extraction: Extraction::CellText,
    },
    ColumnRule {
        column: 0,
        field: FileField::Identifier,
        extraction: Extraction::ChildAttr {
            selector: "a",
            attr: "href",
        },
    },
    ColumnRule {
        column: 1,
        field: FileField::Version,
        extraction: Extraction::CellText,
    },
    ColumnRule {
        column: 2,
        field: FileField::Language,
        extraction: Extraction::CellText,
    },
    ColumnRule {
        column: 3,
        field: FileField::Architecture,
        extraction: Extraction::ChildAttr {
            selector: "img",
            attr: "title",
        },
    },
    ColumnRule {
        column: 4,
        field: FileField::Size,
        extraction: Extraction::CellText,
    },
    ColumnRule {
        column: 4,
        field: FileField::Checksum,
        extraction: Extraction::ChildAttr {
            selector: "span",
            attr: "title",
        },
    },
];

/// One version link of a catalog entry in the search listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Title of the catalog entry the link belongs to
    pub title: String,

    /// Version label (the link text)
    pub version: String,

    /// Link target, `None` when the anchor has no `href`
    pub link: Option<String>,
}

/// Links extracted from a download page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadLinks {
    /// Distributed-storage link, if the page offers one
    pub storage_link: Option<String>,

    /// Mirror links in document order
    pub mirror_links: Vec<String>,
}

/// A column rule with its child selector compiled
struct CompiledRule {
    rule: ColumnRule,
    child: Option<Selector>,
}

/// Parser holding the compiled selectors for every page type
pub struct PageParser {
    pagination_items: Selector,
    listing_entries: Selector,
    entry_title: Selector,
    version_links: Selector,
    download_rows: Selector,
    row_cells: Selector,
    storage_link: Selector,
    mirror_links: Selector,
    columns: Vec<CompiledRule>,
    download_prefix: String,
}

impl PageParser {
    /// Compiles all selectors
    ///
    /// # Arguments
    ///
    /// * `download_prefix` - Path prefix removed from download links to form file identifiers
    pub fn new(download_prefix: impl Into<String>) -> Result<Self, ScraperError> {
        let columns = FILE_TABLE_COLUMNS
            .iter()
            .map(|rule| -> Result<CompiledRule, ScraperError> {
                let child = match rule.extraction {
                    Extraction::CellText => None,
                    Extraction::ChildAttr { selector, .. } => Some(compile(selector)?),
                };
                Ok(CompiledRule { rule: *rule, child })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pagination_items: compile(PAGINATION_ITEMS)?,
            listing_entries: compile(LISTING_ENTRIES)?,
            entry_title: compile(ENTRY_TITLE)?,
            version_links: compile(VERSION_LINKS)?,
            download_rows: compile(DOWNLOAD_ROWS)?,
            row_cells: compile(ROW_CELLS)?,
            storage_link: compile(STORAGE_LINK)?,
            mirror_links: compile(MIRROR_LINKS)?,
            columns,
            download_prefix: download_prefix.into(),
        })
    }

    /// Extracts the number of search result pages from the last pagination item
    ///
    /// # Arguments
    ///
    /// * `html` - Markup of the search listing root
    /// * `source` - URL the markup came from (used in error messages)
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` - The pagination upper bound
    /// * `Err(ScraperError::MissingPagination)` - No pagination control on the page
    /// * `Err(ScraperError::PageCount)` - The last label is not an unsigned integer
    pub fn parse_page_count(&self, html: &str, source: &Url) -> Result<u32, ScraperError> {
        let document = Html::parse_document(html);

        let last = document
            .select(&self.pagination_items)
            .last()
            .ok_or_else(|| ScraperError::MissingPagination {
                url: source.to_string(),
            })?;

        let label = element_text(&last);
        parse_unsigned(&label).ok_or(ScraperError::PageCount { label })
    }

    /// Lists every version link of every catalog entry, in document order
    pub fn parse_search_page(&self, html: &str) -> Vec<ListingEntry> {
        let document = Html::parse_document(html);
        let mut entries = Vec::new();

        for entry in document.select(&self.listing_entries) {
            let title = entry
                .select(&self.entry_title)
                .next()
                .map(|element| element_text(&element))
                .unwrap_or_default();

            for anchor in entry.select(&self.version_links) {
                entries.push(ListingEntry {
                    title: title.clone(),
                    version: element_text(&anchor),
                    link: anchor.value().attr("href").map(str::to_string),
                });
            }
        }

        entries
    }

    /// Builds one file per download-table row, in row order
    ///
    /// Fields whose cell or sub-element is missing stay empty; the row is kept.
    pub fn parse_article_page(&self, html: &str) -> Vec<File> {
        let document = Html::parse_document(html);

        document
            .select(&self.download_rows)
            .map(|row| {
                let cells: Vec<ElementRef> = row.select(&self.row_cells).collect();
                let mut file = File::default();

                for compiled in &self.columns {
                    let Some(cell) = cells.get(compiled.rule.column) else {
                        continue;
                    };
                    if let Some(value) = self.extract(cell, compiled) {
                        self.assign(&mut file, compiled.rule.field, value);
                    }
                }

                file
            })
            .collect()
    }

    /// Extracts the storage link and mirror links from a download page
    pub fn parse_download_page(&self, html: &str) -> DownloadLinks {
        let document = Html::parse_document(html);

        let storage_link = document
            .select(&self.storage_link)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string);

        let mirror_links = document
            .select(&self.mirror_links)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .collect();

        DownloadLinks {
            storage_link,
            mirror_links,
        }
    }

    fn extract(&self, cell: &ElementRef, compiled: &CompiledRule) -> Option<String> {
        match (compiled.rule.extraction, &compiled.child) {
            (Extraction::CellText, _) => Some(element_text(cell)),
            (Extraction::ChildAttr { attr, .. }, Some(child)) => cell
                .select(child)
                .next()
                .and_then(|element| element.value().attr(attr))
                .map(|value| value.trim().to_string()),
            (Extraction::ChildAttr { .. }, None) => None,
        }
    }

    fn assign(&self, file: &mut File, field: FileField, value: String) {
        match field {
            FileField::Name => file.name = value,
            FileField::Identifier => file.identifier = value.replace(&self.download_prefix, ""),
            FileField::Version => file.version = value,
            FileField::Language => file.language = value,
            FileField::Architecture => file.architecture = value,
            FileField::Size => file.size = value,
            FileField::Checksum => file.checksum = value,
        }
    }
}

/// Compiles a CSS selector, reporting failures as `ScraperError::Selector`
fn compile(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Concatenated, trimmed text content of an element
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a plain base-10 unsigned integer (no sign, no whitespace)
fn parse_unsigned(label: &str) -> Option<u32> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}
