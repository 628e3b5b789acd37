//! Table Locator
//!
//! Finds the documentation table in the English and localized wiki pages
//! and copies the parts of each row the record builder needs into owned
//! values, so the DOM can be dropped before any network call.

use tracing::{debug, warn};

use super::document::{Document, Node};
use super::error::{ExtractError, Result};
use super::locale::LanguageTag;

/// Number of header columns of the documentation table: key, type, default, description.
pub const DOCUMENTATION_COLUMNS: usize = 4;

/// Attribute carrying the stable marker of the English table.
pub const MARKER_ATTRIBUTE: &str = "data-description";

// ============================================================================
// Extracted Shapes
// ============================================================================

/// The content of one `td` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCell {
    /// Full trimmed text.
    pub text: String,
    /// Trimmed text of the bold elements, where the key name lives.
    pub bold: String,
    /// Footnote label (`sup > i > span`), e.g. "upcoming".
    pub footnote: String,
    /// Footnote link label (`sup > i > a`), e.g. a version name.
    pub footnote_link: String,
    /// Bold lead term of each definition-list entry, in order.
    pub definitions: Vec<String>,
}

/// One data row of a documentation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    /// Key name when it sits in a header cell (`th > span > b`) instead of the first `td`.
    pub header_name: String,
    pub cells: Vec<SourceCell>,
}

impl SourceRow {
    pub fn cell(&self, index: usize) -> Option<&SourceCell> {
        self.cells.get(index)
    }
}

/// Data rows of a documentation table, header row excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub rows: Vec<SourceRow>,
}

/// A translation advertised by the page's cross-language links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageLink {
    pub tag: LanguageTag,
    pub href: Option<String>,
}

/// What is read from the English page in one pass.
#[derive(Debug, Clone)]
pub struct EnglishPage {
    pub table: SourceTable,
    pub languages: Vec<LanguageLink>,
}

impl EnglishPage {
    pub fn parse(html: &str, marker: &str) -> Result<Self> {
        let doc = Document::parse(html);
        Ok(Self {
            table: locate_english_table(&doc, marker)?,
            languages: language_links(&doc),
        })
    }
}

/// Parses a localized page and reads its documentation table.
pub fn parse_localized_table(html: &str, strict: bool) -> Result<SourceTable> {
    locate_localized_table(&Document::parse(html), strict)
}

// ============================================================================
// Unique Selection
// ============================================================================

/// Result of looking for the single element satisfying a structural predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    None,
    Unique(T),
    Ambiguous { first: T, count: usize },
}

pub fn select_unique<T>(candidates: Vec<T>) -> Selection<T> {
    let count = candidates.len();
    match candidates.into_iter().next() {
        None => Selection::None,
        Some(first) if count == 1 => Selection::Unique(first),
        Some(first) => Selection::Ambiguous { first, count },
    }
}

// ============================================================================
// Locators
// ============================================================================

/// Reads the English table: the first element carrying the section marker,
/// or the first table inside it when the marker sits on a wrapper.
pub fn locate_english_table(doc: &Document, marker: &str) -> Result<SourceTable> {
    let marked = doc
        .root()
        .find_first(|n| n.attr(MARKER_ATTRIBUTE).as_deref() == Some(marker))
        .ok_or_else(|| ExtractError::drift(format!("no element with {MARKER_ATTRIBUTE}={marker:?}")))?;

    let table = if marked.is("table") {
        marked
    } else {
        marked
            .find_first(|n| n.is("table"))
            .ok_or_else(|| ExtractError::drift(format!("{marker:?} section contains no table")))?
    };
    Ok(read_table(&table))
}

/// Reads the localized table: the table whose header row has exactly
/// [`DOCUMENTATION_COLUMNS`] columns.
///
/// Several matches are only tolerated when `strict` is off, in which case
/// the first one is used.
pub fn locate_localized_table(doc: &Document, strict: bool) -> Result<SourceTable> {
    let candidates = doc
        .root()
        .find_all(|n| n.is("table") && header_columns(n) == DOCUMENTATION_COLUMNS);

    match select_unique(candidates) {
        Selection::None => Err(ExtractError::drift(format!(
            "no table with {DOCUMENTATION_COLUMNS} header columns"
        ))),
        Selection::Unique(table) => Ok(read_table(&table)),
        Selection::Ambiguous { count, .. } if strict => {
            Err(ExtractError::AmbiguousTable { candidates: count })
        }
        Selection::Ambiguous { first, count } => {
            warn!(candidates = count, "Several localized tables match, using the first");
            Ok(read_table(&first))
        }
    }
}

/// Languages advertised by the page's cross-language links. Links with an
/// unparsable `lang` attribute are skipped.
pub fn language_links(doc: &Document) -> Vec<LanguageLink> {
    let Some(panel) = doc.root().find_first(|n| n.attr("id").as_deref() == Some("p-lang")) else {
        return Vec::new();
    };

    panel
        .find_all(|n| n.has_class("interlanguage-link"))
        .iter()
        .flat_map(|item| item.find_all(|n| n.is("a")))
        .filter_map(|a| {
            let lang = a.attr("lang")?;
            match lang.parse::<LanguageTag>() {
                Ok(tag) => Some(LanguageLink {
                    tag,
                    href: a.attr("href"),
                }),
                Err(e) => {
                    debug!(error = %e, "Skipping cross-language link");
                    None
                }
            }
        })
        .collect()
}

// ============================================================================
// Table Reading
// ============================================================================

/// Rows owned by `table` itself; rows of nested tables are not included.
fn table_rows(table: &Node) -> Vec<Node> {
    table
        .children()
        .into_iter()
        .flat_map(|child| match child.tag() {
            Some("tr") => vec![child],
            Some("thead" | "tbody" | "tfoot") => {
                child.children().into_iter().filter(|n| n.is("tr")).collect()
            }
            _ => Vec::new(),
        })
        .collect()
}

fn header_columns(table: &Node) -> usize {
    table_rows(table)
        .first()
        .map(|row| row.children().iter().filter(|c| c.is("th")).count())
        .unwrap_or(0)
}

fn read_table(table: &Node) -> SourceTable {
    SourceTable {
        rows: table_rows(table).iter().skip(1).map(read_row).collect(),
    }
}

fn read_row(row: &Node) -> SourceRow {
    let children = row.children();
    let header_name = children
        .iter()
        .filter(|c| c.is("th"))
        .map(|th| th.path_text(&["span", "b"]))
        .find(|name| !name.is_empty())
        .unwrap_or_default();

    SourceRow {
        header_name,
        cells: children.iter().filter(|c| c.is("td")).map(read_cell).collect(),
    }
}

fn read_cell(cell: &Node) -> SourceCell {
    SourceCell {
        text: cell.trimmed_text(),
        bold: cell.path_text(&["b"]),
        footnote: cell.path_text(&["sup", "i", "span"]),
        footnote_link: cell.path_text(&["sup", "i", "a"]),
        definitions: cell
            .find_all(|n| n.is("dd"))
            .iter()
            .map(definition_term)
            .collect(),
    }
}

/// Text of the bold elements that open their parent inside `dd`.
fn definition_term(dd: &Node) -> String {
    std::iter::once(dd.clone())
        .chain(dd.descendants())
        .filter_map(|n| n.first_element_child())
        .filter(|c| c.is("b"))
        .map(|b| b.text())
        .collect::<String>()
        .trim()
        .to_string()
}
