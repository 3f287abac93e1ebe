//! Page selection and range resolution.
//!
//! Two grammars turn user text into page selections:
//!
//! - **Contiguous range** `"start-end"`: 1-based, inclusive, ascending.
//! - **Discrete list** `"n1,n2,n3"`: 1-based, order and repetitions kept.
//!
//! Parsing is independent of any document, so malformed text is rejected
//! before a file is opened. Resolution checks bounds against a page count
//! and yields a [`PageSequence`] of zero-based indices.
//!
//! # Examples
//!
//! ```
//! use pdftoolkit::selection::{resolve_list, resolve_range};
//!
//! let split = resolve_range("2-4", 10).unwrap();
//! assert_eq!(split.indices(), &[1, 2, 3]);
//!
//! let extract = resolve_list("3,1,3", 5).unwrap();
//! assert_eq!(extract.indices(), &[2, 0, 2]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How repeated pages in a discrete list are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Every occurrence is kept; the page is copied once per mention.
    #[default]
    Keep,
    /// Only the first occurrence of each page is kept.
    Dedupe,
}

/// An ordered, validated sequence of zero-based page indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSequence(Vec<usize>);

impl PageSequence {
    /// Every page of a `page_count`-page document, in order.
    pub fn all(page_count: usize) -> Self {
        Self((0..page_count).collect())
    }

    /// Zero-based indices in output order.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// The same selection as 1-based page numbers.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.0.iter().map(|index| index + 1).collect()
    }

    /// Number of pages the output will contain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence selects nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the zero-based indices.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Consume the sequence and return the indices.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Map a selection made on the output of `self` back onto the source.
    ///
    /// If `self` produced document B from document A, and `inner` selects
    /// pages of B, the result selects the same pages directly from A.
    ///
    /// Returns `None` if `inner` refers to a page B does not have.
    pub fn compose(&self, inner: &PageSequence) -> Option<PageSequence> {
        inner
            .iter()
            .map(|&index| self.0.get(index).copied())
            .collect::<Option<Vec<_>>>()
            .map(PageSequence)
    }

    fn dedupe(self) -> Self {
        let mut seen = HashSet::with_capacity(self.0.len());
        Self(self.0.into_iter().filter(|index| seen.insert(*index)).collect())
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<usize>> for PageSequence {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl AsRef<[usize]> for PageSequence {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// A parsed contiguous range `start-end` (1-based, inclusive).
///
/// Bounds are not checked until [`PageRange::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    start: i64,
    end: i64,
}

impl PageRange {
    /// Parse a contiguous range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRange`] if the separator is missing or
    /// repeated, or if either side is not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftoolkit::selection::PageRange;
    ///
    /// let range = PageRange::parse(" 2 - 5 ").unwrap();
    /// assert_eq!((range.start(), range.end()), (2, 5));
    /// assert!(PageRange::parse("2-1-3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();

        if parts.len() != 2 {
            return Err(Error::malformed(
                s,
                "expected exactly one '-' between start and end page, e.g. '1-5'",
            ));
        }

        let start = parse_page_number(parts[0]).ok_or_else(|| {
            Error::malformed(s, format!("start page '{}' is not a number", parts[0].trim()))
        })?;
        let end = parse_page_number(parts[1]).ok_or_else(|| {
            Error::malformed(s, format!("end page '{}' is not a number", parts[1].trim()))
        })?;

        Ok(Self { start, end })
    }

    /// First page (1-based) as written.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Last page (1-based, inclusive) as written.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Check bounds against a document and produce the page sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `start < 1`, `end < start`, or
    /// `end > page_count`.
    pub fn resolve(&self, page_count: usize) -> Result<PageSequence> {
        let input = self.to_string();

        if self.start < 1 {
            return Err(Error::out_of_range(
                input,
                format!("start page must be at least 1, got {}", self.start),
            ));
        }

        if self.end < self.start {
            return Err(Error::out_of_range(
                input,
                format!(
                    "end page must be greater than or equal to start page ({} < {})",
                    self.end, self.start
                ),
            ));
        }

        if self.end > page_count as i64 {
            return Err(Error::out_of_range(
                input,
                format!(
                    "page {} does not exist (document has {} page(s))",
                    self.end, page_count
                ),
            ));
        }

        let first_index = (self.start - 1) as usize;
        let last_index_exclusive = self.end as usize;

        Ok(PageSequence((first_index..last_index_exclusive).collect()))
    }
}

impl FromStr for PageRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A parsed discrete list `n1,n2,…` (1-based, order and repeats kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList {
    pages: Vec<i64>,
}

impl PageList {
    /// Parse a comma separated list of page numbers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRange`] on an empty token (`"1,,2"`,
    /// `""`) or a token that is not an integer.
    pub fn parse(s: &str) -> Result<Self> {
        let mut pages = Vec::new();

        for (position, token) in s.split(',').enumerate() {
            let token = token.trim();

            if token.is_empty() {
                return Err(Error::malformed(s, format!("entry {} is empty", position + 1)));
            }

            let page = parse_page_number(token)
                .ok_or_else(|| Error::malformed(s, format!("'{token}' is not a page number")))?;

            pages.push(page);
        }

        Ok(Self { pages })
    }

    /// Page numbers (1-based) as written.
    pub fn pages(&self) -> &[i64] {
        &self.pages
    }

    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the list has no entries. A parsed list is never empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check bounds against a document and produce the page sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming the first page that is `< 1`
    /// or `> page_count`.
    pub fn resolve(&self, page_count: usize, policy: DuplicatePolicy) -> Result<PageSequence> {
        let mut indices = Vec::with_capacity(self.pages.len());

        for &page in &self.pages {
            if page < 1 || page > page_count as i64 {
                return Err(Error::out_of_range(
                    page.to_string(),
                    format!("page {page} does not exist (document has {page_count} page(s))"),
                ));
            }
            indices.push((page - 1) as usize);
        }

        let sequence = PageSequence(indices);
        Ok(match policy {
            DuplicatePolicy::Keep => sequence,
            DuplicatePolicy::Dedupe => sequence.dedupe(),
        })
    }
}

impl FromStr for PageList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .pages
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Parse and resolve a contiguous range in one step.
pub fn resolve_range(input: &str, page_count: usize) -> Result<PageSequence> {
    PageRange::parse(input)?.resolve(page_count)
}

/// Parse and resolve a discrete list in one step, keeping duplicates.
pub fn resolve_list(input: &str, page_count: usize) -> Result<PageSequence> {
    PageList::parse(input)?.resolve(page_count, DuplicatePolicy::Keep)
}

fn parse_page_number(token: &str) -> Option<i64> {
    token.trim().parse::<i64>().ok()
}
