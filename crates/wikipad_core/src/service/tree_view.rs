//! Tree-view projection of the flat page list.
//!
//! # Responsibility
//! - Rebuild hierarchy from `parent_id` references on demand.
//! - Surface orphans and pages cut off from every top-level page.
//! - Derive short plain-text previews from HTML content.
//!
//! # Invariants
//! - Sibling order is creation order.
//! - Projection never loops, even when `parent_id` references form a cycle.
//! - Orphans are listed after top-level pages, at depth 0.

use crate::model::page::{Page, PageId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const PREVIEW_MAX_CHARS: usize = 100;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One visible row of the page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow<'a> {
    pub page: &'a Page,
    /// Nesting depth; top-level pages and orphans are 0.
    pub depth: usize,
    /// Whether the row's page references a missing parent.
    pub orphan: bool,
}

/// Direct children of `parent`, or top-level pages when `parent` is `None`.
pub fn children_of<'a>(pages: &'a [Page], parent: Option<&PageId>) -> Vec<&'a Page> {
    pages
        .iter()
        .filter(|page| page.parent_id.as_ref() == parent)
        .collect()
}

/// Pages with no parent.
pub fn root_pages(pages: &[Page]) -> Vec<&Page> {
    pages.iter().filter(|page| page.is_top_level()).collect()
}

/// Pages whose parent id does not exist in the collection.
pub fn orphans(pages: &[Page]) -> Vec<&Page> {
    let ids = pages.iter().map(|page| &page.id).collect::<HashSet<_>>();
    pages
        .iter()
        .filter(|page| matches!(&page.parent_id, Some(parent) if !ids.contains(parent)))
        .collect()
}

/// Depth-first outline starting from top-level pages, then orphans.
pub fn outline(pages: &[Page]) -> Vec<OutlineRow<'_>> {
    let orphan_ids = orphans(pages)
        .into_iter()
        .map(|page| &page.id)
        .collect::<HashSet<_>>();
    let starts = root_pages(pages)
        .into_iter()
        .chain(pages.iter().filter(|page| orphan_ids.contains(&page.id)));

    let mut rows = Vec::with_capacity(pages.len());
    let mut visited = HashSet::new();
    for start in starts {
        let mut stack = vec![(start, 0usize)];
        while let Some((page, depth)) = stack.pop() {
            if !visited.insert(&page.id) {
                continue;
            }
            rows.push(OutlineRow {
                page,
                depth,
                orphan: orphan_ids.contains(&page.id),
            });
            let children = children_of(pages, Some(&page.id));
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }
    rows
}

/// Pages that no outline row reaches, e.g. a subtree moved under itself.
pub fn unreachable_pages(pages: &[Page]) -> Vec<&Page> {
    let reached = outline(pages)
        .into_iter()
        .map(|row| &row.page.id)
        .collect::<HashSet<_>>();
    pages
        .iter()
        .filter(|page| !reached.contains(&page.id))
        .collect()
}

/// Plain-text summary of HTML content, at most 100 characters.
///
/// Tags are dropped, common entities decoded and whitespace collapsed.
pub fn derive_content_preview(content: &str) -> Option<String> {
    let without_tags = HTML_TAG_RE.replace_all(content, " ");
    let decoded = decode_entities(&without_tags);
    let normalized = WHITESPACE_RE.replace_all(&decoded, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
