//! Editing surface contract and an in-memory HTML implementation.
//!
//! Positions follow rich-text editor conventions: text characters, HTML
//! entities and embeds each occupy one index; markup tags occupy none.
//! A pasted fragment is one atomic block and occupies one index.

use crate::model::page::PageId;
use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<img><img\b[^>]*>)|(?P<tag><[^>]*>)|(?P<entity>&#?[a-z0-9]+;)|(?s:.)")
        .expect("valid html token regex")
});

/// Change event issued by a surface after a user-visible edit.
///
/// `page_id` is captured when the event is issued, so a late event still
/// names the page it was typed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub page_id: PageId,
    pub content: String,
}

impl ContentChange {
    pub fn new(page_id: PageId, content: impl Into<String>) -> Self {
        Self {
            page_id,
            content: content.into(),
        }
    }
}

/// Editing surface driven by `EditorBinding`.
pub trait EditSurface {
    /// Shows `content` for `page_id`, discarding any uncommitted buffer.
    fn load(&mut self, page_id: PageId, content: &str);
    /// Detaches the surface from any page.
    fn unload(&mut self);
    /// Focuses the surface and returns the cursor index.
    ///
    /// A missing selection defaults to end-of-document. Returns `None` when
    /// no page is loaded.
    fn focus_selection(&mut self) -> Option<usize>;
    /// Moves the cursor. Indexes past the end are clamped.
    fn set_selection(&mut self, index: usize);
    /// Inserts an image embed at `index`.
    fn insert_image(&mut self, index: usize, source: &str) -> Option<ContentChange>;
    /// Pastes an HTML fragment at `index` as one atomic block.
    fn paste_html(&mut self, index: usize, html: &str) -> Option<ContentChange>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Zero-width markup such as `<p>` or `</td>`.
    Markup(String),
    /// One indexable unit: a character, an entity, an embed or a pasted block.
    Unit(String),
}

/// In-memory surface holding the document as a token list.
#[derive(Debug, Default, Clone)]
pub struct HtmlSurface {
    page_id: Option<PageId>,
    tokens: Vec<Token>,
    selection: Option<usize>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page currently shown, if any.
    pub fn page_id(&self) -> Option<&PageId> {
        self.page_id.as_ref()
    }

    /// Current cursor index, if a selection exists.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Serializes the document back to HTML.
    pub fn html(&self) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Markup(value) | Token::Unit(value) => value.as_str(),
            })
            .collect()
    }

    /// Number of indexable units in the document.
    pub fn len(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::Unit(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Types plain text at the cursor, as a user would.
    pub fn type_text(&mut self, text: &str) -> Option<ContentChange> {
        let index = self.focus_selection()?;
        let units = text
            .chars()
            .map(|ch| Token::Unit(escape_text(ch)))
            .collect::<Vec<_>>();
        let count = units.len();
        let at = self.token_position(index);
        self.tokens.splice(at..at, units);
        self.selection = Some(index + count);
        self.emit()
    }

    /// Replaces the whole document, as a select-all paste would.
    pub fn replace_all(&mut self, html: &str) -> Option<ContentChange> {
        self.page_id.as_ref()?;
        self.tokens = tokenize(html);
        self.selection = Some(self.len());
        self.emit()
    }

    fn emit(&self) -> Option<ContentChange> {
        let page_id = self.page_id.clone()?;
        Some(ContentChange::new(page_id, self.html()))
    }

    fn insert_unit(&mut self, at: usize, value: String) -> Option<ContentChange> {
        self.page_id.as_ref()?;
        self.tokens.insert(at, Token::Unit(value));
        self.emit()
    }

    /// Maps a unit index to a token slot for a block-level fragment.
    ///
    /// Index 0 lands before the first opening tag, the end index lands after
    /// all trailing markup, and anything else behaves like an inline slot.
    fn block_position(&self, index: usize) -> usize {
        if index == 0 {
            return self
                .tokens
                .iter()
                .position(|token| match token {
                    Token::Markup(tag) => !tag.starts_with("</"),
                    Token::Unit(_) => true,
                })
                .unwrap_or(self.tokens.len());
        }
        if index >= self.len() {
            return self.tokens.len();
        }
        self.token_position(index)
    }

    /// Maps a unit index to a token slot.
    ///
    /// Index 0 lands before the first unit (inside any leading markup); any
    /// other index lands right after the unit it follows.
    fn token_position(&self, index: usize) -> usize {
        let index = index.min(self.len());
        if index == 0 {
            return self
                .tokens
                .iter()
                .position(|token| matches!(token, Token::Unit(_)))
                .unwrap_or(self.tokens.len());
        }

        let mut seen = 0;
        for (position, token) in self.tokens.iter().enumerate() {
            if matches!(token, Token::Unit(_)) {
                seen += 1;
                if seen == index {
                    return position + 1;
                }
            }
        }
        self.tokens.len()
    }
}

impl EditSurface for HtmlSurface {
    fn load(&mut self, page_id: PageId, content: &str) {
        self.page_id = Some(page_id);
        self.tokens = tokenize(content);
        self.selection = None;
    }

    fn unload(&mut self) {
        self.page_id = None;
        self.tokens.clear();
        self.selection = None;
    }

    fn focus_selection(&mut self) -> Option<usize> {
        self.page_id.as_ref()?;
        let index = self.selection.unwrap_or_else(|| self.len());
        self.selection = Some(index);
        Some(index)
    }

    fn set_selection(&mut self, index: usize) {
        if self.page_id.is_some() {
            self.selection = Some(index.min(self.len()));
        }
    }

    fn insert_image(&mut self, index: usize, source: &str) -> Option<ContentChange> {
        let at = self.token_position(index);
        self.insert_unit(at, format!(r#"<img src="{}">"#, escape_attr(source)))
    }

    fn paste_html(&mut self, index: usize, html: &str) -> Option<ContentChange> {
        let at = self.block_position(index);
        self.insert_unit(at, html.to_string())
    }
}

fn tokenize(html: &str) -> Vec<Token> {
    HTML_TOKEN_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?.as_str().to_string();
            if caps.name("tag").is_some() {
                Some(Token::Markup(whole))
            } else {
                Some(Token::Unit(whole))
            }
        })
        .collect()
}

fn escape_text(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        other => other.to_string(),
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
