//! HTML capability: raw body -> queryable, prunable node tree.

use crate::{Error, Result};
use scraper::{Html, Selector};

/// A parsed document the extractor can prune and query with CSS selectors.
pub trait HtmlDocument {
    /// Detach every element matching `selector` (with its subtree).
    /// Returns how many elements were removed.
    fn remove_all(&mut self, selector: &str) -> Result<usize>;

    /// Text content of every element matching `selector`, in document order.
    fn select_text(&self, selector: &str) -> Result<Vec<String>>;

    /// Text content of the first element matching `selector`.
    fn first_text(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.select_text(selector)?.into_iter().next())
    }

    /// Text content of the whole `<body>`.
    fn body_text(&self) -> String;
}

/// Turns a response body into an [`HtmlDocument`].
pub trait HtmlParser: Send + Sync {
    type Document: HtmlDocument;

    fn parse(&self, body: &str) -> Self::Document;
}

/// html5ever-backed parser via `scraper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

impl HtmlParser for ScraperParser {
    type Document = ScraperDocument;

    fn parse(&self, body: &str) -> ScraperDocument {
        ScraperDocument {
            html: Html::parse_document(body),
        }
    }
}

/// A `scraper::Html` tree.
pub struct ScraperDocument {
    html: Html,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::ParseError(format!("invalid selector '{}': {:?}", selector, e)))
}

impl HtmlDocument for ScraperDocument {
    fn remove_all(&mut self, selector: &str) -> Result<usize> {
        let sel = parse_selector(selector)?;
        // Walk from the root so already-detached nodes are never revisited.
        let ids: Vec<_> = self
            .html
            .root_element()
            .select(&sel)
            .map(|el| el.id())
            .collect();
        let mut removed = 0;
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn select_text(&self, selector: &str) -> Result<Vec<String>> {
        let sel = parse_selector(selector)?;
        Ok(self
            .html
            .root_element()
            .select(&sel)
            .map(|el| el.text().collect::<String>())
            .collect())
    }

    fn body_text(&self) -> String {
        let root = self.html.root_element();
        parse_selector("body")
            .ok()
            .and_then(|sel| root.select(&sel).next())
            .map(|b| b.text().collect::<String>())
            .unwrap_or_else(|| root.text().collect())
    }
}
