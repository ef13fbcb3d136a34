//! Content extraction: fetch an article and strip it down to readable text.
//!
//! The extractor is deliberately naive. It removes obvious non-content
//! elements, keeps the first headline and the longer paragraphs, and falls
//! back to the whole body text when nothing else is found. Fetching and HTML
//! parsing are injected capabilities ([`HttpFetcher`], [`HtmlParser`]), so the
//! pipeline runs against canned pages in tests.

mod fetch;
mod html;

#[cfg(feature = "fetch")]
pub use fetch::ReqwestFetcher;
pub use fetch::{HttpFetcher, StaticFetcher};
pub use html::{HtmlDocument, HtmlParser, ScraperDocument, ScraperParser};

use crate::error::FetchError;
use crate::text::{collapse_whitespace, truncate_chars};
use crate::{Result, VideoConfig};
use log::debug;

/// Returned when a page yields no text at all.
pub const EXTRACTION_PLACEHOLDER: &str = "Unable to extract meaningful content from the URL.";

/// Elements that never carry article text.
pub const NOISE_SELECTOR: &str = "script, style, nav, header, footer, iframe, .ad, .advertisement";

/// Paragraphs inside these containers are preferred over loose ones.
/// When any scoped paragraph qualifies, loose paragraphs elsewhere on the
/// page are ignored rather than appended.
pub const SCOPED_PARAGRAPH_SELECTOR: &str = "article p, .article p, .content p, main p";

/// Turns article URLs into a short plain-text summary.
pub struct ContentExtractor<F, P = ScraperParser> {
    fetcher: F,
    parser: P,
    max_content_chars: usize,
    min_paragraph_chars: usize,
}

#[cfg(feature = "fetch")]
impl ContentExtractor<ReqwestFetcher> {
    /// Extractor backed by a real HTTP client.
    pub fn from_config(config: &VideoConfig) -> Result<Self> {
        Ok(Self::new(ReqwestFetcher::new(config)?, config))
    }
}

impl<F: HttpFetcher> ContentExtractor<F> {
    pub fn new(fetcher: F, config: &VideoConfig) -> Self {
        Self::with_parser(fetcher, ScraperParser, config)
    }
}

impl<F: HttpFetcher, P: HtmlParser> ContentExtractor<F, P> {
    pub fn with_parser(fetcher: F, parser: P, config: &VideoConfig) -> Self {
        Self {
            fetcher,
            parser,
            max_content_chars: config.max_content_chars,
            min_paragraph_chars: config.min_paragraph_chars,
        }
    }

    /// The injected fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `url` and extract its readable text.
    ///
    /// Never retries. Invalid URLs, network failures, timeouts and non-2xx
    /// responses all come back as [`Error::Extraction`](crate::Error::Extraction).
    pub fn extract(&self, url: &str) -> Result<String> {
        validate_url(url)?;
        debug!("fetching article {}", url);
        let body = self.fetcher.fetch(url)?;
        debug!("fetched {} bytes from {}", body.len(), url);
        self.extract_from_html(&body)
    }

    /// Extract readable text from an already fetched body.
    pub fn extract_from_html(&self, body: &str) -> Result<String> {
        let mut doc = self.parser.parse(body);
        doc.remove_all(NOISE_SELECTOR)?;

        let mut content = String::new();

        if let Some(title) = doc.first_text("h1")? {
            let title = title.trim();
            if !title.is_empty() {
                content.push_str(title);
                content.push_str(". ");
            }
        }

        let mut paragraphs = self.long_paragraphs(&doc, SCOPED_PARAGRAPH_SELECTOR)?;
        if paragraphs.is_empty() {
            paragraphs = self.long_paragraphs(&doc, "p")?;
        }
        debug!("kept {} paragraphs", paragraphs.len());
        for p in paragraphs {
            content.push_str(&p);
            content.push(' ');
        }

        if content.is_empty() {
            content = doc.body_text().trim().to_string();
        }

        let content = collapse_whitespace(&content);
        let content = truncate_chars(&content, self.max_content_chars);

        if content.is_empty() {
            Ok(EXTRACTION_PLACEHOLDER.to_string())
        } else {
            Ok(content.to_string())
        }
    }

    fn long_paragraphs(&self, doc: &P::Document, selector: &str) -> Result<Vec<String>> {
        Ok(doc
            .select_text(selector)?
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| t.chars().count() > self.min_paragraph_chars)
            .collect())
    }
}

/// Accept only absolute http(s) URLs.
fn validate_url(raw: &str) -> std::result::Result<(), FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const ARTICLE: &str = r#"<html><body>
<header><p>Site header that is long enough to count as a paragraph</p></header>
<h1>  Rivers rise across the valley </h1>
<article>
  <p>Heavy rain over the weekend pushed three rivers past flood stage.</p>
  <p>Short aside.</p>
  <p>Officials urged residents   near the banks
     to move to higher ground before nightfall.</p>
</article>
<aside><p>This sidebar paragraph is long but sits outside the article.</p></aside>
<footer><p>Copyright notice that is also quite long, really it is.</p></footer>
</body></html>"#;

    fn extractor() -> ContentExtractor<StaticFetcher> {
        ContentExtractor::new(StaticFetcher::new(), &VideoConfig::default())
    }

    #[test]
    fn extracts_title_and_scoped_paragraphs() {
        let text = extractor().extract_from_html(ARTICLE).unwrap();
        assert_eq!(
            text,
            "Rivers rise across the valley. Heavy rain over the weekend pushed three rivers \
             past flood stage. Officials urged residents near the banks to move to higher \
             ground before nightfall."
        );
    }

    #[test]
    fn falls_back_to_all_paragraphs() {
        let html = "<body><div><p>An unscoped paragraph that is comfortably long.</p>\
                    <p>tiny</p></div></body>";
        let text = extractor().extract_from_html(html).unwrap();
        assert_eq!(text, "An unscoped paragraph that is comfortably long.");
    }

    #[test]
    fn falls_back_to_body_text() {
        let html = "<body><div>Just a\n\n   loose   div</div><script>ignored()</script></body>";
        let text = extractor().extract_from_html(html).unwrap();
        assert_eq!(text, "Just a loose div");
    }

    #[test]
    fn empty_page_yields_placeholder() {
        let html = "<html><body><nav>menu</nav><script>x()</script></body></html>";
        let text = extractor().extract_from_html(html).unwrap();
        assert_eq!(text, EXTRACTION_PLACEHOLDER);
    }

    #[test]
    fn truncates_long_articles() {
        let para = format!("<p>{}</p>", "word ".repeat(400));
        let text = extractor().extract_from_html(&para).unwrap();
        assert_eq!(text.chars().count(), 1000);
    }

    #[test]
    fn extract_goes_through_fetcher() {
        let fetcher = StaticFetcher::new().with_page("https://news.test/story", ARTICLE);
        let extractor = ContentExtractor::new(fetcher, &VideoConfig::default());
        let text = extractor.extract("https://news.test/story").unwrap();
        assert!(text.starts_with("Rivers rise across the valley."));
        assert_eq!(extractor.fetcher().calls(), vec!["https://news.test/story"]);
    }

    #[test]
    fn fetch_failures_become_extraction_errors() {
        let fetcher = StaticFetcher::new().with_error("https://news.test/slow", FetchError::Timeout(10_000));
        let extractor = ContentExtractor::new(fetcher, &VideoConfig::default());

        let err = extractor.extract("https://news.test/slow").unwrap_err();
        assert!(matches!(err, Error::Extraction(FetchError::Timeout(10_000))));

        let err = extractor.extract("https://news.test/missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch news content: Request failed with status code 404"
        );
    }

    #[test]
    fn rejects_non_http_urls_without_fetching() {
        let extractor = extractor();
        for url in ["not a url", "file:///etc/passwd", "ftp://example.com/a"] {
            let err = extractor.extract(url).unwrap_err();
            assert!(matches!(err, Error::Extraction(FetchError::InvalidUrl { .. })), "{}", url);
        }
        assert!(extractor.fetcher().calls().is_empty());
    }
}
