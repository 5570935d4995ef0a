//! Input document loading.
//!
//! Local files are read as UTF-8 text, or through pdf-extract for `.pdf`.
//! URLs are fetched with reqwest and reduced to readable text with scraper.

use reqwest::Client;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying the fetcher
const USER_AGENT: &str = concat!("summa-digest/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocks shorter than this are treated as navigation noise
const MIN_BLOCK_CHARS: usize = 20;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract PDF text: {0}")]
    PdfError(String),
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no content found in {0}")]
    NoContent(String),
}

/// Where the input text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

/// Loaded input text
#[derive(Debug, Clone)]
pub struct Document {
    /// Path or URL the text came from
    pub origin: String,
    /// Page title or file name
    pub title: Option<String>,
    pub text: String,
}

impl Source {
    /// `http://` and `https://` inputs are URLs; anything else is a path
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Source::Url(input.to_string())
        } else {
            Source::File(PathBuf::from(input))
        }
    }

    /// Load the document; empty text is an error
    pub async fn load(&self) -> Result<Document, SourceError> {
        let document = match self {
            Source::File(path) => read_file(path).await?,
            Source::Url(url) => fetch_url(url).await?,
        };

        if document.text.trim().is_empty() {
            return Err(SourceError::NoContent(document.origin));
        }
        tracing::info!(origin = %document.origin, chars = document.text.len(), "loaded document");
        Ok(document)
    }
}

async fn read_file(path: &Path) -> Result<Document, SourceError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| SourceError::PdfError(e.to_string()))?
            .map_err(|e| SourceError::PdfError(e.to_string()))?
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::ReadError {
                path: path.to_path_buf(),
                source,
            })?
    };

    Ok(Document {
        origin: path.display().to_string(),
        title: path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned()),
        text,
    })
}

async fn fetch_url(url: &str) -> Result<Document, SourceError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let document = Html::parse_document(&html);

    Ok(Document {
        origin: url.to_string(),
        title: extract_title(&document),
        text: extract_text(&document),
    })
}

/// The page title from <title> or the first <h1>
fn extract_title(document: &Html) -> Option<String> {
    ["title", "h1"].into_iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        let element = document.select(&selector).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Readable text, preferring the main content area over the whole body
fn extract_text(document: &Html) -> String {
    for selector_str in ["article", "main", "[role='main']"] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = extract_blocks(&Html::parse_fragment(&element.html()));
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    extract_blocks(document)
}

/// Paragraph-like blocks separated by blank lines, so each ends a sentence
fn extract_blocks(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p, h1, h2, h3, h4, h5, h6, li") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|block| block.len() > MIN_BLOCK_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            Source::parse("https://example.com/a"),
            Source::Url("https://example.com/a".to_string())
        );
        assert_eq!(
            Source::parse("notes/input.txt"),
            Source::File(PathBuf::from("notes/input.txt"))
        );
    }

    #[tokio::test]
    async fn test_load_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "First sentence here. Second one.").unwrap();

        let document = Source::File(file.path().to_path_buf()).load().await.unwrap();
        assert_eq!(document.text, "First sentence here. Second one.");
        assert!(document.title.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = Source::parse("/definitely/not/here.txt").load().await.unwrap_err();
        assert!(matches!(err, SourceError::ReadError { .. }));
    }

    #[tokio::test]
    async fn test_blank_file_has_no_content() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Source::File(file.path().to_path_buf()).load().await.unwrap_err();
        assert!(matches!(err, SourceError::NoContent(_)));
    }

    #[test]
    fn test_extract_prefers_article_and_drops_short_blocks() {
        let html = r#"<html><head><title> Release Notes </title></head><body>
            <nav><li>Home</li></nav>
            <article>
              <h1>Version two is out today</h1>
              <p>The   scheduler was rewritten
                 to handle retries.</p>
              <p>Short.</p>
            </article></body></html>"#;
        let document = Html::parse_document(html);

        assert_eq!(extract_title(&document).as_deref(), Some("Release Notes"));
        assert_eq!(
            extract_text(&document),
            "Version two is out today\n\nThe scheduler was rewritten to handle retries."
        );
    }
}
