use scraper::{Html, Selector};

use crate::error::{IngestError, Result};

pub const DEFAULT_CONTENT_SELECTOR: &str = "div#content";

/// Text of the first element matching `selector`: one trimmed line per
/// non-blank text node, in document order.
pub fn extract_content(html: &str, selector: &str) -> Result<String> {
    let parsed = Selector::parse(selector)
        .map_err(|e| IngestError::Core(denning_core::Error::InvalidConfig(format!("invalid content selector {selector:?}: {e:?}"))))?;
    let document = Html::parse_document(html);
    let container = document
        .select(&parsed)
        .next()
        .ok_or_else(|| IngestError::ContentNotFound { selector: selector.to_string() })?;
    let text = container
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Theft Act 1968</title></head><body>
        <div id="nav">Skip to content</div>
        <div id="content">
            <h1>Theft Act 1968</h1>
            <p>  A person is guilty of theft if he
               dishonestly appropriates property. </p>
            <p>   </p>
            <ul><li>Section 1</li><li>Section 2</li></ul>
        </div>
        <footer>Crown copyright</footer>
    </body></html>"#;

    #[test]
    fn extracts_only_the_container_text() {
        let text = extract_content(PAGE, DEFAULT_CONTENT_SELECTOR).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Theft Act 1968");
        assert!(lines[1].starts_with("A person is guilty of theft"));
        assert_eq!(&lines[2..], &["Section 1", "Section 2"]);
        assert!(!text.contains("Skip to content"));
        assert!(!text.contains("Crown copyright"));
    }

    #[test]
    fn missing_container_is_reported() {
        let err = extract_content("<html><body><p>No content div</p></body></html>", DEFAULT_CONTENT_SELECTOR).unwrap_err();
        assert!(matches!(err, IngestError::ContentNotFound { .. }));
    }

    #[test]
    fn other_selectors_can_be_configured() {
        let text = extract_content(PAGE, "footer").unwrap();
        assert_eq!(text, "Crown copyright");
        assert!(matches!(extract_content(PAGE, "div[["), Err(IngestError::Core(_))));
    }
}
