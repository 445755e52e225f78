use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to parse paragraph selector")
});

/// Text of every `<p>` element in document order, trimmed; blank ones dropped.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);

    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Case-insensitive whole-word pattern for a literal keyword.
pub fn keyword_pattern(keyword: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).ok()
}

/// First paragraph containing both keywords as whole words.
pub fn find_paragraph(html: &str, primary: &str, secondary: &str) -> Option<String> {
    let primary_re = keyword_pattern(primary)?;
    let secondary_re = keyword_pattern(secondary)?;

    let found = extract_paragraphs(html)
        .into_iter()
        .find(|text| primary_re.is_match(text) && secondary_re.is_match(text));

    if found.is_none() {
        tracing::debug!(primary, secondary, "no paragraph mentions both keywords");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <p class="mw-empty-elt">
        </p>
        <p>The <b>cat</b> is a small domesticated carnivorous mammal.</p>
        <h2>Commerce</h2>
        <p>A pet catalog lists many breeds of Cat food.</p>
        <p>Cats and the domestic CAT share a FOOD bowl.</p>
    "#;

    #[test]
    fn extracts_non_empty_paragraphs_in_order() {
        let paragraphs = extract_paragraphs(ARTICLE);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0], "The cat is a small domesticated carnivorous mammal.");
    }

    #[test]
    fn matches_whole_words_case_insensitively() {
        let text = find_paragraph(ARTICLE, "cat", "mammal").unwrap();
        assert_eq!(text, "The cat is a small domesticated carnivorous mammal.");

        let text = find_paragraph(ARTICLE, "CAT", "food").unwrap();
        assert_eq!(text, "A pet catalog lists many breeds of Cat food.");
    }

    #[test]
    fn substring_inside_a_word_does_not_match() {
        let html = "<p>The catalog is printed yearly.</p>";
        assert_eq!(find_paragraph(html, "cat", "yearly"), None);
        assert_eq!(find_paragraph(html, "catalog", "yearly").as_deref(), Some("The catalog is printed yearly."));
    }

    #[test]
    fn absent_when_secondary_is_missing() {
        assert_eq!(find_paragraph(ARTICLE, "cat", "zebra"), None);
    }

    #[test]
    fn keywords_are_literal_not_patterns() {
        let html = "<p>Version 1.5 of the tool shipped.</p><p>Version 1x5 is fake.</p>";
        assert_eq!(find_paragraph(html, "1.5", "tool").as_deref(), Some("Version 1.5 of the tool shipped."));
        assert_eq!(find_paragraph(html, "1.5", "fake"), None);
    }
}
