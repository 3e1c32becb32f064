use std::sync::LazyLock;

use regex::Regex;

use crate::model::{KeyValuePair, PageResult};

/// Label/value shapes in priority order: colon, dash, equals.
static KEY_VALUE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^([\p{L}\s]+):\s*(.+)$").expect("hardcoded colon pattern is valid"),
        Regex::new(r"^([\p{L}\s]+)\s*[-–]\s*(.+)$").expect("hardcoded dash pattern is valid"),
        Regex::new(r"^([\p{L}\s]+)=\s*(.+)$").expect("hardcoded equals pattern is valid"),
    ]
});

/// Splits a line into `(key, value)` using the first pattern that matches.
pub fn parse_key_value(text: &str) -> Option<(String, String)> {
    let trimmed = text.trim();
    KEY_VALUE_PATTERNS.iter().find_map(|pattern| {
        let captures = pattern.captures(trimmed)?;
        let key = captures.get(1)?.as_str().trim();
        let value = captures.get(2)?.as_str().trim();
        if key.is_empty() || value.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    })
}

/// Scans every line of every page, in encounter order, for label/value lines.
///
/// Runs independently of table detection, so a table row may also show up
/// here. Confidence and box are the whole line's. Ids are `kv-0`, `kv-1`,
/// ... in emission order.
pub fn detect_key_value_pairs<'a>(
    pages: impl IntoIterator<Item = &'a PageResult>,
) -> Vec<KeyValuePair> {
    let mut pairs = Vec::new();
    for page in pages {
        for line in &page.lines {
            let Some((key, value)) = parse_key_value(&line.text) else {
                continue;
            };
            pairs.push(KeyValuePair {
                id: format!("kv-{}", pairs.len()),
                key,
                value,
                page_number: page.page_number,
                confidence: line.confidence,
                bbox: line.bbox,
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::{detect_key_value_pairs, parse_key_value};
    use crate::model::{BoundingBox, Line, PageResult};

    fn kv(key: &str, value: &str) -> Option<(String, String)> {
        Some((key.to_string(), value.to_string()))
    }

    fn text_line(text: &str, confidence: f32) -> Line {
        Line {
            text: text.to_string(),
            confidence,
            bbox: BoundingBox::new(5.0, 5.0, 200.0, 20.0),
            words: Vec::new(),
        }
    }

    #[test]
    fn parses_each_separator() {
        assert_eq!(parse_key_value("Name: Alice"), kv("Name", "Alice"));
        assert_eq!(
            parse_key_value("Due Date - 2024-01-31"),
            kv("Due Date", "2024-01-31")
        );
        assert_eq!(parse_key_value("Status – paid"), kv("Status", "paid"));
        assert_eq!(parse_key_value("Rate = 4.5%"), kv("Rate", "4.5%"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            parse_key_value("   Invoice Number :   A-17  "),
            kv("Invoice Number", "A-17")
        );
    }

    #[test]
    fn colon_wins_over_later_patterns() {
        assert_eq!(parse_key_value("Note: a = b"), kv("Note", "a = b"));
        assert_eq!(parse_key_value("Range - 1: 2"), kv("Range", "1: 2"));
    }

    #[test]
    fn falls_through_to_equals_when_key_has_other_symbols() {
        assert_eq!(parse_key_value("Ratio = a: b"), kv("Ratio", "a: b"));
    }

    #[test]
    fn rejects_non_matching_lines() {
        assert_eq!(parse_key_value("Plain sentence without separator"), None);
        assert_eq!(parse_key_value("Item 42: x"), None);
        assert_eq!(parse_key_value("Name:"), None);
        assert_eq!(parse_key_value(""), None);
    }

    #[test]
    fn copies_line_confidence_and_box_and_numbers_in_order() {
        let pages = vec![
            PageResult {
                page_number: 1,
                text: String::new(),
                confidence: 90.0,
                lines: vec![
                    text_line("Name: Alice", 92.0),
                    text_line("no pair here", 80.0),
                    text_line("City - Oslo", 75.0),
                ],
                words: Vec::new(),
            },
            PageResult {
                page_number: 2,
                text: String::new(),
                confidence: 90.0,
                lines: vec![text_line("Total = 42", 60.0)],
                words: Vec::new(),
            },
        ];

        let pairs = detect_key_value_pairs(&pages);
        let summary = pairs
            .iter()
            .map(|pair| (pair.id.as_str(), pair.key.as_str(), pair.page_number))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![("kv-0", "Name", 1), ("kv-1", "City", 1), ("kv-2", "Total", 2)]
        );
        assert_eq!(pairs[0].confidence, 92.0);
        assert_eq!(pairs[0].bbox, BoundingBox::new(5.0, 5.0, 200.0, 20.0));
    }
}
