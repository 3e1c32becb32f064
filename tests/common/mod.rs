#![allow(dead_code)]

use ocr_structure::{BoundingBox, Line, PageResult, Word};

pub const WORD_WIDTH: f32 = 40.0;
pub const WORD_HEIGHT: f32 = 14.0;

pub fn word(text: &str, x0: f32, y0: f32, confidence: f32) -> Word {
    Word {
        text: text.to_string(),
        confidence,
        bbox: BoundingBox::new(x0, y0, x0 + WORD_WIDTH, y0 + WORD_HEIGHT),
        baseline: BoundingBox::new(
            x0,
            y0 + WORD_HEIGHT - 2.0,
            x0 + WORD_WIDTH,
            y0 + WORD_HEIGHT - 2.0,
        ),
    }
}

/// One OCR line at `y0` holding `(text, x0)` words, all at `confidence`.
pub fn line_with_confidence(y0: f32, words: &[(&str, f32)], confidence: f32) -> Line {
    let words = words
        .iter()
        .map(|(text, x0)| word(text, *x0, y0, confidence))
        .collect::<Vec<_>>();
    let bbox = BoundingBox::union_all(words.iter().map(|word| &word.bbox))
        .unwrap_or(BoundingBox::new(0.0, y0, 0.0, y0 + WORD_HEIGHT));
    Line {
        text: words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        confidence,
        bbox,
        words,
    }
}

pub fn line(y0: f32, words: &[(&str, f32)]) -> Line {
    line_with_confidence(y0, words, 90.0)
}

pub fn page(page_number: u32, lines: Vec<Line>) -> PageResult {
    let text = lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    PageResult {
        page_number,
        text,
        confidence: 90.0,
        words: lines.iter().flat_map(|line| line.words.clone()).collect(),
        lines,
    }
}

/// Four rows of three columns near x = 10, 120, 230 with a few pixels of jitter.
pub fn invoice_table_lines(top: f32) -> Vec<Line> {
    vec![
        line(top, &[("Item", 10.0), ("Qty", 120.0), ("Price", 230.0)]),
        line(top + 30.0, &[("Pen", 13.0), ("3", 118.0), ("1.50", 234.0)]),
        line(top + 60.0, &[("Ink", 7.0), ("1", 124.0), ("9.90", 227.0)]),
        line(top + 90.0, &[("Pad", 15.0), ("2", 116.0), ("4.00", 232.0)]),
    ]
}

pub fn pages_json(pages: &[PageResult]) -> String {
    serde_json::to_string_pretty(pages).expect("fixture pages should serialize")
}
