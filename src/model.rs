use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel space. `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of all boxes, `None` when the iterator is empty.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<Self>, bbox| {
                Some(acc.map_or(*bbox, |current| current.union(bbox)))
            })
    }
}

/// A single token produced by the recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    #[serde(default)]
    pub baseline: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// Recognition output for one page, as handed over by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page_number: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,
    pub row_index: usize,
    pub col_index: usize,
    pub bbox: BoundingBox,
    pub confidence: f32,
}

impl TableCell {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub row_index: usize,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTable {
    pub id: String,
    pub page_number: u32,
    pub column_count: usize,
    pub row_count: usize,
    pub bbox: BoundingBox,
    pub rows: Vec<TableRow>,
}

impl DetectedTable {
    /// Cell text laid out as a `row_count` x `column_count` grid.
    ///
    /// Cells are placed by `col_index`, so rows thinned out by confidence
    /// filtering still come back rectangular with empty strings in the gaps.
    #[must_use]
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        let mut grid = vec![vec![String::new(); self.column_count]; self.row_count];
        for row in &self.rows {
            let Some(grid_row) = grid.get_mut(row.row_index) else {
                continue;
            };
            for cell in &row.cells {
                if let Some(slot) = grid_row.get_mut(cell.col_index) {
                    slot.clone_from(&cell.text);
                }
            }
        }
        grid
    }

    /// Mean confidence over non-empty cells, 0 when the table has none.
    #[must_use]
    pub fn mean_confidence(&self) -> f32 {
        let (sum, count) = self
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| !cell.is_empty())
            .fold((0.0_f32, 0_usize), |(sum, count), cell| {
                (sum + cell.confidence, count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValuePair {
    pub id: String,
    pub key: String,
    pub value: String,
    pub page_number: u32,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Everything one extraction run derives from a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub tables: Vec<DetectedTable>,
    pub key_value_pairs: Vec<KeyValuePair>,
    pub all_text: String,
    pub page_texts: BTreeMap<u32, String>,
}

impl ExtractedData {
    /// Number of exportable artifacts: each table, plus the key-value list as one.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.tables.len() + usize::from(!self.key_value_pairs.is_empty())
    }
}
