use crate::model::{BoundingBox, DetectedTable, Line, TableCell, TableRow, Word};
use crate::options::ExtractOptions;
use crate::rows::group_line_refs;

/// Infers column start positions from the left edges of every word in a region.
///
/// Left edges are sorted and chained together while each one lies within
/// `column_gap` of the previous member; each chain collapses to its mean.
pub fn detect_column_positions(lines: &[&Line], column_gap: f32) -> Vec<f32> {
    let mut starts = lines
        .iter()
        .flat_map(|line| line.words.iter().map(|word| word.bbox.x0))
        .collect::<Vec<_>>();
    starts.sort_by(f32::total_cmp);

    let clusters = starts
        .into_iter()
        .fold(Vec::<Vec<f32>>::new(), |mut clusters, x0| {
            match clusters.last_mut() {
                Some(cluster) if cluster.last().is_some_and(|last| x0 - last < column_gap) => {
                    cluster.push(x0);
                }
                _ => clusters.push(vec![x0]),
            }
            clusters
        });

    clusters
        .iter()
        .map(|cluster| cluster.iter().sum::<f32>() / cluster.len() as f32)
        .collect()
}

/// Pairs each column start with the next one; the last column is open-ended.
fn column_bounds(columns: &[f32]) -> impl Iterator<Item = (f32, f32)> + '_ {
    columns.iter().enumerate().map(|(index, &start)| {
        let end = columns.get(index + 1).copied().unwrap_or(f32::INFINITY);
        (start, end)
    })
}

fn build_cell(
    words: &[&Word],
    row_index: usize,
    col_index: usize,
    (start, end): (f32, f32),
    left_bias: f32,
    right_edge: f32,
) -> TableCell {
    let matching = words
        .iter()
        .filter(|word| word.bbox.x0 >= start - left_bias && word.bbox.x0 < end - left_bias)
        .collect::<Vec<_>>();

    let Some(bbox) = BoundingBox::union_all(matching.iter().map(|word| &word.bbox)) else {
        // Placeholder spans the column horizontally and nothing vertically.
        let x1 = if end.is_finite() { end } else { right_edge.max(start) };
        return TableCell {
            text: String::new(),
            row_index,
            col_index,
            bbox: BoundingBox::new(start, 0.0, x1, 0.0),
            confidence: 0.0,
        };
    };

    let text = matching
        .iter()
        .map(|word| word.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let confidence =
        matching.iter().map(|word| word.confidence).sum::<f32>() / matching.len() as f32;

    TableCell {
        text,
        row_index,
        col_index,
        bbox,
        confidence,
    }
}

/// Materializes a table from a run of tabular-looking lines.
///
/// Returns `None` when the region has fewer than two lines or fewer than
/// `min_columns` inferred columns. Every row carries exactly one cell per
/// column; columns with no matching word get an empty zero-confidence cell.
pub fn construct_table_from_region(
    lines: &[&Line],
    page_number: u32,
    table_id: impl Into<String>,
    options: &ExtractOptions,
) -> Option<DetectedTable> {
    if lines.len() < 2 {
        return None;
    }

    let columns = detect_column_positions(lines, options.column_gap);
    if columns.len() < options.min_columns.max(2) {
        return None;
    }

    let bbox = BoundingBox::union_all(lines.iter().map(|line| &line.bbox))?;

    let rows = group_line_refs(lines, options.row_tolerance)
        .iter()
        .enumerate()
        .map(|(row_index, group)| {
            let mut words = group
                .iter()
                .flat_map(|line| line.words.iter())
                .collect::<Vec<_>>();
            words.sort_by(|left, right| left.bbox.x0.total_cmp(&right.bbox.x0));

            let cells = column_bounds(&columns)
                .enumerate()
                .map(|(col_index, bounds)| {
                    build_cell(
                        &words,
                        row_index,
                        col_index,
                        bounds,
                        options.column_left_bias,
                        bbox.x1,
                    )
                })
                .collect();

            TableRow { row_index, cells }
        })
        .collect::<Vec<_>>();

    Some(DetectedTable {
        id: table_id.into(),
        page_number,
        column_count: columns.len(),
        row_count: rows.len(),
        bbox,
        rows,
    })
}
