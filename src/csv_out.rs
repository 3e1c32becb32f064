use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};

use crate::error::ExtractError;
use crate::model::{DetectedTable, ExtractedData, KeyValuePair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

fn records_to_string<I, R>(records: I) -> Result<String, ExtractError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::<u8>::new());
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Table cells by row, columns ordered by `col_index`.
pub fn table_to_csv(table: &DetectedTable) -> Result<String, ExtractError> {
    records_to_string(table.text_grid())
}

fn key_value_records(pairs: &[KeyValuePair]) -> Vec<Vec<String>> {
    let header = vec![
        "Key".to_string(),
        "Value".to_string(),
        "Page".to_string(),
        "Confidence".to_string(),
    ];
    let rows = pairs.iter().map(|pair| {
        vec![
            pair.key.clone(),
            pair.value.clone(),
            pair.page_number.to_string(),
            format!("{:.1}", pair.confidence),
        ]
    });
    std::iter::once(header).chain(rows).collect()
}

pub fn key_values_to_csv(pairs: &[KeyValuePair]) -> Result<String, ExtractError> {
    records_to_string(key_value_records(pairs))
}

/// Non-empty trimmed transcript lines, one per row.
fn transcript_lines(all_text: &str) -> Vec<Vec<String>> {
    all_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| vec![line.to_string()])
        .collect()
}

/// Names one file per table, suffixing repeats on the same page with `_2`, `_3`, ...
fn table_file_names(name: &str, tables: &[DetectedTable]) -> Vec<String> {
    let mut seen: HashMap<u32, usize> = HashMap::new();
    tables
        .iter()
        .map(|table| {
            let count = seen.entry(table.page_number).or_insert(0);
            *count += 1;
            if *count == 1 {
                format!("{name}_Table_Page{}.csv", table.page_number)
            } else {
                format!("{name}_Table_Page{}_{count}.csv", table.page_number)
            }
        })
        .collect()
}

/// Builds the CSV files for an extraction result without touching the disk.
///
/// With more than one artifact every table gets its own file and the
/// key-value pairs get `{name}_KeyValuePairs.csv`. Otherwise a single
/// combined `{name}_extracted.csv` holds the lone table grid or the
/// key-value rows, followed by a `Text` section with the transcript lines.
pub fn csv_exports(data: &ExtractedData, name: &str) -> Result<Vec<CsvExport>, ExtractError> {
    if data.artifact_count() > 1 {
        let mut exports = Vec::new();
        for (table, file_name) in data
            .tables
            .iter()
            .zip(table_file_names(name, &data.tables))
        {
            exports.push(CsvExport {
                file_name,
                contents: table_to_csv(table)?,
            });
        }
        if !data.key_value_pairs.is_empty() {
            exports.push(CsvExport {
                file_name: format!("{name}_KeyValuePairs.csv"),
                contents: key_values_to_csv(&data.key_value_pairs)?,
            });
        }
        return Ok(exports);
    }

    let mut records = Vec::new();
    if let Some(table) = data.tables.first() {
        records.extend(table.text_grid());
    }
    if !data.key_value_pairs.is_empty() {
        records.extend(key_value_records(&data.key_value_pairs));
    }
    let transcript = transcript_lines(&data.all_text);
    if !transcript.is_empty() || records.is_empty() {
        records.push(vec!["Text".to_string()]);
        records.extend(transcript);
    }
    let contents = records_to_string(records)?;

    Ok(vec![CsvExport {
        file_name: format!("{name}_extracted.csv"),
        contents,
    }])
}

pub fn write_csv_exports(
    dir: &Path,
    data: &ExtractedData,
    name: &str,
) -> Result<Vec<PathBuf>, ExtractError> {
    std::fs::create_dir_all(dir)?;
    csv_exports(data, name)?
        .into_iter()
        .map(|export| {
            let path = dir.join(&export.file_name);
            std::fs::write(&path, export.contents)?;
            Ok::<_, ExtractError>(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{csv_exports, key_values_to_csv, table_file_names, table_to_csv};
    use crate::model::{
        BoundingBox, DetectedTable, ExtractedData, KeyValuePair, TableCell, TableRow,
    };

    fn table(id: &str, page_number: u32, grid: &[&[&str]]) -> DetectedTable {
        let rows = grid
            .iter()
            .enumerate()
            .map(|(row_index, cells)| TableRow {
                row_index,
                cells: cells
                    .iter()
                    .enumerate()
                    .map(|(col_index, text)| TableCell {
                        text: (*text).to_string(),
                        row_index,
                        col_index,
                        bbox: BoundingBox::default(),
                        confidence: 90.0,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        DetectedTable {
            id: id.to_string(),
            page_number,
            column_count: grid.first().map_or(0, |row| row.len()),
            row_count: rows.len(),
            bbox: BoundingBox::default(),
            rows,
        }
    }

    fn pair(key: &str, value: &str) -> KeyValuePair {
        KeyValuePair {
            id: "kv-0".to_string(),
            key: key.to_string(),
            value: value.to_string(),
            page_number: 1,
            confidence: 92.0,
            bbox: BoundingBox::default(),
        }
    }

    #[test]
    fn single_table_goes_to_one_combined_file() {
        let data = ExtractedData {
            tables: vec![table("table-0", 1, &[&["Name", "Qty"], &["Pen, blue", "3"]])],
            ..ExtractedData::default()
        };

        let exports = csv_exports(&data, "scan").expect("csv should build");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].file_name, "scan_extracted.csv");
        assert_eq!(exports[0].contents, "Name,Qty\n\"Pen, blue\",3\n");
    }

    #[test]
    fn multiple_artifacts_get_their_own_files() {
        let data = ExtractedData {
            tables: vec![
                table("table-0", 1, &[&["a", "b"]]),
                table("table-1", 1, &[&["c", "d"]]),
                table("table-2", 3, &[&["e", "f"]]),
            ],
            key_value_pairs: vec![pair("Name", "Alice")],
            ..ExtractedData::default()
        };

        let names = csv_exports(&data, "doc")
            .expect("csv should build")
            .into_iter()
            .map(|export| export.file_name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "doc_Table_Page1.csv",
                "doc_Table_Page1_2.csv",
                "doc_Table_Page3.csv",
                "doc_KeyValuePairs.csv",
            ]
        );
        assert_eq!(table_file_names("doc", &data.tables).len(), 3);
    }

    #[test]
    fn key_value_csv_has_header_and_rounded_confidence() {
        let csv = key_values_to_csv(&[pair("Name", "Alice")]).expect("csv should build");
        assert_eq!(csv, "Key,Value,Page,Confidence\nName,Alice,1,92.0\n");
    }

    #[test]
    fn single_table_file_keeps_transcript_after_grid() {
        let data = ExtractedData {
            tables: vec![table("table-0", 1, &[&["Item", "Qty"], &["Pen", "3"]])],
            all_text: "Dear customer\nItem Qty\nPen 3".to_string(),
            ..ExtractedData::default()
        };

        let exports = csv_exports(&data, "scan").expect("csv should build");
        assert_eq!(exports.len(), 1);
        assert_eq!(
            exports[0].contents,
            "Item,Qty\nPen,3\nText\nDear customer\nItem Qty\nPen 3\n"
        );
    }

    #[test]
    fn lone_key_values_are_followed_by_transcript() {
        let data = ExtractedData {
            key_value_pairs: vec![pair("Name", "Alice")],
            all_text: "Name: Alice".to_string(),
            ..ExtractedData::default()
        };

        let exports = csv_exports(&data, "form").expect("csv should build");
        assert_eq!(
            exports[0].contents,
            "Key,Value,Page,Confidence\nName,Alice,1,92.0\nText\nName: Alice\n"
        );
    }

    #[test]
    fn non_ascii_cells_survive_unchanged() {
        let csv = table_to_csv(&table("table-0", 1, &[&["Größe", "東京"], &["ø", "€5"]]))
            .expect("csv should build");
        assert_eq!(csv, "Größe,東京\nø,€5\n");
    }

    #[test]
    fn transcript_fallback_when_nothing_structured() {
        let data = ExtractedData {
            all_text: "first line\n\n  second line  ".to_string(),
            ..ExtractedData::default()
        };

        let exports = csv_exports(&data, "empty").expect("csv should build");
        assert_eq!(exports[0].contents, "Text\nfirst line\nsecond line\n");
    }
}
