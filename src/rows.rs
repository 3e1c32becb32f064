use crate::model::Line;

/// Lines judged to sit on the same visual row, top edges ascending.
pub type RowGroup<'a> = Vec<&'a Line>;

/// Clusters lines into rows by the top edge of their boxes.
///
/// Lines are sorted by `bbox.y0` first. A line opens a new row when its top
/// edge is at least `tolerance` below the last line added to the current
/// row; chains of small steps therefore stay in one row.
pub fn group_lines_by_vertical_position(lines: &[Line], tolerance: f32) -> Vec<RowGroup<'_>> {
    group_line_refs(&lines.iter().collect::<Vec<_>>(), tolerance)
}

/// Same as [`group_lines_by_vertical_position`] for lines already held by reference.
pub fn group_line_refs<'a>(lines: &[&'a Line], tolerance: f32) -> Vec<RowGroup<'a>> {
    let mut sorted = lines.to_vec();
    sorted.sort_by(|left, right| left.bbox.y0.total_cmp(&right.bbox.y0));

    sorted.into_iter().fold(Vec::<RowGroup<'a>>::new(), |mut groups, line| {
        match groups.last_mut() {
            Some(current)
                if current
                    .last()
                    .is_some_and(|last: &&Line| (line.bbox.y0 - last.bbox.y0).abs() < tolerance) =>
            {
                current.push(line);
            }
            _ => groups.push(vec![line]),
        }
        groups
    })
}
