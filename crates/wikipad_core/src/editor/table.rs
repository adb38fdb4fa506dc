//! Table fragment builder.

/// Markup of one empty cell, matching what the editor renders for a blank
/// paragraph.
pub const EMPTY_CELL_HTML: &str = "<td><p><br></p></td>";

/// Builds a `rows` x `cols` table of empty cells.
///
/// Returns `None` when either dimension is zero.
pub fn table_html(rows: usize, cols: usize) -> Option<String> {
    if rows == 0 || cols == 0 {
        return None;
    }

    let row = format!("<tr>{}</tr>", EMPTY_CELL_HTML.repeat(cols));
    Some(format!("<table><tbody>{}</tbody></table>", row.repeat(rows)))
}
