//! CSV flattening.

use crate::Result;
use csv::ReaderBuilder;

/// Flatten CSV content: fields joined by a space within a row, rows joined by a space.
///
/// The first row is data, not a header, and rows may differ in length.
///
/// ```rust
/// use flattext::extraction::csv::extract_csv_text;
///
/// let text = extract_csv_text(b"a,b\nc,d\n").unwrap();
/// assert_eq!(text, "a b c d");
/// ```
pub fn extract_csv_text(csv_bytes: &[u8]) -> Result<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().collect::<Vec<_>>().join(" "));
    }

    Ok(rows.join(" "))
}
