//! Excel (.xlsx) text extraction using `calamine`.
//!
//! Every sheet is walked in workbook order, row by row from cell A1 to the end
//! of the used range. Every cell position is stringified, including empty ones,
//! which become the literal token `None`.
//!
//! NOTE: the `None` token for blank cells is existing client-visible output.
//! Dropping it changes results for sparse sheets.

use crate::{FlattextError, Result};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;

/// Token emitted for cells that hold no value.
pub const EMPTY_CELL_TOKEN: &str = "None";

/// Extract all cell values from an .xlsx workbook, joined with single spaces.
pub fn extract_excel_text(xlsx_bytes: &[u8]) -> Result<String> {
    let mut workbook = Xlsx::new(Cursor::new(xlsx_bytes)).map_err(|e| match e {
        calamine::XlsxError::Io(io_err) => FlattextError::Io(io_err),
        other => FlattextError::parsing_with_source(format!("Failed to parse XLSX: {}", other), other),
    })?;

    let sheet_names = workbook.sheet_names();
    let mut cells = Vec::new();

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| FlattextError::parsing_with_source(format!("Failed to read sheet '{}': {}", name, e), e))?;
        push_sheet_cells(&range, &mut cells);
    }

    tracing::debug!(
        "Extracted {} cell(s) from {} sheet(s)",
        cells.len(),
        sheet_names.len()
    );

    Ok(cells.join(" "))
}

/// Append every cell of the sheet, from A1 through the end of its used range.
fn push_sheet_cells(range: &Range<Data>, cells: &mut Vec<String>) {
    let Some((last_row, last_col)) = range.end() else {
        return;
    };

    for row in 0..=last_row {
        for col in 0..=last_col {
            let value = range.get_value((row, col)).unwrap_or(&Data::Empty);
            cells.push(format_cell(value));
        }
    }
}

fn format_cell(data: &Data) -> String {
    match data {
        Data::Empty => EMPTY_CELL_TOKEN.to_string(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::Error(e) => e.to_string(),
    }
}
