//! Spreadsheet roster parser.
//!
//! Reads the first worksheet of an uploaded workbook (xlsx, xlsm, xlsb, xls
//! or ods) and collects one employee id per row from column A.
//!
//! Rules:
//! - a row counts only if its column-A cell is numeric (integer, float or
//!   date/time serial, or a formula whose cached result is one of those);
//!   fractional values are truncated toward zero
//! - any other cell type, or a missing cell, skips the row silently
//! - the first occurrence of an id wins; later repeats are dropped

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use batchdesk_core::{DomainError, DomainResult, EmployeeId};

/// Column holding the employee id.
const ID_COLUMN: u32 = 0;

/// Parse an uploaded workbook into a deduplicated, ordered id list.
pub fn parse_roster(bytes: &[u8]) -> DomainResult<Vec<EmployeeId>> {
    if bytes.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DomainError::malformed(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(DomainError::malformed(e.to_string())),
        None => return Err(DomainError::NoRecordsFound),
    };

    let column = match (range.start(), range.end()) {
        (Some((first_row, _)), Some((last_row, _))) => (first_row..=last_row)
            .map(|row| range.get_value((row, ID_COLUMN)).and_then(numeric_id))
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    };

    let ids = dedup_first_seen(column.into_iter().flatten());
    if ids.is_empty() {
        return Err(DomainError::NoRecordsFound);
    }

    tracing::debug!(count = ids.len(), "parsed roster upload");
    Ok(ids)
}

fn numeric_id(cell: &Data) -> Option<EmployeeId> {
    let value = match cell {
        Data::Int(i) => return Some(EmployeeId::new(*i)),
        Data::Float(f) => *f,
        Data::DateTime(dt) => dt.as_f64(),
        _ => return None,
    };
    // `as` truncates toward zero.
    Some(EmployeeId::new(value as i64))
}

fn dedup_first_seen(ids: impl Iterator<Item = EmployeeId>) -> Vec<EmployeeId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Cell, SpreadsheetFixture, mock_level_workbook};

    fn ids(raw: &[i64]) -> Vec<EmployeeId> {
        raw.iter().copied().map(EmployeeId::new).collect()
    }

    #[test]
    fn keeps_first_occurrence_in_row_order() {
        let bytes = SpreadsheetFixture::new()
            .sheet(
                "Sheet1",
                vec![
                    vec![Cell::number(101.0), Cell::text("x")],
                    vec![Cell::number(102.0), Cell::text("y")],
                    vec![Cell::number(101.0), Cell::text("z")],
                ],
            )
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap(), ids(&[101, 102]));
    }

    #[test]
    fn zero_length_input_is_rejected() {
        assert_eq!(parse_roster(&[]).unwrap_err(), DomainError::EmptyInput);
    }

    #[test]
    fn garbage_bytes_are_malformed() {
        match parse_roster(b"employeeId\n101\n102\n") {
            Err(DomainError::MalformedInput(_)) => {}
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn text_only_first_column_yields_no_records() {
        let bytes = mock_level_workbook().unwrap().content;
        assert_eq!(parse_roster(&bytes).unwrap_err(), DomainError::NoRecordsFound);
    }

    #[test]
    fn skips_header_and_blank_rows() {
        let bytes = SpreadsheetFixture::new()
            .sheet(
                "Roster",
                vec![
                    vec![Cell::text("Employee Id"), Cell::text("Name")],
                    vec![Cell::number(7.0), Cell::text("Ada")],
                    vec![Cell::Blank, Cell::text("nobody")],
                    vec![Cell::number(8.0), Cell::text("Grace")],
                ],
            )
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap(), ids(&[7, 8]));
    }

    #[test]
    fn fractional_ids_are_truncated_not_rounded() {
        let bytes = SpreadsheetFixture::new()
            .sheet("Sheet1", vec![vec![Cell::number(101.9)], vec![Cell::number(-3.7)]])
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap(), ids(&[101, -3]));
    }

    #[test]
    fn numbers_outside_column_a_are_ignored() {
        let bytes = SpreadsheetFixture::new()
            .sheet("Sheet1", vec![vec![Cell::Blank, Cell::number(5.0)]])
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap_err(), DomainError::NoRecordsFound);
    }

    #[test]
    fn formula_cells_count_by_their_cached_value() {
        let bytes = SpreadsheetFixture::new()
            .sheet(
                "Sheet1",
                vec![
                    vec![Cell::number(7.0)],
                    vec![Cell::formula("=A1+1", "8")],
                ],
            )
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap(), ids(&[7, 8]));
    }

    #[test]
    fn only_first_sheet_is_read() {
        let bytes = SpreadsheetFixture::new()
            .sheet("First", vec![vec![Cell::number(1.0)]])
            .sheet("Second", vec![vec![Cell::number(2.0)]])
            .to_bytes()
            .unwrap();

        assert_eq!(parse_roster(&bytes).unwrap(), ids(&[1]));
    }
}
