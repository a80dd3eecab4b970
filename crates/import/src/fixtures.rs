//! Builds small `.xlsx` workbooks in memory so tests never touch disk.

use rust_xlsxwriter::{Formula, Workbook, XlsxError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One cell of a fixture row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    /// A formula with its cached result, as saved by a spreadsheet app.
    Formula { formula: String, result: String },
    /// Leave the cell unwritten.
    Blank,
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn formula(formula: impl Into<String>, result: impl Into<String>) -> Self {
        Self::Formula {
            formula: formula.into(),
            result: result.into(),
        }
    }
}

/// A fake multipart file part: field name, file name, content type, bytes.
#[derive(Debug, Clone)]
pub struct MockUpload {
    pub field_name: &'static str,
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct SpreadsheetFixture {
    sheets: Vec<(String, Vec<Vec<Cell>>)>,
}

impl SpreadsheetFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        self.sheets.push((name.into(), rows));
        self
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        for (name, rows) in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;

            for (r, row) in rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    let (r, c) = (r as u32, c as u16);
                    match cell {
                        Cell::Number(v) => {
                            worksheet.write_number(r, c, *v)?;
                        }
                        Cell::Text(s) => {
                            worksheet.write_string(r, c, s)?;
                        }
                        Cell::Formula { formula, result } => {
                            worksheet.write_formula(r, c, Formula::new(formula).set_result(result))?;
                        }
                        Cell::Blank => {}
                    }
                }
            }
        }

        workbook.save_to_buffer()
    }

    pub fn to_upload(&self) -> Result<MockUpload, XlsxError> {
        Ok(MockUpload {
            field_name: "file",
            file_name: "mock_excel.xlsx",
            content_type: XLSX_CONTENT_TYPE,
            content: self.to_bytes()?,
        })
    }
}

/// Single-sheet workbook with one id per row in column A.
pub fn roster_workbook(ids: &[i64]) -> Result<MockUpload, XlsxError> {
    let rows = ids
        .iter()
        .map(|id| vec![Cell::number(*id as f64), Cell::text(format!("trainee-{id}"))])
        .collect();
    SpreadsheetFixture::new().sheet("Sheet1", rows).to_upload()
}

/// The canonical text-only workbook: a `Level | BASIC` header and two data rows.
pub fn mock_level_workbook() -> Result<MockUpload, XlsxError> {
    SpreadsheetFixture::new()
        .sheet(
            "Sheet1",
            vec![
                vec![Cell::text("Level"), Cell::text("BASIC")],
                vec![Cell::text("Data1"), Cell::text("Data1Desc")],
                vec![Cell::text("Data2"), Cell::text("Data2Desc")],
            ],
        )
        .to_upload()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_zip_container() {
        let upload = roster_workbook(&[1, 2]).unwrap();
        assert_eq!(&upload.content[..2], b"PK");
        assert_eq!(upload.content_type, XLSX_CONTENT_TYPE);
        assert_eq!(upload.file_name, "mock_excel.xlsx");
    }
}
