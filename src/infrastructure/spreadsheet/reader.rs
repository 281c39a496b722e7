//! Decode an uploaded client workbook.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto_from_rs};
use chrono::Datelike;

use crate::domain::sheet::{CellValue, ClientWorkbook, SheetRow, sheet_names};

use super::SpreadsheetError;

/// Reads the four data sheets of a client import workbook from memory.
///
/// Any format calamine detects is accepted (xlsx, xlsm, xlsb, xls, ods). The
/// first row of each sheet holds the headers. Fully blank rows are dropped.
/// Missing auxiliary sheets read as empty.
///
/// # Errors
///
/// - [`SpreadsheetError::Unreadable`] if the bytes are not a workbook
/// - [`SpreadsheetError::MissingSheet`] if `Client Information` is absent
pub fn read_client_workbook(bytes: &[u8]) -> Result<ClientWorkbook, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SpreadsheetError::Unreadable(e.to_string()))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|n| n == sheet_names::CLIENT_INFORMATION) {
        return Err(SpreadsheetError::MissingSheet(
            sheet_names::CLIENT_INFORMATION.to_string(),
        ));
    }

    Ok(ClientWorkbook {
        clients: read_sheet(&mut workbook, &available, sheet_names::CLIENT_INFORMATION)?,
        workspaces: read_sheet(&mut workbook, &available, sheet_names::GOOGLE_WORKSPACE)?,
        email_accounts: read_sheet(&mut workbook, &available, sheet_names::EMAIL_ACCOUNTS)?,
        additional_services: read_sheet(
            &mut workbook,
            &available,
            sheet_names::ADDITIONAL_SERVICES,
        )?,
    })
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    available: &[String],
    name: &str,
) -> Result<Vec<SheetRow>, SpreadsheetError> {
    if !available.iter().any(|n| n == name) {
        return Ok(Vec::new());
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| SpreadsheetError::Unreadable(format!("sheet '{name}': {e}")))?;

    Ok(rows_from_range(&range))
}

/// Converts a sheet range into header-keyed rows.
fn rows_from_range(range: &Range<Data>) -> Vec<SheetRow> {
    // calamine ranges start at the first used cell, not necessarily A1
    let first_row = range.start().map_or(0, |(row, _)| row);

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let text = cell.to_string();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect();

    rows.enumerate()
        .filter_map(|(idx, cells)| {
            // header is data-row 0, so the first data row sits one below it
            let row_number = first_row + idx as u32 + 2;
            let mut values = HashMap::new();

            for (col, cell) in cells.iter().enumerate() {
                let Some(Some(header)) = headers.get(col) else {
                    continue;
                };
                let value = to_cell_value(cell);
                if !value.is_blank() {
                    values.insert(header.clone(), value);
                }
            }

            (!values.is_empty()).then_some(SheetRow {
                row_number,
                cells: values,
            })
        })
        .collect()
}

fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => date_cell(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Resolves a date cell against the workbook's own date system (1900 or 1904).
///
/// Dates before 1900-03-01 only exist in the 1900 system. They keep the raw
/// serial so the normalizer applies the phantom leap-day rule to them.
fn date_cell(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return CellValue::Number(dt.as_f64());
    }

    match dt.as_datetime().map(|parsed| parsed.date()) {
        Some(date) if date.year() > 1900 || (date.year() == 1900 && date.month() >= 3) => {
            CellValue::Date(date)
        }
        _ => CellValue::DateSerial(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::{client_cols, email_cols};
    use crate::utils::cell_normalizer::normalize_date;
    use calamine::ExcelDateTimeType;
    use chrono::NaiveDate;
    use rust_xlsxwriter::{Format, Workbook};
    use std::io::Write;

    fn workbook_bytes(build: impl FnOnce(&mut Workbook)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(&mut workbook);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_rows_by_header() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::CLIENT_INFORMATION).unwrap();
            ws.write_string(0, 0, client_cols::CLIENT_NAME).unwrap();
            ws.write_string(0, 1, client_cols::DOMAIN_NAME).unwrap();
            ws.write_string(1, 0, "Acme Inc").unwrap();
            ws.write_string(1, 1, "acme.com").unwrap();
            ws.write_string(2, 0, "Beta LLC").unwrap();
        });

        let workbook = read_client_workbook(&bytes).unwrap();

        assert_eq!(workbook.clients.len(), 2);
        assert_eq!(workbook.clients[0].row_number, 2);
        assert_eq!(workbook.clients[0].text(client_cols::CLIENT_NAME), "Acme Inc");
        assert_eq!(workbook.clients[0].text(client_cols::DOMAIN_NAME), "acme.com");
        assert_eq!(workbook.clients[1].row_number, 3);
        assert!(workbook.clients[1].is_blank(client_cols::DOMAIN_NAME));
        assert!(workbook.workspaces.is_empty());
        assert!(workbook.email_accounts.is_empty());
        assert!(workbook.additional_services.is_empty());
    }

    #[test]
    fn test_missing_primary_sheet() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::EMAIL_ACCOUNTS).unwrap();
            ws.write_string(0, 0, email_cols::CLIENT_NAME).unwrap();
        });

        let err = read_client_workbook(&bytes).unwrap_err();
        assert!(
            matches!(err, SpreadsheetError::MissingSheet(ref s) if s == sheet_names::CLIENT_INFORMATION)
        );
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = read_client_workbook(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, SpreadsheetError::Unreadable(_)));
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::CLIENT_INFORMATION).unwrap();
            ws.write_string(0, 0, client_cols::CLIENT_NAME).unwrap();
            ws.write_string(1, 0, "Acme Inc").unwrap();
            ws.write_string(2, 0, "").unwrap();
            ws.write_string(3, 0, "Beta LLC").unwrap();
        });

        let workbook = read_client_workbook(&bytes).unwrap();
        let rows: Vec<u32> = workbook.clients.iter().map(|r| r.row_number).collect();
        assert_eq!(rows, vec![2, 4]);
    }

    #[test]
    fn test_numbers_and_dates_are_typed() {
        let bytes = workbook_bytes(|wb| {
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::CLIENT_INFORMATION).unwrap();
            ws.write_string(0, 0, client_cols::CLIENT_NAME).unwrap();
            ws.write_string(0, 1, client_cols::DOMAIN_EXPIRY_DATE).unwrap();
            ws.write_string(0, 2, client_cols::CONTACT_PHONE).unwrap();
            ws.write_string(1, 0, "Acme Inc").unwrap();
            ws.write_number_with_format(1, 1, 45658.0, &date_format)
                .unwrap();
            ws.write_number(1, 2, 5550100.0).unwrap();
        });

        let workbook = read_client_workbook(&bytes).unwrap();
        let row = &workbook.clients[0];

        assert_eq!(
            row.get(client_cols::DOMAIN_EXPIRY_DATE),
            &CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(row.get(client_cols::CONTACT_PHONE), &CellValue::Number(5550100.0));
        assert_eq!(row.text(client_cols::CONTACT_PHONE), "5550100");
    }

    #[test]
    fn test_header_whitespace_is_ignored() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::CLIENT_INFORMATION).unwrap();
            ws.write_string(0, 0, " Client Name* ").unwrap();
            ws.write_string(1, 0, "Acme Inc").unwrap();
        });

        let workbook = read_client_workbook(&bytes).unwrap();
        assert_eq!(workbook.clients[0].text(client_cols::CLIENT_NAME), "Acme Inc");
    }

    /// Rewrites a generated xlsx so that it uses the 1904 date system.
    fn with_1904_dates(bytes: Vec<u8>) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let name = entry.name().to_string();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();

            if name == "xl/workbook.xml" {
                content = String::from_utf8(content)
                    .unwrap()
                    .replace("<workbookPr ", "<workbookPr date1904=\"1\" ")
                    .into_bytes();
            }

            writer
                .start_file(name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(&content).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_1904_workbook_dates() {
        let bytes = workbook_bytes(|wb| {
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let ws = wb.add_worksheet();
            ws.set_name(sheet_names::CLIENT_INFORMATION).unwrap();
            ws.write_string(0, 0, client_cols::CLIENT_NAME).unwrap();
            ws.write_string(0, 1, client_cols::DOMAIN_EXPIRY_DATE).unwrap();
            ws.write_string(1, 0, "Acme Inc").unwrap();
            // 2025-01-01 counted from 1904-01-01
            ws.write_number_with_format(1, 1, 44196.0, &date_format)
                .unwrap();
        });

        let workbook = read_client_workbook(&with_1904_dates(bytes)).unwrap();
        let expiry = workbook.clients[0].get(client_cols::DOMAIN_EXPIRY_DATE);

        assert_eq!(
            normalize_date(expiry),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_date_cell_systems() {
        let in_1904 = ExcelDateTime::new(44196.0, ExcelDateTimeType::DateTime, true);
        let in_1900 = ExcelDateTime::new(45658.0, ExcelDateTimeType::DateTime, false);
        let jan_2025 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(date_cell(&in_1904), CellValue::Date(jan_2025));
        assert_eq!(date_cell(&in_1900), CellValue::Date(jan_2025));
    }

    #[test]
    fn test_leap_bug_range_keeps_serial() {
        let serial_60 = ExcelDateTime::new(60.0, ExcelDateTimeType::DateTime, false);
        let serial_61 = ExcelDateTime::new(61.0, ExcelDateTimeType::DateTime, false);
        let march_first = NaiveDate::from_ymd_opt(1900, 3, 1).unwrap();

        assert_eq!(date_cell(&serial_60), CellValue::DateSerial(60.0));
        assert_eq!(normalize_date(&date_cell(&serial_60)), Some(march_first));
        assert_eq!(normalize_date(&date_cell(&serial_61)), Some(march_first));
    }
}
