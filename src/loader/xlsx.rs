//! Reads transactions from Excel workbooks with calamine.

use std::{fmt::Display, io::Cursor};

use calamine::{Data, Range, Reader, Xls, Xlsx};

use crate::{
    Error,
    loader::{ColumnIndices, RawCell, TableBuilder},
    transaction::TransactionTable,
};

/// The worksheet read when a workbook has more than one sheet.
const PREFERRED_SHEET: &str = "Sheet1";

pub(super) fn read_xlsx(file_name: &str, bytes: &[u8]) -> Result<TransactionTable, Error> {
    read_workbook::<Xlsx<_>>(file_name, bytes)
}

pub(super) fn read_xls(file_name: &str, bytes: &[u8]) -> Result<TransactionTable, Error> {
    read_workbook::<Xls<_>>(file_name, bytes)
}

fn read_workbook<'a, R>(file_name: &str, bytes: &'a [u8]) -> Result<TransactionTable, Error>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    let mut workbook = R::new(Cursor::new(bytes))
        .inspect_err(|error| tracing::debug!("Could not open workbook '{file_name}': {error}"))
        .map_err(|error| Error::InvalidSpreadsheet(error.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|name| name.as_str() == PREFERRED_SHEET)
        .or_else(|| sheet_names.first())
        .ok_or(Error::NoWorksheet)?;

    tracing::debug!("Reading worksheet '{sheet_name}' of '{file_name}'");

    let range = workbook
        .worksheet_range(sheet_name)
        .inspect_err(|error| tracing::debug!("Could not read worksheet '{sheet_name}': {error}"))
        .map_err(|error| Error::InvalidSpreadsheet(error.to_string()))?;

    read_range(file_name, &range)
}

fn read_range(file_name: &str, range: &Range<Data>) -> Result<TransactionTable, Error> {
    let mut rows = range.rows();

    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    let columns = ColumnIndices::find(header.iter().map(String::as_str))?;

    let mut builder = TableBuilder::new();

    for (index, row) in rows.enumerate() {
        let cell_at = |column: usize| row.get(column).map(raw_cell).unwrap_or(RawCell::Empty);
        // Row numbers are 1-based and the header is row 1.
        builder.push_row(index + 2, cell_at(columns.date), cell_at(columns.amount));
    }

    Ok(builder.build(file_name))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(text) | Data::DateTimeIso(text) => RawCell::Text(text.clone()),
        Data::Float(number) => RawCell::Number(*number),
        Data::Int(number) => RawCell::Number(*number as f64),
        Data::DateTime(date_time) => RawCell::DateSerial(date_time.as_f64()),
        Data::Bool(_) | Data::Error(_) | Data::DurationIso(_) => RawCell::Other,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, test_utils::WorkbookBuilder};

    use super::read_xlsx;

    #[test]
    fn reads_dates_and_amounts() {
        let bytes = WorkbookBuilder::new()
            .date_row(date!(2023 - 01 - 05), 100.0)
            .date_row(date!(2023 - 01 - 20), -30.0)
            .date_row(date!(2023 - 02 - 10), 50.0)
            .to_bytes();

        let table = read_xlsx("transactions.xlsx", &bytes).unwrap();

        let got: Vec<_> = table
            .records()
            .iter()
            .map(|record| (record.date(), record.amount()))
            .collect();
        assert_eq!(
            got,
            vec![
                (Some(date!(2023 - 01 - 05)), 100.0),
                (Some(date!(2023 - 01 - 20)), -30.0),
                (Some(date!(2023 - 02 - 10)), 50.0),
            ]
        );
    }

    #[test]
    fn keeps_rows_with_unparseable_dates() {
        let bytes = WorkbookBuilder::new()
            .date_row(date!(2023 - 01 - 05), 100.0)
            .text_row("not a date", 20.0)
            .to_bytes();

        let table = read_xlsx("transactions.xlsx", &bytes).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.unparsed_dates(), 1);
        assert_eq!(table.records()[1].year(), None);
        assert_eq!(table.records()[1].month_bucket(), None);
    }

    #[test]
    fn reads_text_dates() {
        let bytes = WorkbookBuilder::new()
            .text_row("2024-03-15", -12.5)
            .to_bytes();

        let table = read_xlsx("transactions.xlsx", &bytes).unwrap();

        assert_eq!(table.records()[0].date(), Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn prefers_sheet1() {
        let bytes = WorkbookBuilder::new()
            .with_leading_sheet("Notes")
            .date_row(date!(2023 - 01 - 05), 100.0)
            .to_bytes();

        let table = read_xlsx("transactions.xlsx", &bytes).unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_amount_column_is_an_error() {
        let bytes = WorkbookBuilder::with_headers(&["Date", "Description"])
            .date_row(date!(2023 - 01 - 05), 100.0)
            .to_bytes();

        let result = read_xlsx("transactions.xlsx", &bytes);

        assert_eq!(
            result,
            Err(Error::MissingColumns(vec!["Amount".to_owned()]))
        );
    }

    #[test]
    fn garbage_bytes_are_an_invalid_spreadsheet() {
        let result = read_xlsx("transactions.xlsx", b"PK\x03\x04 definitely not a zip");

        assert!(
            matches!(result, Err(Error::InvalidSpreadsheet(_))),
            "want invalid spreadsheet error, got {result:?}"
        );
    }
}
