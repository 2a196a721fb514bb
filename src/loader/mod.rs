//! Loads an uploaded spreadsheet into a [TransactionTable].
//!
//! XLSX and legacy XLS workbooks are read with calamine, anything else is
//! treated as CSV. Both paths funnel their rows through [TableBuilder] so
//! dates and amounts are interpreted the same way regardless of format.

mod cache;
mod csv;
mod date;
mod xlsx;

pub use cache::{CacheStatus, ContentHash, LoadCache};

use crate::{
    Error,
    transaction::{TransactionRecord, TransactionTable},
};

/// The header of the column holding transaction dates.
pub const DATE_COLUMN: &str = "Date";
/// The header of the column holding signed transaction amounts.
pub const AMOUNT_COLUMN: &str = "Amount";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Parse `bytes` into a transaction table.
///
/// Rows with dates that cannot be parsed are kept with a missing date.
/// Rows without a numeric amount are skipped and counted.
///
/// # Errors
/// Returns an error if the upload is empty, the file cannot be read, or the
/// `Date` or `Amount` header is missing. No partial table is produced.
pub fn load_transactions(file_name: &str, bytes: &[u8]) -> Result<TransactionTable, Error> {
    if bytes.is_empty() {
        return Err(Error::EmptyUpload);
    }

    let table = if bytes.starts_with(ZIP_MAGIC) {
        tracing::debug!("Reading '{file_name}' as an XLSX workbook");
        xlsx::read_xlsx(file_name, bytes)?
    } else if bytes.starts_with(OLE_MAGIC) {
        tracing::debug!("Reading '{file_name}' as an XLS workbook");
        xlsx::read_xls(file_name, bytes)?
    } else {
        tracing::debug!("Reading '{file_name}' as CSV");
        csv::read_csv(file_name, bytes)?
    };

    tracing::info!(
        "Loaded {} transactions from '{file_name}' ({} without a valid date, {} rows skipped)",
        table.len(),
        table.unparsed_dates(),
        table.skipped_rows()
    );

    Ok(table)
}

/// The positions of the required columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    date: usize,
    amount: usize,
}

impl ColumnIndices {
    /// Find the required columns among `headers`.
    ///
    /// Header names are compared after trimming surrounding whitespace.
    fn find<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, Error> {
        let mut date = None;
        let mut amount = None;

        for (index, header) in headers.into_iter().enumerate() {
            match header.trim() {
                DATE_COLUMN if date.is_none() => date = Some(index),
                AMOUNT_COLUMN if amount.is_none() => amount = Some(index),
                _ => {}
            }
        }

        match (date, amount) {
            (Some(date), Some(amount)) => Ok(Self { date, amount }),
            (date, amount) => {
                let mut missing = Vec::new();

                if date.is_none() {
                    missing.push(DATE_COLUMN.to_owned());
                }
                if amount.is_none() {
                    missing.push(AMOUNT_COLUMN.to_owned());
                }

                Err(Error::MissingColumns(missing))
            }
        }
    }
}

/// A cell read from the uploaded file before it is interpreted.
#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    /// A cell the spreadsheet formatted as a date, as an Excel serial.
    DateSerial(f64),
    /// Booleans, error values and anything else that is neither a date nor an amount.
    Other,
}

impl RawCell {
    fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    fn to_date(&self) -> Option<time::Date> {
        match self {
            RawCell::Text(text) => date::parse_date_text(text),
            RawCell::Number(serial) | RawCell::DateSerial(serial) => {
                date::date_from_excel_serial(*serial)
            }
            RawCell::Empty | RawCell::Other => None,
        }
    }

    fn to_amount(&self) -> Option<f64> {
        let amount = match self {
            RawCell::Number(number) => Some(*number),
            RawCell::Text(text) => text.trim().parse::<f64>().ok(),
            RawCell::Empty | RawCell::DateSerial(_) | RawCell::Other => None,
        };

        amount.filter(|amount| amount.is_finite())
    }
}

/// Collects rows into records, tracking rows that had to be skipped.
struct TableBuilder {
    records: Vec<TransactionRecord>,
    skipped_rows: usize,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped_rows: 0,
        }
    }

    /// Interpret one data row. `row_number` is 1-based and counts the header.
    fn push_row(&mut self, row_number: usize, date_cell: RawCell, amount_cell: RawCell) {
        if date_cell.is_empty() && amount_cell.is_empty() {
            return;
        }

        let Some(amount) = amount_cell.to_amount() else {
            tracing::debug!("Skipping row {row_number}: no numeric amount in {amount_cell:?}");
            self.skipped_rows += 1;
            return;
        };

        let date = date_cell.to_date();

        if date.is_none() {
            tracing::debug!("Row {row_number}: could not parse date from {date_cell:?}");
        }

        self.records.push(TransactionRecord::new(date, amount));
    }

    fn build(self, file_name: &str) -> TransactionTable {
        TransactionTable::new(file_name, self.records, self.skipped_rows)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, test_utils::WorkbookBuilder};

    use super::{ColumnIndices, RawCell, TableBuilder, load_transactions};

    #[test]
    fn finds_columns_in_any_order() {
        let indices = ColumnIndices::find(["Description", " Amount ", "Date"]).unwrap();

        assert_eq!(indices.date, 2);
        assert_eq!(indices.amount, 1);
    }

    #[test]
    fn reports_every_missing_column() {
        let error = ColumnIndices::find(["Description", "Value"]).unwrap_err();

        assert_eq!(
            error,
            Error::MissingColumns(vec!["Date".to_owned(), "Amount".to_owned()])
        );
    }

    #[test]
    fn amounts_accept_numbers_and_numeric_text() {
        assert_eq!(RawCell::Number(-3.5).to_amount(), Some(-3.5));
        assert_eq!(RawCell::Text(" 42.10 ".to_owned()).to_amount(), Some(42.1));
        assert_eq!(RawCell::Text("lots".to_owned()).to_amount(), None);
        assert_eq!(RawCell::Text("NaN".to_owned()).to_amount(), None);
        assert_eq!(RawCell::DateSerial(44927.0).to_amount(), None);
    }

    #[test]
    fn dates_accept_serials_and_text() {
        assert_eq!(
            RawCell::DateSerial(44927.0).to_date(),
            Some(date!(2023 - 01 - 01))
        );
        assert_eq!(
            RawCell::Text("2023-01-01".to_owned()).to_date(),
            Some(date!(2023 - 01 - 01))
        );
        assert_eq!(RawCell::Other.to_date(), None);
    }

    #[test]
    fn builder_keeps_rows_with_bad_dates_and_skips_rows_without_amounts() {
        let mut builder = TableBuilder::new();
        builder.push_row(2, RawCell::Text("2023-01-05".to_owned()), RawCell::Number(100.0));
        builder.push_row(3, RawCell::Text("soon".to_owned()), RawCell::Number(20.0));
        builder.push_row(4, RawCell::Text("2023-01-07".to_owned()), RawCell::Empty);
        builder.push_row(5, RawCell::Empty, RawCell::Empty);

        let table = builder.build("test.csv");

        assert_eq!(table.len(), 2);
        assert_eq!(table.unparsed_dates(), 1);
        assert_eq!(table.skipped_rows(), 1);
    }

    #[test]
    fn empty_upload_is_an_error() {
        assert_eq!(load_transactions("empty.xlsx", &[]), Err(Error::EmptyUpload));
    }

    #[test]
    fn detects_xlsx_uploads() {
        let bytes = WorkbookBuilder::new()
            .date_row(date!(2023 - 01 - 05), 100.0)
            .date_row(date!(2023 - 02 - 10), 50.0)
            .to_bytes();

        let table = load_transactions("transactions.xlsx", &bytes).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].date(), Some(date!(2023 - 01 - 05)));
    }

    #[test]
    fn falls_back_to_csv() {
        let table = load_transactions("transactions.csv", b"Date,Amount\n2023-01-05,100\n")
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].amount(), 100.0);
    }
}
