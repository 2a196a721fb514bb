//! Reads transactions from CSV uploads.

use csv::{ReaderBuilder, Trim};

use crate::{
    Error,
    loader::{ColumnIndices, RawCell, TableBuilder},
    transaction::TransactionTable,
};

pub(super) fn read_csv(file_name: &str, bytes: &[u8]) -> Result<TransactionTable, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .inspect_err(|error| tracing::debug!("Could not read CSV header of '{file_name}': {error}"))
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .clone();
    let columns = ColumnIndices::find(headers.iter())?;

    let mut builder = TableBuilder::new();

    for (index, result) in reader.records().enumerate() {
        let record = result
            .inspect_err(|error| tracing::debug!("Could not read CSV record: {error}"))
            .map_err(|error| Error::InvalidCSV(error.to_string()))?;

        let cell_at = |column: usize| match record.get(column) {
            Some(text) if !text.is_empty() => RawCell::Text(text.to_owned()),
            _ => RawCell::Empty,
        };

        builder.push_row(index + 2, cell_at(columns.date), cell_at(columns.amount));
    }

    Ok(builder.build(file_name))
}
