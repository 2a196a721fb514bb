use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use time::Date;

const BOUNDARY: &str = "----UploadBoundary7MA4YWxkTrZu0gW";

/// The content type and body of a multipart form with a single file field.
pub(crate) fn multipart_body(field_name: &str, file_name: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
        Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
        Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

enum Row {
    Date(Date, f64),
    Text(String, f64),
}

/// Builds an in-memory `.xlsx` workbook with a header row and one data
/// sheet named "Sheet1".
pub(crate) struct WorkbookBuilder {
    headers: Vec<String>,
    leading_sheet: Option<String>,
    rows: Vec<Row>,
}

impl WorkbookBuilder {
    pub(crate) fn new() -> Self {
        Self::with_headers(&["Date", "Amount"])
    }

    pub(crate) fn with_headers(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|header| (*header).to_owned()).collect(),
            leading_sheet: None,
            rows: Vec::new(),
        }
    }

    /// Adds an empty sheet before the data sheet.
    pub(crate) fn with_leading_sheet(mut self, name: &str) -> Self {
        self.leading_sheet = Some(name.to_owned());
        self
    }

    /// Adds a row with `date` stored as a spreadsheet date.
    pub(crate) fn date_row(mut self, date: Date, amount: f64) -> Self {
        self.rows.push(Row::Date(date, amount));
        self
    }

    /// Adds a row with the date column stored as text.
    pub(crate) fn text_row(mut self, date: &str, amount: f64) -> Self {
        self.rows.push(Row::Text(date.to_owned(), amount));
        self
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut workbook = Workbook::new();

        if let Some(name) = &self.leading_sheet {
            workbook
                .add_worksheet()
                .set_name(name)
                .expect("Could not name leading sheet");
        }

        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let sheet = workbook
            .add_worksheet()
            .set_name("Sheet1")
            .expect("Could not name data sheet");

        for (column, header) in self.headers.iter().enumerate() {
            sheet
                .write_string(0, column as u16, header)
                .expect("Could not write header");
        }

        for (index, row) in self.rows.iter().enumerate() {
            let row_number = index as u32 + 1;

            let amount = match row {
                Row::Date(date, amount) => {
                    let date_time =
                        ExcelDateTime::from_ymd(date.year() as u16, date.month().into(), date.day())
                            .expect("Could not convert date");
                    sheet
                        .write_datetime_with_format(row_number, 0, &date_time, &date_format)
                        .expect("Could not write date");
                    amount
                }
                Row::Text(text, amount) => {
                    sheet
                        .write_string(row_number, 0, text)
                        .expect("Could not write text");
                    amount
                }
            };

            sheet
                .write_number(row_number, 1, *amount)
                .expect("Could not write amount");
        }

        workbook
            .save_to_buffer()
            .expect("Could not save workbook")
    }
}
