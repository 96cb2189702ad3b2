//! CSV parsing for order line-item datasets.
//!
//! Expects the four columns `Order ID`, `Product ID`, `Product Name` and
//! `Order Date`; any other columns (the retail export this was built against
//! carries a dozen more) are ignored. Schema violations fail the whole load
//! with the offending 1-based line number, so no partially parsed dataset
//! ever reaches the index builder.

use std::io::Read;

use basketry_core::LineItem;
use chrono::NaiveDate;
use csv::StringRecord;

use crate::LoaderError;

const ORDER_ID: &str = "Order ID";
const PRODUCT_ID: &str = "Product ID";
const PRODUCT_NAME: &str = "Product Name";
const ORDER_DATE: &str = "Order Date";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

struct ColumnMap {
    order_id: usize,
    product_id: usize,
    product_name: usize,
    order_date: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoaderError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            order_id: position(ORDER_ID)?,
            product_id: position(PRODUCT_ID)?,
            product_name: position(PRODUCT_NAME)?,
            order_date: position(ORDER_DATE)?,
        })
    }
}

/// Parses CSV line-item records from any reader.
pub fn parse_line_items<R: Read>(reader: R) -> Result<Vec<LineItem>, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut line_items = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);

        let order_id = required_field(&record, columns.order_id, ORDER_ID, line)?;
        let product_id = required_field(&record, columns.product_id, PRODUCT_ID, line)?;
        let product_name = required_field(&record, columns.product_name, PRODUCT_NAME, line)?;
        let raw_date = required_field(&record, columns.order_date, ORDER_DATE, line)?;
        let order_date = parse_date(raw_date, line)?;

        line_items.push(LineItem::new(order_id, product_id, product_name, order_date));
    }

    Ok(line_items)
}

fn required_field<'record>(
    record: &'record StringRecord,
    column: usize,
    name: &str,
    line: u64,
) -> Result<&'record str, LoaderError> {
    match record.get(column) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoaderError::MalformedRecord { line, field: name.to_string() }),
    }
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, LoaderError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .ok_or_else(|| LoaderError::MalformedRecord { line, field: ORDER_DATE.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_dataset() {
        let csv = "Order ID,Product ID,Product Name,Order Date\n\
                   O1,P1,Stapler,2024-03-01\n\
                   O1,P2,Tape,2024-03-01\n";

        let items = parse_line_items(csv.as_bytes()).expect("dataset should parse");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].order_id.0, "O1");
        assert_eq!(items[1].product.name, "Tape");
    }

    #[test]
    fn ignores_extra_columns_and_accepts_us_dates() {
        // Retail exports put the relevant columns among many others.
        let csv = "Row ID,Order ID,Order Date,Ship Date,Customer,Product ID,Category,Product Name,Sales\n\
                   1,O1,11/8/2016,11/11/2016,Claire,P1,Office,Stapler,12.99\n";

        let items = parse_line_items(csv.as_bytes()).expect("dataset should parse");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
        assert_eq!(items[0].product.id.0, "P1");
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let csv = "Order ID,Product ID,Order Date\nO1,P1,2024-03-01\n";

        let result = parse_line_items(csv.as_bytes());

        assert!(matches!(
            result,
            Err(LoaderError::MissingColumn(ref column)) if column == "Product Name"
        ));
    }

    #[test]
    fn blank_field_fails_with_line_number() {
        let csv = "Order ID,Product ID,Product Name,Order Date\n\
                   O1,P1,Stapler,2024-03-01\n\
                   O1,,Tape,2024-03-01\n";

        let result = parse_line_items(csv.as_bytes());

        assert!(matches!(
            result,
            Err(LoaderError::MalformedRecord { line: 3, ref field }) if field == "Product ID"
        ));
    }

    #[test]
    fn unparseable_date_fails_fast() {
        let csv = "Order ID,Product ID,Product Name,Order Date\n\
                   O1,P1,Stapler,yesterday\n";

        let result = parse_line_items(csv.as_bytes());

        assert!(matches!(
            result,
            Err(LoaderError::MalformedRecord { line: 2, ref field }) if field == "Order Date"
        ));
    }

    #[test]
    fn empty_dataset_parses_to_no_items() {
        let csv = "Order ID,Product ID,Product Name,Order Date\n";

        let items = parse_line_items(csv.as_bytes()).expect("header-only dataset should parse");

        assert!(items.is_empty());
    }
}
