use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder};

use super::error::LoadError;
use super::model::{Dataset, OrderRecord};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// File name of the stock Superstore export.
pub const DEFAULT_DATA_PATH: &str = "Sample - Superstore.csv";

/// Character encoding of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    /// ISO-8859-1: every byte is a valid code point, decoding cannot fail.
    #[default]
    Latin1,
    /// Strict UTF-8: invalid sequences are rejected.
    Utf8,
}

impl SourceEncoding {
    fn name(self) -> &'static str {
        match self {
            SourceEncoding::Latin1 => "Latin-1",
            SourceEncoding::Utf8 => "UTF-8",
        }
    }
}

/// Where and how to read the order export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub path: PathBuf,
    pub delimiter: u8,
    pub encoding: SourceEncoding,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            delimiter: b',',
            encoding: SourceEncoding::Latin1,
        }
    }
}

impl LoaderConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const COL_ORDER_DATE: &str = "Order Date";
const COL_CUSTOMER_ID: &str = "Customer ID";
const COL_SEGMENT: &str = "Segment";
const COL_CATEGORY: &str = "Category";
const COL_SUB_CATEGORY: &str = "Sub-Category";
const COL_SALES: &str = "Sales";

/// Accepted date layouts, tried in order. The stock export uses US month-first.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// Positions of the required columns inside a record.
struct Columns {
    order_date: usize,
    customer_id: usize,
    segment: usize,
    category: usize,
    sub_category: usize,
    sales: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Columns {
            order_date: find(COL_ORDER_DATE)?,
            customer_id: find(COL_CUSTOMER_ID)?,
            segment: find(COL_SEGMENT)?,
            category: find(COL_CATEGORY)?,
            sub_category: find(COL_SUB_CATEGORY)?,
            sales: find(COL_SALES)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the whole export into memory.
///
/// Fails with [`LoadError::FileAccess`] when the file cannot be opened and
/// with one of the parse variants on the first bad header, cell, or record.
pub fn load_dataset(config: &LoaderConfig) -> Result<Dataset, LoadError> {
    let file = File::open(&config.path).map_err(|source| LoadError::FileAccess {
        path: config.path.clone(),
        source,
    })?;
    let dataset = read_orders(file, config)?;
    log::info!(
        "Loaded {} orders from {} ({} segments, {} categories, {} sub-categories)",
        dataset.len(),
        config.path.display(),
        dataset.segments.len(),
        dataset.categories.len(),
        dataset.sub_categories.len()
    );
    Ok(dataset)
}

/// Parse orders from any byte source laid out like the Superstore export.
pub fn read_orders<R: std::io::Read>(
    source: R,
    config: &LoaderConfig,
) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(h, config.encoding, 1, "<header>"))
        .collect::<Result<_, _>>()?;
    let cols = Columns::locate(&headers)?;

    let mut orders = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        // 1-based line number in the file, header included.
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(orders.len() + 2);
        orders.push(parse_order(&record, &cols, row, config.encoding)?);
    }

    Ok(Dataset::from_orders(orders))
}

/// Convenience wrapper for callers that only have a path.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    load_dataset(&LoaderConfig::with_path(path))
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

fn parse_order(
    record: &ByteRecord,
    cols: &Columns,
    row: usize,
    encoding: SourceEncoding,
) -> Result<OrderRecord, LoadError> {
    let field = |idx: usize, column: &'static str| -> Result<String, LoadError> {
        let bytes = record.get(idx).unwrap_or_default();
        decode(bytes, encoding, row, column).map(|s| s.trim().to_string())
    };

    let date_text = field(cols.order_date, COL_ORDER_DATE)?;
    let sales_text = field(cols.sales, COL_SALES)?;

    Ok(OrderRecord {
        order_date: parse_date(&date_text, row)?,
        customer_id: field(cols.customer_id, COL_CUSTOMER_ID)?,
        segment: field(cols.segment, COL_SEGMENT)?,
        category: field(cols.category, COL_CATEGORY)?,
        sub_category: field(cols.sub_category, COL_SUB_CATEGORY)?,
        sales: parse_sales(&sales_text, row)?,
    })
}

fn decode(
    bytes: &[u8],
    encoding: SourceEncoding,
    row: usize,
    column: &'static str,
) -> Result<String, LoadError> {
    match encoding {
        SourceEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        SourceEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| LoadError::Encoding {
                row,
                column,
                encoding: encoding.name(),
            }),
    }
}

fn parse_date(text: &str, row: usize) -> Result<NaiveDate, LoadError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| LoadError::Parse {
            row,
            column: COL_ORDER_DATE,
            value: text.to_string(),
            reason: format!("expected one of {}", DATE_FORMATS.join(", ")),
        })
}

fn parse_sales(text: &str, row: usize) -> Result<f64, LoadError> {
    let bad = |reason: &str| LoadError::Parse {
        row,
        column: COL_SALES,
        value: text.to_string(),
        reason: reason.to_string(),
    };
    let value: f64 = text.parse().map_err(|_| bad("not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(bad("must be a finite, non-negative amount"));
    }
    Ok(value)
}
