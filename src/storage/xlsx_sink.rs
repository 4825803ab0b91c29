use async_trait::async_trait;
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

use super::base::RecordSink;
use crate::core::record::{BookRecord, COLUMNS};
use crate::ScraperResult;

pub const SHEET_NAME: &str = "Book";

/// A workbook with a single `Book` sheet: one header row, then one row per
/// record. `available` and `rating` are numeric cells.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_row(sheet: &mut Worksheet, row: u32, record: &BookRecord) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, &record.title)?;
    sheet.write_string(row, 1, &record.category)?;
    sheet.write_string(row, 2, &record.price)?;
    sheet.write_string(row, 3, record.stock.to_string())?;
    sheet.write_number(row, 4, record.available)?;
    sheet.write_number(row, 5, record.rating)?;
    sheet.write_string(row, 6, &record.upc)?;
    sheet.write_string(row, 7, &record.description)?;
    Ok(())
}

#[async_trait]
impl RecordSink for XlsxSink {
    async fn write(&self, records: &[BookRecord]) -> ScraperResult<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, header) in (0u16..).zip(COLUMNS) {
            sheet.write_string(0, col, header)?;
        }
        for (row, record) in (1u32..).zip(records) {
            write_row(sheet, row, record)?;
        }

        workbook.save(&self.path)?;

        info!("Wrote {} books to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }
}
