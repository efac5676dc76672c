use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::data::model::{CellValue, InventoryTable};

pub const EXPORT_FILE_NAME: &str = "download_data.xlsx";
pub const EXPORT_SHEET_NAME: &str = "Sheet_name_1";

/// A spreadsheet ready to be offered for download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Serialize a row-level table to XLSX bytes.
///
/// One sheet, a header row with every column, then one spreadsheet row per
/// record.  Numbers are written as numbers; NaN and null cells are left
/// blank.  No index column is added.
pub fn to_xlsx(table: &InventoryTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(EXPORT_SHEET_NAME)
        .context("naming export sheet")?;

    for (c, name) in table.columns.iter().enumerate() {
        let col = u16::try_from(c).context("too many columns for a worksheet")?;
        worksheet
            .write_string(0, col, name.as_str())
            .with_context(|| format!("writing header '{name}'"))?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let sheet_row = u32::try_from(r + 1).context("too many rows for a worksheet")?;
        for (c, cell) in row.iter().enumerate() {
            let col = u16::try_from(c).context("too many columns for a worksheet")?;
            match cell {
                CellValue::String(s) | CellValue::Date(s) => {
                    worksheet.write_string(sheet_row, col, s.as_str())?;
                }
                CellValue::Integer(i) => {
                    worksheet.write_number(sheet_row, col, *i as f64)?;
                }
                CellValue::Float(f) if f.is_finite() => {
                    worksheet.write_number(sheet_row, col, *f)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(sheet_row, col, *b)?;
                }
                CellValue::Float(_) | CellValue::Null => {}
            }
        }
    }

    let buffer = workbook.save_to_buffer().context("encoding XLSX")?;
    Ok(buffer)
}

/// Export the most recent filtered set, if a run has produced one.
///
/// `None` in means nothing has been computed yet: no file is produced.
pub fn export_filtered(last_filtered: Option<&InventoryTable>) -> Result<Option<ExportFile>> {
    let Some(table) = last_filtered else {
        log::debug!("Export requested before any pipeline run; nothing to do");
        return Ok(None);
    };
    let bytes = to_xlsx(table)?;
    log::info!(
        "Exported {} rows x {} columns ({} bytes) as {EXPORT_FILE_NAME}",
        table.len(),
        table.columns.len(),
        bytes.len()
    );
    Ok(Some(ExportFile {
        file_name: EXPORT_FILE_NAME,
        bytes,
    }))
}
