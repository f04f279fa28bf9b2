//! Excel export of a query result set

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Record;

/// Fixed column headers of the exported workbook, in sheet order
const HEADERS: [&str; 10] = [
    "日期時間",
    "廠區",
    "車號",
    "來源",
    "垃圾種類",
    "毛重(kg)",
    "空重(kg)",
    "淨重(kg)",
    "金額",
    "備註",
];

/// Default filename for an export run on `date`
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("地磅查詢結果_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Write the result set to an `.xlsx` workbook. An empty result set is an
/// error rather than an empty file.
pub fn export_to_excel(records: &[Record], output_path: &Path) -> Result<()> {
    if records.is_empty() {
        return Err(Error::EmptyExport);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_result_sheet(sheet, records)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_result_sheet(sheet: &mut Worksheet, records: &[Record]) -> Result<()> {
    sheet
        .set_name("查詢結果")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, record.datetime.format("%Y-%m-%d %H:%M:%S").to_string())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, &record.plant_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &record.vehicle_no)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &record.source)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, &record.waste_type)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 5, record.gross_weight)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 6, record.tare_weight)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 7, record.net_weight)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 8, record.amount)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 9, record.remark.as_deref().unwrap_or(""))
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    // Datetime and remark need room; weights fit the default width
    sheet
        .set_column_width(0, 20)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(2, 12)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(9, 30)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(seq_no: u64) -> Record {
        Record {
            seq_no,
            plant_name: "南區廠".to_string(),
            datetime: Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap(),
            lane: 1,
            vehicle_no: "KEA-1207".to_string(),
            source: "南區隊".to_string(),
            waste_type: "一般垃圾".to_string(),
            gross_weight: 12480.0,
            tare_weight: 8360.0,
            net_weight: 4120.0,
            amount: 3120.0,
            remark: Some("複磅".to_string()),
        }
    }

    #[test]
    fn default_filename_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(default_export_filename(date), "地磅查詢結果_2026-03-02.xlsx");
    }

    #[test]
    fn empty_result_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        assert!(matches!(
            export_to_excel(&[], &path),
            Err(Error::EmptyExport)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn writes_workbook_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let records: Vec<Record> = (1..=3).map(record).collect();

        export_to_excel(&records, &path).unwrap();
        assert!(path.exists());
    }
}
