//! Waste-type summary aggregation

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::Record;

/// Bucket for records whose waste type is missing or blank
pub const UNCATEGORIZED: &str = "未分類";

/// One aggregated group, keyed by waste type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub waste_type: String,
    pub count: u64,
    /// Summed net weight in kilograms
    pub net_weight: f64,
    pub amount: f64,
    /// Share of total net weight, percent, rounded to one decimal.
    /// 0 when the total net weight is 0.
    pub percentage: f64,
}

impl SummaryRow {
    pub fn net_weight_ton(&self) -> f64 {
        self.net_weight / 1000.0
    }
}

/// Aggregated rows plus the footer totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub total_count: u64,
    pub total_net_weight: f64,
    pub total_amount: f64,
}

impl SummaryTable {
    pub fn total_net_weight_ton(&self) -> f64 {
        self.total_net_weight / 1000.0
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group the result set by waste type and compute per-group count, net
/// weight, amount and share of total net weight. Groups come out sorted
/// descending by net weight; equal sums keep first-encountered order
/// (the sort is stable).
pub fn summarize(records: &[Record]) -> SummaryTable {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut total_net_weight = 0.0;
    let mut total_amount = 0.0;

    for record in records {
        let key = if record.waste_type.trim().is_empty() {
            UNCATEGORIZED
        } else {
            record.waste_type.as_str()
        };
        let idx = match index.get(key) {
            Some(&i) => i,
            None => {
                let i = rows.len();
                index.insert(key.to_string(), i);
                rows.push(SummaryRow {
                    waste_type: key.to_string(),
                    count: 0,
                    net_weight: 0.0,
                    amount: 0.0,
                    percentage: 0.0,
                });
                i
            }
        };
        let row = &mut rows[idx];
        row.count += 1;
        row.net_weight += record.net_weight;
        row.amount += record.amount;
        total_net_weight += record.net_weight;
        total_amount += record.amount;
    }

    for row in &mut rows {
        row.percentage = if total_net_weight > 0.0 {
            round_one_decimal(row.net_weight / total_net_weight * 100.0)
        } else {
            0.0
        };
    }

    // Vec::sort_by is stable, so ties keep insertion order
    rows.sort_by(|a, b| {
        b.net_weight
            .partial_cmp(&a.net_weight)
            .unwrap_or(Ordering::Equal)
    });

    SummaryTable {
        rows,
        total_count: records.len() as u64,
        total_net_weight,
        total_amount,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(waste_type: &str, net_weight: f64, amount: f64) -> Record {
        Record {
            seq_no: 0,
            plant_name: "南區廠".to_string(),
            datetime: Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap(),
            lane: 1,
            vehicle_no: "KEA-1207".to_string(),
            source: "南區隊".to_string(),
            waste_type: waste_type.to_string(),
            gross_weight: 0.0,
            tare_weight: 0.0,
            net_weight,
            amount,
            remark: None,
        }
    }

    #[test]
    fn groups_sort_by_net_weight_with_stable_tie_break() {
        // A=100, B=300, A=200 → both groups sum to 300; A was encountered
        // first, so the stable sort leaves A ahead of B.
        let records = vec![
            record("A", 100.0, 10.0),
            record("B", 300.0, 30.0),
            record("A", 200.0, 20.0),
        ];
        let table = summarize(&records);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].waste_type, "A");
        assert_eq!(table.rows[1].waste_type, "B");
        // Insertion order is A (seen first), B; the tie keeps it.
        assert_eq!(table.rows[0].count, 2);
        assert_eq!(table.rows[0].net_weight, 300.0);
        assert_eq!(table.rows[0].percentage, 50.0);
        assert_eq!(table.rows[1].net_weight, 300.0);
        assert_eq!(table.rows[1].count, 1);
        assert_eq!(table.rows[1].percentage, 50.0);

        assert_eq!(table.total_count, 3);
        assert_eq!(table.total_net_weight, 600.0);
        assert_eq!(table.total_amount, 60.0);
    }

    #[test]
    fn blank_waste_type_buckets_as_uncategorized() {
        let records = vec![
            record("", 100.0, 0.0),
            record("  ", 50.0, 0.0),
            record("廚餘", 850.0, 0.0),
        ];
        let table = summarize(&records);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].waste_type, "廚餘");
        assert_eq!(table.rows[1].waste_type, UNCATEGORIZED);
        assert_eq!(table.rows[1].count, 2);
        assert_eq!(table.rows[1].net_weight, 150.0);
    }

    #[test]
    fn percentages_sum_to_one_hundred_within_rounding() {
        let records = vec![
            record("A", 333.0, 0.0),
            record("B", 333.0, 0.0),
            record("C", 334.0, 0.0),
        ];
        let table = summarize(&records);
        let sum: f64 = table.rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.2, "sum was {}", sum);
    }

    #[test]
    fn zero_total_weight_gives_zero_percentages() {
        let records = vec![record("A", 0.0, 5.0), record("B", 0.0, 7.0)];
        let table = summarize(&records);
        assert!(table.rows.iter().all(|r| r.percentage == 0.0));
        assert_eq!(table.total_amount, 12.0);
    }

    #[test]
    fn empty_set_gives_empty_table() {
        let table = summarize(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total_count, 0);
        assert_eq!(table.total_net_weight, 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let records = vec![record("A", 1.0, 0.0), record("B", 2.0, 0.0)];
        let table = summarize(&records);
        // 2/3 → 66.7, 1/3 → 33.3
        assert_eq!(table.rows[0].percentage, 66.7);
        assert_eq!(table.rows[1].percentage, 33.3);
    }
}
