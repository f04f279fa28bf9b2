//! Output formatting module

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::types::{DailyTrendPoint, DashboardSummary, SourceList, WasteTypeStat};
use crate::view::{QueryView, SummaryTable};

/// Placeholder row for an empty result set
pub const NO_DATA: &str = "無符合條件的資料";

/// Thousands-grouped integer rendering, e.g. 1234567 → "1,234,567"
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let mut digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{},{}", tail, grouped)
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{},{}", digits, grouped)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Stats strip shown above the result table
pub fn print_query_stats(total: u64, net_weight_kg: f64, amount: f64) {
    println!(
        "共 {} 筆 | 淨重 {:.3} 噸 | 金額 {} 元",
        group_thousands(total as f64),
        net_weight_kg / 1000.0,
        group_thousands(amount)
    );
}

/// Render the current page of the detail view
pub fn print_page(view: &QueryView, output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(view.page())?;
        println!("{}", content);
        return Ok(());
    }

    if view.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }

    println!(
        "{:<6} {:<19} {:<10} {:<4} {:<10} {:<12} {:<10} {:>10} {:>10} {:>10} {:>10}  {}",
        "序號",
        "日期時間",
        "廠區",
        "車道",
        "車號",
        "來源",
        "垃圾種類",
        "毛重(kg)",
        "空重(kg)",
        "淨重(kg)",
        "金額",
        "備註"
    );
    for record in view.page() {
        println!(
            "{:<6} {:<19} {:<10} {:<4} {:<10} {:<12} {:<10} {:>10} {:>10} {:>10} {:>10}  {}",
            record.seq_no,
            record.datetime.format("%Y-%m-%d %H:%M:%S"),
            record.plant_name,
            record.lane,
            record.vehicle_no,
            record.source,
            record.waste_type,
            group_thousands(record.gross_weight),
            group_thousands(record.tare_weight),
            group_thousands(record.net_weight),
            group_thousands(record.amount),
            record.remark.as_deref().unwrap_or("")
        );
    }

    if view.pagination_visible() {
        println!();
        println!("第 {} 頁 / 共 {} 頁", view.current_page(), view.page_count());
    }

    Ok(())
}

/// Render the waste-type summary view
pub fn print_summary(table: &SummaryTable, output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(table)?;
        println!("{}", content);
        return Ok(());
    }

    if table.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }

    println!(
        "{:<12} {:>8} {:>12} {:>12} {:>8}",
        "垃圾種類", "筆數", "淨重(噸)", "金額", "占比"
    );
    for row in &table.rows {
        println!(
            "{:<12} {:>8} {:>12.3} {:>12} {:>7.1}%",
            row.waste_type,
            group_thousands(row.count as f64),
            row.net_weight_ton(),
            group_thousands(row.amount),
            row.percentage
        );
    }
    println!(
        "{:<12} {:>8} {:>12.3} {:>12}",
        "合計",
        group_thousands(table.total_count as f64),
        table.total_net_weight_ton(),
        group_thousands(table.total_amount)
    );

    Ok(())
}

/// Render the source registries
pub fn print_source_list(list: &SourceList, output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(list)?;
        println!("{}", content);
        return Ok(());
    }

    println!("區隊 ({}):", list.districts.len());
    for entry in &list.districts {
        println!("  {}", entry.name);
    }
    println!("廠商 ({}):", list.vendors.len());
    for entry in &list.vendors {
        println!("  {}", entry.name);
    }
    println!("垃圾種類 ({}):", list.waste_types.len());
    for entry in &list.waste_types {
        println!("  {}", entry.name);
    }

    Ok(())
}

pub fn print_dashboard_summary(summary: &DashboardSummary) {
    println!("\n總覽");
    println!("====");
    println!("總筆數:   {}", group_thousands(summary.total_records as f64));
    println!("總淨重:   {:.3} 噸", summary.total_net_weight_ton);
    println!("總金額:   {} 元", group_thousands(summary.total_amount));
    match summary.avg_net_weight() {
        Some(avg) => println!("平均淨重: {} kg/筆", group_thousands(avg)),
        None => println!("平均淨重: -"),
    }

    if !summary.plant_stats.is_empty() {
        println!("\n廠區比較");
        for plant in &summary.plant_stats {
            println!("  {:<10} {:>12.3} 噸", plant.name, plant.net_weight_ton);
        }
    }
}

pub fn print_waste_type_stats(stats: &[WasteTypeStat]) {
    println!("\n垃圾種類統計");
    println!("============");
    for stat in stats {
        println!("  {:<12} {:>12.3} 噸", stat.waste_type, stat.net_weight_ton);
    }
}

pub fn print_daily_trend(trend: &[DailyTrendPoint]) {
    println!("\n每日趨勢");
    println!("========");
    for point in trend {
        println!("  {:<10} {:>12.3} 噸", point.date, point.net_weight_ton);
    }
}
