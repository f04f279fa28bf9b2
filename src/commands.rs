//! Command handlers

use crate::api::ApiClient;
use crate::cli::{Cli, Commands, OutputFormat, ViewArg};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::{default_export_filename, export_to_excel};
use crate::import::load_upload_sheet;
use crate::output;
use crate::types::QueryParams;
use crate::view::{QueryView, ViewMode};
use chrono::{Datelike, Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref api_url) = cli.api_url {
        config.api_url = api_url.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Dashboard {
            start_date,
            end_date,
        } => {
            let today = Local::now().date_naive();
            // Default window reaches back into last month so a freshly
            // imported previous month is visible.
            let start = start_date.unwrap_or_else(|| prev_month_start(today));
            let end = end_date.unwrap_or_else(|| month_end(today));
            cmd_dashboard(&config, start, end).await
        }

        Commands::Query {
            start_date,
            end_date,
            plants,
            waste_type,
            district,
            vendor,
            limit,
            page,
            view,
        } => {
            let params = build_query_params(
                &config, *start_date, *end_date, plants, waste_type, district, vendor, *limit,
            );
            cmd_query(&config, params, *page, *view, output_format).await
        }

        Commands::Import {
            file,
            plant,
            year_month,
        } => cmd_import(&config, file.clone(), plant, year_month).await,

        Commands::Export {
            start_date,
            end_date,
            plants,
            waste_type,
            district,
            vendor,
            limit,
            output,
        } => {
            let params = build_query_params(
                &config, *start_date, *end_date, plants, waste_type, district, vendor, *limit,
            );
            cmd_export(&config, params, output.clone()).await
        }

        Commands::Sources => cmd_sources(&config, output_format).await,

        Commands::Config {
            show,
            show_remote,
            set_api_url,
            set_page_size,
            set_limit,
            set_output,
            reset,
        } => {
            cmd_config(
                &config,
                *show,
                *show_remote,
                set_api_url.clone(),
                *set_page_size,
                *set_limit,
                *set_output,
                *reset,
            )
            .await
        }
    }
}

fn api_client(config: &Config) -> Result<ApiClient> {
    Ok(ApiClient::new(config.require_api_url()?))
}

#[allow(clippy::too_many_arguments)]
fn build_query_params(
    config: &Config,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    plants: &[String],
    waste_type: &Option<String>,
    district: &Option<String>,
    vendor: &Option<String>,
    limit: Option<u32>,
) -> QueryParams {
    let today = Local::now().date_naive();
    // District or vendor, never both (clap enforces the conflict)
    let source = district.clone().or_else(|| vendor.clone());
    QueryParams {
        start_date: start_date.unwrap_or_else(|| month_start(today)),
        end_date: end_date.unwrap_or_else(|| month_end(today)),
        plants: plants.to_vec(),
        waste_type: waste_type.clone(),
        source,
        limit: limit.unwrap_or(config.query_limit),
    }
}

async fn cmd_query(
    config: &Config,
    params: QueryParams,
    page: usize,
    view_arg: ViewArg,
    output_format: OutputFormat,
) -> Result<()> {
    let client = api_client(config)?;
    let reply = client.query_data(&params).await?;

    let net_weight: f64 = reply.records.iter().map(|r| r.net_weight).sum();
    let amount: f64 = reply.records.iter().map(|r| r.amount).sum();

    let mut view = QueryView::new(config.page_size);
    view.set_records(reply.records);

    if output_format == OutputFormat::Table {
        output::print_query_stats(reply.total, net_weight, amount);
        println!();
    }

    match view_arg {
        ViewArg::Summary => {
            view.switch_to(ViewMode::Summary);
            output::print_summary(&view.summary(), output_format)?;
        }
        ViewArg::Detail => {
            if page > 1 && !view.goto_page(page) {
                eprintln!(
                    "Page {} is out of range, showing page {} of {}",
                    page,
                    view.current_page(),
                    view.page_count()
                );
            }
            output::print_page(&view, output_format)?;
        }
    }

    Ok(())
}

async fn cmd_import(
    config: &Config,
    file: PathBuf,
    plant: &str,
    year_month: &str,
) -> Result<()> {
    if plant.is_empty() {
        return Err(Error::Validation("請選擇廠區 (plant is required)".to_string()));
    }
    validate_year_month(year_month)?;

    let client = api_client(config)?;
    let sheet = load_upload_sheet(&file)?;
    println!("檔案載入成功，共 {} 筆資料", sheet.data_row_count());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("上傳中...");
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = client.import_data(plant, year_month, &sheet.wire_rows()).await;
    pb.finish_and_clear();

    let reply = result?;
    println!(
        "成功匯入 {} 筆資料 (共 {} KG)",
        reply.count,
        output::group_thousands(reply.total_weight_kg)
    );

    if reply.new_sources > 0 {
        // The upload introduced districts/vendors the backend had not
        // seen before; show the refreshed registries.
        println!("新增 {} 個來源，重新載入來源清單", reply.new_sources);
        let sources = client.get_source_list().await?;
        println!(
            "目前來源: 區隊 {} / 廠商 {} / 垃圾種類 {}",
            sources.districts.len(),
            sources.vendors.len(),
            sources.waste_types.len()
        );
    }

    Ok(())
}

async fn cmd_export(
    config: &Config,
    params: QueryParams,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let client = api_client(config)?;
    let reply = client.query_data(&params).await?;

    let path = output_path.unwrap_or_else(|| {
        PathBuf::from(default_export_filename(Local::now().date_naive()))
    });
    export_to_excel(&reply.records, &path)?;

    println!("已匯出 {} 筆資料: {}", reply.records.len(), path.display());
    Ok(())
}

async fn cmd_dashboard(config: &Config, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let client = api_client(config)?;

    println!(
        "儀表板 {} ~ {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    // The three sections load independently; one failing section does not
    // take down the others.
    match client.get_summary(start, end).await {
        Ok(summary) => output::print_dashboard_summary(&summary),
        Err(e) => eprintln!("載入摘要統計失敗: {}", e),
    }

    match client.get_waste_type_stats(start, end).await {
        Ok(stats) => {
            // Top 8, same cut as the dashboard chart
            let top: Vec<_> = stats.into_iter().take(8).collect();
            output::print_waste_type_stats(&top);
        }
        Err(e) => eprintln!("載入垃圾種類統計失敗: {}", e),
    }

    match client.get_daily_trend(start, end).await {
        Ok(trend) => output::print_daily_trend(&trend),
        Err(e) => eprintln!("載入每日趨勢失敗: {}", e),
    }

    Ok(())
}

async fn cmd_sources(config: &Config, output_format: OutputFormat) -> Result<()> {
    let client = api_client(config)?;
    let sources = client.get_source_list().await?;
    output::print_source_list(&sources, output_format)
}

#[allow(clippy::too_many_arguments)]
async fn cmd_config(
    config: &Config,
    show: bool,
    show_remote: bool,
    set_api_url: Option<String>,
    set_page_size: Option<usize>,
    set_limit: Option<u32>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    if show_remote {
        let client = api_client(config)?;
        let remote = client.get_config().await?;
        println!("{}", serde_json::to_string_pretty(&remote)?);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(api_url) = set_api_url {
        config.api_url = api_url;
        modified = true;
    }

    if let Some(page_size) = set_page_size {
        if page_size == 0 {
            return Err(Error::Validation("page size must be at least 1".to_string()));
        }
        config.page_size = page_size;
        modified = true;
    }

    if let Some(query_limit) = set_limit {
        config.query_limit = query_limit;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn validate_year_month(year_month: &str) -> Result<()> {
    let valid = NaiveDate::parse_from_str(&format!("{}-01", year_month), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "請輸入年月 (invalid year-month: {}, expected YYYY-MM)",
            year_month
        )))
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).unwrap_or(date)
}

fn prev_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let start = if month == 1 {
        NaiveDate::from_ymd_opt(year - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month - 1, 1)
    };
    start.unwrap_or_else(|| month_start(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(date(2026, 3, 17)), date(2026, 3, 1));
        assert_eq!(month_end(date(2026, 3, 17)), date(2026, 3, 31));
        assert_eq!(month_end(date(2026, 2, 1)), date(2026, 2, 28));
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2026, 12, 5)), date(2026, 12, 31));
    }

    #[test]
    fn prev_month_start_wraps_january() {
        assert_eq!(prev_month_start(date(2026, 1, 15)), date(2025, 12, 1));
        assert_eq!(prev_month_start(date(2026, 3, 15)), date(2026, 2, 1));
    }

    #[test]
    fn year_month_validation() {
        assert!(validate_year_month("2026-03").is_ok());
        assert!(validate_year_month("2026-13").is_err());
        assert!(validate_year_month("202603").is_err());
        assert!(validate_year_month("").is_err());
    }

    #[test]
    fn query_params_default_to_current_month() {
        let config = Config::default();
        let params = build_query_params(&config, None, None, &[], &None, &None, &None, None);
        let today = Local::now().date_naive();
        assert_eq!(params.start_date, month_start(today));
        assert_eq!(params.end_date, month_end(today));
        assert_eq!(params.limit, 2000);
        assert!(params.source.is_none());
    }

    #[test]
    fn district_becomes_the_source() {
        let config = Config::default();
        let params = build_query_params(
            &config,
            None,
            None,
            &[],
            &None,
            &Some("南區隊".to_string()),
            &None,
            None,
        );
        assert_eq!(params.source.as_deref(), Some("南區隊"));
    }
}
