//! Async client for the weighbridge backend

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{
    DailyTrendPoint, DashboardSummary, QueryParams, Record, SourceList, WasteTypeStat,
};

use super::response::{Envelope, ImportReply, QueryReply};

pub struct ApiClient {
    http: Client,
    api_url: String,
}

impl ApiClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Read action: GET with `action` plus one query-string field per
    /// parameter. Object- and array-valued parameters travel as JSON text.
    pub async fn call(&self, action: &str, params: &Map<String, Value>) -> Result<Envelope> {
        let mut query: Vec<(String, String)> = vec![("action".to_string(), action.to_string())];
        for (key, value) in params {
            query.push((key.clone(), query_value(value)));
        }

        let response = self.http.get(&self.api_url).query(&query).send().await?;
        Self::decode(response).await
    }

    /// Write action: POST with all parameters plus `action` in a JSON body.
    /// Used for bulk import to avoid the URL length limit.
    pub async fn call_post(&self, action: &str, params: Map<String, Value>) -> Result<Envelope> {
        let mut body = params;
        body.insert("action".to_string(), Value::String(action.to_string()));

        let response = self.http.post(&self.api_url).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Envelope> {
        if response.status() == StatusCode::URI_TOO_LONG {
            return Err(Error::PayloadTooLarge);
        }
        let response = response.error_for_status()?;
        response.json::<Envelope>().await.map_err(|e| {
            if e.is_decode() {
                Error::MalformedResponse(e.to_string())
            } else {
                Error::Http(e)
            }
        })
    }

    // ------------------------------------------------------------------
    // Typed actions
    // ------------------------------------------------------------------

    /// Backend-side configuration blob (dropdown defaults etc.)
    pub async fn get_config(&self) -> Result<Value> {
        self.call("getConfig", &Map::new()).await?.take_data()
    }

    /// Districts, vendors and waste types for the filter dropdowns
    pub async fn get_source_list(&self) -> Result<SourceList> {
        self.call("getSourceList", &Map::new()).await?.take_data()
    }

    pub async fn get_summary(
        &self,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<DashboardSummary> {
        self.call("getSummary", &date_window(start_date, end_date))
            .await?
            .take_data()
    }

    pub async fn get_waste_type_stats(
        &self,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<Vec<WasteTypeStat>> {
        self.call("getWasteTypeStats", &date_window(start_date, end_date))
            .await?
            .take_data()
    }

    pub async fn get_daily_trend(
        &self,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<Vec<DailyTrendPoint>> {
        self.call("getDailyTrend", &date_window(start_date, end_date))
            .await?
            .take_data()
    }

    /// Run a filtered query. `total` is the server-side match count and
    /// falls back to the returned row count when the backend omits it.
    pub async fn query_data(&self, params: &QueryParams) -> Result<QueryReply> {
        let envelope = self.call("queryData", &params.to_params()).await?;
        let total = envelope.total;
        let records: Vec<Record> = envelope.take_data()?;
        let total = total.unwrap_or(records.len() as u64);
        Ok(QueryReply { records, total })
    }

    /// Bulk-import raw sheet rows (header row first) for one plant/month.
    pub async fn import_data(
        &self,
        plant: &str,
        year_month: &str,
        rows: &[Vec<String>],
    ) -> Result<ImportReply> {
        let mut params = Map::new();
        params.insert("plant".to_string(), Value::String(plant.to_string()));
        params.insert(
            "yearMonth".to_string(),
            Value::String(year_month.to_string()),
        );
        params.insert(
            "data".to_string(),
            serde_json::to_value(rows).map_err(Error::Json)?,
        );

        let envelope = self.call_post("importData", params).await?.ok()?;
        Ok(ImportReply {
            count: envelope.count.unwrap_or(0),
            total_weight_kg: envelope.total_weight_kg.unwrap_or(0.0),
            new_sources: envelope.new_sources.unwrap_or(0),
        })
    }
}

fn date_window(start_date: chrono::NaiveDate, end_date: chrono::NaiveDate) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(
        "startDate".to_string(),
        Value::String(start_date.format("%Y-%m-%d").to_string()),
    );
    params.insert(
        "endDate".to_string(),
        Value::String(end_date.format("%Y-%m-%d").to_string()),
    );
    params
}

/// Query-string rendering of a parameter value. Strings go through as-is
/// (no JSON quotes); objects and arrays as JSON text.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_value_keeps_strings_unquoted() {
        assert_eq!(query_value(&Value::String("南區隊".into())), "南區隊");
        assert_eq!(query_value(&Value::from(2000u32)), "2000");
        assert_eq!(query_value(&Value::Null), "");
    }

    #[test]
    fn query_value_serializes_objects_as_json() {
        let value = serde_json::json!({"plants": ["south"]});
        assert_eq!(query_value(&value), r#"{"plants":["south"]}"#);
    }
}
