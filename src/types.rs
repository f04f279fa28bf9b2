//! Core types for the weighbridge data service
//!
//! Wire structs mirror the backend's camelCase JSON. The backend is a
//! spreadsheet-backed web app, so numeric cells can come back as `null`;
//! those deserialize to the type's default instead of failing the row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize null as default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// One weighbridge transaction. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Sequence number assigned by the scale system
    #[serde(default, deserialize_with = "null_to_default")]
    pub seq_no: u64,

    /// Plant (facility) display name
    #[serde(default, deserialize_with = "null_to_default")]
    pub plant_name: String,

    /// Weighing timestamp
    pub datetime: DateTime<Utc>,

    /// Scale lane number
    #[serde(default, deserialize_with = "null_to_default")]
    pub lane: u32,

    /// Vehicle registration number
    #[serde(default, deserialize_with = "null_to_default")]
    pub vehicle_no: String,

    /// Source of the load: a district or a vendor
    #[serde(default, deserialize_with = "null_to_default")]
    pub source: String,

    /// Waste-type category
    #[serde(default, deserialize_with = "null_to_default")]
    pub waste_type: String,

    /// Gross weight in kilograms
    #[serde(default, deserialize_with = "null_to_default")]
    pub gross_weight: f64,

    /// Tare (empty vehicle) weight in kilograms
    #[serde(default, deserialize_with = "null_to_default")]
    pub tare_weight: f64,

    /// Net weight in kilograms (gross minus tare)
    #[serde(default, deserialize_with = "null_to_default")]
    pub net_weight: f64,

    /// Billed amount
    #[serde(default, deserialize_with = "null_to_default")]
    pub amount: f64,

    #[serde(default)]
    pub remark: Option<String>,
}

/// A named entry in the source / waste-type registries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
}

/// Districts, vendors and waste types known to the backend.
/// Districts and vendors are mutually exclusive filter axes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceList {
    #[serde(default)]
    pub districts: Vec<NamedEntry>,
    #[serde(default)]
    pub vendors: Vec<NamedEntry>,
    #[serde(default)]
    pub waste_types: Vec<NamedEntry>,
}

/// Per-plant tonnage for the dashboard comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantStat {
    #[serde(default, deserialize_with = "null_to_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub net_weight_ton: f64,
}

/// Dashboard totals over a date window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_records: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_net_weight: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_net_weight_ton: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub plant_stats: Vec<PlantStat>,
}

impl DashboardSummary {
    /// Average net weight per record in kilograms, None when there are no records
    pub fn avg_net_weight(&self) -> Option<f64> {
        if self.total_records > 0 {
            Some(self.total_net_weight / self.total_records as f64)
        } else {
            None
        }
    }
}

/// Tonnage per waste type for the dashboard breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypeStat {
    #[serde(default, deserialize_with = "null_to_default")]
    pub waste_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub net_weight_ton: f64,
}

/// One day of the dashboard trend line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendPoint {
    #[serde(default, deserialize_with = "null_to_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub net_weight_ton: f64,
}

/// Waste-type filter value meaning "no filter"
pub const WASTE_TYPE_ALL: &str = "全部";

/// Parameters for the `queryData` read action
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Plant codes; empty means all plants
    pub plants: Vec<String>,
    /// Waste-type filter; None or the 全部 sentinel means all
    pub waste_type: Option<String>,
    /// District or vendor name; at most one axis may be set
    pub source: Option<String>,
    /// Maximum records the backend should return
    pub limit: u32,
}

impl QueryParams {
    /// Flatten into the backend's query-string parameter map
    pub fn to_params(&self) -> Map<String, Value> {
        let waste_types = match self.waste_type.as_deref() {
            None | Some(WASTE_TYPE_ALL) => String::new(),
            Some(other) => other.to_string(),
        };
        let mut params = Map::new();
        params.insert(
            "startDate".into(),
            Value::String(self.start_date.format("%Y-%m-%d").to_string()),
        );
        params.insert(
            "endDate".into(),
            Value::String(self.end_date.format("%Y-%m-%d").to_string()),
        );
        params.insert("plants".into(), Value::String(self.plants.join(",")));
        params.insert("wasteTypes".into(), Value::String(waste_types));
        params.insert(
            "source".into(),
            Value::String(self.source.clone().unwrap_or_default()),
        );
        params.insert("limit".into(), Value::from(self.limit));
        params
    }
}
