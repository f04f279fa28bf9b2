//! Response envelope for the action-dispatched backend

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::Record;

/// The backend's uniform response shape.
///
/// `total`/`count`/`totalWeightKg`/`newSources` are action-specific extras
/// carried next to `data` rather than inside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_weight_kg: Option<f64>,
    #[serde(default)]
    pub new_sources: Option<u64>,
}

impl Envelope {
    /// Reject `success: false` envelopes, carrying the backend's error text.
    pub fn ok(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::Api(
                self.error.unwrap_or_else(|| "未知錯誤".to_string()),
            ))
        }
    }

    /// Extract and deserialize `data`. A missing or wrong-shaped `data`
    /// is a malformed response, not an application error.
    pub fn take_data<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        let mut envelope = self.ok()?;
        let data = envelope
            .data
            .take()
            .ok_or_else(|| Error::MalformedResponse("missing data field".to_string()))?;
        serde_json::from_value(data).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

/// Result of the `queryData` action
#[derive(Debug, Clone)]
pub struct QueryReply {
    pub records: Vec<Record>,
    /// Server-side match count, which can exceed `records.len()` when the
    /// query limit truncated the result set
    pub total: u64,
}

/// Result of the `importData` action
#[derive(Debug, Clone)]
pub struct ImportReply {
    pub count: u64,
    pub total_weight_kg: f64,
    pub new_sources: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_surfaces_backend_error() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "error": "quota exceeded"}"#).unwrap();
        match envelope.ok() {
            Err(Error::Api(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn failure_without_error_text_gets_placeholder() {
        let envelope: Envelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
        match envelope.ok() {
            Err(Error::Api(msg)) => assert_eq!(msg, "未知錯誤"),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_data_is_malformed() {
        let envelope: Envelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            envelope.take_data::<Vec<Record>>(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn wrong_shaped_data_is_malformed() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": true, "data": "not an array"}"#).unwrap();
        assert!(matches!(
            envelope.take_data::<Vec<Record>>(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn take_data_returns_typed_records() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "success": true,
                "total": 1,
                "data": [{
                    "seqNo": 1,
                    "plantName": "南區廠",
                    "datetime": "2026-03-02T08:15:00Z",
                    "lane": 1,
                    "vehicleNo": "KEA-1207",
                    "source": "南區隊",
                    "wasteType": "一般垃圾",
                    "grossWeight": 12480,
                    "tareWeight": 8360,
                    "netWeight": 4120,
                    "amount": 3120
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.total, Some(1));
        let records: Vec<Record> = envelope.take_data().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].net_weight, 4120.0);
    }
}
