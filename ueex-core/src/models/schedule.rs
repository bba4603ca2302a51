//! Schedule_MarketDocument input structures.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{MarketRole, ProcessType};
use crate::reference::{DEFAULT_DOMAIN, DEFAULT_RECEIVER_EIC};

/// One value per clock hour of the delivery day.
pub const HOURS_PER_DAY: usize = 24;

/// Sender or receiver of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParticipant {
    pub eic: String,
    pub role_code: MarketRole,
}

/// Hourly schedule between two domains and two counterparties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesEntry {
    pub in_domain: String,
    pub out_domain: String,
    /// Empty means "use the document sender".
    #[serde(default, rename = "counterpartyInEIC")]
    pub counterparty_in_eic: String,
    /// Empty means "use the document receiver".
    #[serde(default, rename = "counterpartyOutEIC")]
    pub counterparty_out_eic: String,
    /// MW per UTC hour, position 1..=24.
    pub hourly_values: Vec<f64>,
}

impl Default for TimeSeriesEntry {
    fn default() -> Self {
        Self {
            in_domain: DEFAULT_DOMAIN.to_string(),
            out_domain: DEFAULT_DOMAIN.to_string(),
            counterparty_in_eic: String::new(),
            counterparty_out_eic: String::new(),
            hourly_values: vec![0.0; HOURS_PER_DAY],
        }
    }
}

impl TimeSeriesEntry {
    /// Entry with every hour set to `value`.
    pub fn filled(value: f64) -> Self {
        Self {
            hourly_values: vec![value; HOURS_PER_DAY],
            ..Default::default()
        }
    }
}

/// Everything needed to render one schedule document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub document_id: String,
    pub revision_number: NonZeroU32,
    #[serde(default)]
    pub process_type: ProcessType,
    pub sender: MarketParticipant,
    pub receiver: MarketParticipant,
    pub delivery_date: NaiveDate,
    pub time_series_list: Vec<TimeSeriesEntry>,
}

impl ScheduleDocument {
    /// Blank document for `delivery_date` with one zero-filled series and the
    /// usual receiver (the system operator).
    pub fn new(document_id: impl Into<String>, delivery_date: NaiveDate) -> Self {
        Self {
            document_id: document_id.into(),
            revision_number: NonZeroU32::MIN,
            process_type: ProcessType::DayAhead,
            sender: MarketParticipant {
                eic: String::new(),
                role_code: MarketRole::Producer,
            },
            receiver: MarketParticipant {
                eic: DEFAULT_RECEIVER_EIC.to_string(),
                role_code: MarketRole::SystemOperator,
            },
            delivery_date,
            time_series_list: vec![TimeSeriesEntry::default()],
        }
    }

    /// Download name, e.g. `Schedule_2025-03-14_rev2.xml`.
    pub fn file_name(&self) -> String {
        format!(
            "Schedule_{}_rev{}.xml",
            self.delivery_date.format("%Y-%m-%d"),
            self.revision_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_follows_date_and_revision() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let mut doc = ScheduleDocument::new("ID", date);
        doc.revision_number = NonZeroU32::new(12).unwrap();
        assert_eq!(doc.file_name(), "Schedule_2025-03-04_rev12.xml");
    }

    #[test]
    fn new_document_has_one_blank_series() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let doc = ScheduleDocument::new("ID", date);
        assert_eq!(doc.time_series_list.len(), 1);
        assert_eq!(doc.time_series_list[0].hourly_values, vec![0.0; 24]);
        assert_eq!(doc.receiver.eic, DEFAULT_RECEIVER_EIC);
        assert_eq!(doc.receiver.role_code, MarketRole::SystemOperator);
    }

    #[test]
    fn deserializes_json_body() {
        let json = r#"{
            "documentId": "ABC",
            "revisionNumber": 3,
            "processType": "A18",
            "sender": {"eic": "62X000000000001A", "roleCode": "A08"},
            "receiver": {"eic": "10X1001A1001A450", "roleCode": "A04"},
            "deliveryDate": "2025-06-01",
            "timeSeriesList": [{
                "inDomain": "10YUA-WEPS-----0",
                "outDomain": "10YHU-MAVIR----U",
                "counterpartyOutEIC": "15X-PARTNER-000X",
                "hourlyValues": [1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24]
            }]
        }"#;
        let doc: ScheduleDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.revision_number.get(), 3);
        assert_eq!(doc.process_type, ProcessType::Intraday);
        assert_eq!(doc.sender.role_code, MarketRole::Trader);
        let entry = &doc.time_series_list[0];
        assert!(entry.counterparty_in_eic.is_empty());
        assert_eq!(entry.counterparty_out_eic, "15X-PARTNER-000X");
        assert_eq!(entry.hourly_values[23], 24.0);
    }

    #[test]
    fn zero_revision_is_rejected_by_serde() {
        let json = r#"{
            "documentId": "ABC",
            "revisionNumber": 0,
            "sender": {"eic": "", "roleCode": "A01"},
            "receiver": {"eic": "", "roleCode": "A04"},
            "deliveryDate": "2025-06-01",
            "timeSeriesList": []
        }"#;
        assert!(serde_json::from_str::<ScheduleDocument>(json).is_err());
    }
}
