use serde::{Deserialize, Serialize};

/// A hearing as returned by `SearchHearingsByCourtFileNumber`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hearing {
    pub id: String,
    pub court_file_number: String,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default)]
    pub lawyer: Option<String>,
    #[serde(default)]
    pub hearing_type: Option<String>,
    pub date_time: String,
    pub date_time_offset: String,
    #[serde(default)]
    pub court: Option<Court>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub name: String,
    #[serde(default)]
    pub court_branch: Option<String>,
    #[serde(default)]
    pub court_type: Option<String>,
}

impl Hearing {
    /// The bookmark payload for this hearing. Freshly bookmarked hearings start read.
    pub fn to_record(&self) -> HearingRecord {
        HearingRecord {
            id: self.id.clone(),
            court_file_number: self.court_file_number.clone(),
            unread: false,
        }
    }

    pub fn display_type(&self) -> &str {
        self.hearing_type.as_deref().unwrap_or("(Unknown hearing type)")
    }
}

/// Identity of a bookmarked hearing, as sent to `AddHearings` and cached locally.
///
/// Many records share one court file number. Only `unread` changes after the
/// record is fetched, and only through the viewed-marking path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingRecord {
    pub id: String,
    pub court_file_number: String,
    pub unread: bool,
}

impl HearingRecord {
    pub fn new(id: impl Into<String>, court_file_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            court_file_number: court_file_number.into(),
            unread: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEARING_JSON: &str = r#"{
        "id": "h-1",
        "courtFileNumber": "CF-1234",
        "partyName": "Doe, Jane",
        "lawyer": "Smith, John",
        "hearingType": "Motion",
        "dateTime": "2020-01-15T03:15:00Z",
        "dateTimeOffset": "-0500",
        "court": { "name": "Toronto Courthouse", "courtBranch": "P", "courtType": "S", "locations": [] }
    }"#;

    #[test]
    fn test_deserialize_graphql_hearing() {
        let hearing: Hearing = serde_json::from_str(HEARING_JSON).unwrap();
        assert_eq!(hearing.id, "h-1");
        assert_eq!(hearing.court_file_number, "CF-1234");
        assert_eq!(hearing.date_time_offset, "-0500");
        let court = hearing.court.unwrap();
        assert_eq!(court.name, "Toronto Courthouse");
        assert_eq!(court.court_branch.as_deref(), Some("P"));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let hearing: Hearing = serde_json::from_str(
            r#"{"id":"h-2","courtFileNumber":"CF-9","dateTime":"2020-01-15T03:15:00Z","dateTimeOffset":"+0000"}"#,
        )
        .unwrap();
        assert!(hearing.party_name.is_none());
        assert!(hearing.court.is_none());
        assert_eq!(hearing.display_type(), "(Unknown hearing type)");
    }

    #[test]
    fn test_to_record_starts_read() {
        let hearing: Hearing = serde_json::from_str(HEARING_JSON).unwrap();
        let record = hearing.to_record();
        assert_eq!(record, HearingRecord::new("h-1", "CF-1234"));
        assert!(!record.unread);
    }

    #[test]
    fn test_record_serializes_as_graphql_input() {
        let record = HearingRecord::new("h-1", "CF-1234");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "h-1", "courtFileNumber": "CF-1234", "unread": false})
        );
    }
}
