use serde::{Deserialize, Deserializer, Serialize};

/// Request body for POST /chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply envelope: a human-readable summary plus optional listing cards.
///
/// Both fields are optional on the wire. A guidance reply ("please provide
/// city, BHK and budget") carries no `results` key at all, which is not the
/// same thing as an empty list — the client treats both as "no cards".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Listing>>,
}

/// One property card describing a project configuration matched by the search.
///
/// Field values are opaque display strings. Historical payloads carried `bhk`
/// and `price` as either JSON strings or numbers, so those decode through
/// [`display_string`] instead of failing on a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "display_string")]
    pub project_name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub bhk: String,
    #[serde(default, deserialize_with = "display_string")]
    pub city: String,
    #[serde(default, deserialize_with = "display_string")]
    pub price: String,
    #[serde(default, deserialize_with = "display_string")]
    pub status: String,
    #[serde(default, deserialize_with = "display_string")]
    pub amenities: String,
    /// Relative project page link. Emitted by the server, not rendered on cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Accept a JSON string or any scalar and carry it as its display form.
fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_from_empty_object() {
        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.message.is_none());
        assert!(resp.results.is_none());
    }

    #[test]
    fn empty_results_stay_distinct_from_absent() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"message":"Found 0","results":[]}"#).unwrap();
        assert_eq!(resp.message.as_deref(), Some("Found 0"));
        assert_eq!(resp.results, Some(vec![]));
    }

    #[test]
    fn listing_accepts_numeric_bhk_and_price() {
        let listing: Listing = serde_json::from_str(
            r#"{"projectName":"Skyline","bhk":3,"city":"Pune","price":11000000,"status":"Ready","amenities":"Gym"}"#,
        )
        .unwrap();
        assert_eq!(listing.project_name, "Skyline");
        assert_eq!(listing.bhk, "3");
        assert_eq!(listing.price, "11000000");
    }

    #[test]
    fn listing_serializes_camel_case() {
        let listing = Listing {
            project_name: "Skyline".into(),
            bhk: "3".into(),
            city: "Pune".into(),
            price: "₹1.10 Cr".into(),
            status: "Ready".into(),
            amenities: "Gym".into(),
            url: Some("/project/skyline".into()),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["projectName"], "Skyline");
        assert_eq!(json["bhk"], "3");
        assert!(json.get("project_name").is_none());
    }

    #[test]
    fn listing_tolerates_missing_fields() {
        let listing: Listing = serde_json::from_str(r#"{"projectName":"Skyline"}"#).unwrap();
        assert_eq!(listing.project_name, "Skyline");
        assert_eq!(listing.bhk, "");
        assert!(listing.url.is_none());
    }

    #[test]
    fn unknown_extra_fields_are_ignored_on_decode() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"message":"Found 1","results":[{"projectName":"Skyline","score":0.93}],"totalResults":1}"#,
        )
        .unwrap();
        assert_eq!(resp.message.as_deref(), Some("Found 1"));
        let results = resp.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].project_name, "Skyline");
    }
}
