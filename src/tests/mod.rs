use crate::api::{decode_clear, decode_predict, decode_records, ApiError, CLEAR_FALLBACK_MESSAGE};
use crate::flow::Flow;
use crate::record::{Prediction, PredictionRecord};

#[test]
fn predict_response_decodes_the_class() {
    assert_eq!(
        decode_predict(200, br#"{"prediction":1}"#).unwrap(),
        Prediction::Malignant
    );
    assert_eq!(
        decode_predict(200, br#"{"prediction":0}"#).unwrap(),
        Prediction::Benign
    );
}

#[test]
fn predict_response_without_a_class_stays_unknown() {
    assert_eq!(decode_predict(200, b"{}").unwrap(), Prediction::Unknown);
    assert_eq!(
        decode_predict(200, br#"{"prediction":null}"#).unwrap(),
        Prediction::Unknown
    );
}

#[test]
fn predict_error_field_wins_even_on_success_status() {
    let err = decode_predict(200, br#"{"error":"bad input"}"#).unwrap_err();
    assert_eq!(err.to_string(), "bad input");
}

#[test]
fn predict_failure_status_prefers_the_body_error() {
    let err = decode_predict(500, br#"{"error":"scaler rejected the input"}"#).unwrap_err();
    assert_eq!(err.to_string(), "scaler rejected the input");

    let err = decode_predict(500, b"<html>oops</html>").unwrap_err();
    assert_eq!(err.to_string(), "server error: 500");
}

#[test]
fn predict_malformed_success_body_is_reported_with_the_status() {
    let err = decode_predict(200, b"not json").unwrap_err();
    assert!(matches!(err, ApiError::MalformedBody { status: 200 }));
    assert_eq!(err.to_string(), "server error: 200: malformed response body");
}

#[test]
fn records_decode_with_missing_numeric_fields() {
    let body = br#"[
        {"id":1,"username":"ada","mean_radius":17.99,"prediction":1},
        {"id":2,"username":null,"worst_area":null,"prediction":0},
        {"id":3}
    ]"#;
    let records = decode_records(200, body).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].prediction, Prediction::Malignant);
    assert_eq!(records[1].prediction, Prediction::Benign);
    assert_eq!(records[1].username, None);
    assert_eq!(records[2].prediction, Prediction::Unknown);
}

#[test]
fn records_failure_carries_the_status() {
    let err = decode_records(503, b"").unwrap_err();
    assert_eq!(err.to_string(), "server error: 503");
    assert!(decode_records(200, b"{}").is_err());
}

#[test]
fn clear_success_prefers_the_server_message() {
    let message = decode_clear(200, br#"{"message":"Database cleared successfully"}"#).unwrap();
    assert_eq!(message, "Database cleared successfully");
    assert_eq!(decode_clear(200, b"{}").unwrap(), CLEAR_FALLBACK_MESSAGE);
}

#[test]
fn clear_failure_is_an_error() {
    assert!(decode_clear(500, b"").is_err());
    assert!(decode_clear(200, b"not json").is_err());
    let err = decode_clear(500, br#"{"error":"database is locked"}"#).unwrap_err();
    assert_eq!(err.to_string(), "database is locked");
}

fn loaded_listing() -> Flow<Vec<PredictionRecord>> {
    let mut records: Flow<Vec<PredictionRecord>> = Flow::new();
    let token = records.start();
    records.resolve(
        token,
        Ok(vec![PredictionRecord {
            username: Some("ada".to_string()),
            mean_radius: Some(17.99),
            prediction: Prediction::Malignant,
            ..Default::default()
        }]),
    );
    records
}

#[test]
fn failed_clear_leaves_the_loaded_table_unchanged() {
    let records = loaded_listing();
    let before = crate::output::render_table_text(records.loaded().unwrap());

    // the clear flow fails on its own; the listing is never restarted
    let mut clear: Flow<String> = Flow::new();
    let token = clear.start();
    assert!(clear.resolve(token, Err("server error: 500".to_string())));

    let after = crate::output::render_table_text(records.loaded().unwrap());
    assert_eq!(before, after);
    assert_eq!(records.loaded().unwrap().len(), 1);
}

#[test]
fn stale_listing_cannot_overwrite_a_refreshed_view() {
    let mut records = loaded_listing();
    let stale = records.start();
    // a clear succeeded meanwhile, so the refresh starts a new generation
    let refresh = records.start();
    assert!(!records.resolve(stale, Ok(vec![PredictionRecord::default()])));
    assert!(records.resolve(refresh, Ok(Vec::new())));
    let rendered = crate::output::render_table_text(records.loaded().unwrap());
    assert!(rendered.contains("No records found"));
}

#[test]
fn config_file_parses_from_yaml() {
    let cfg: crate::config::ConfigFile = serde_yaml::from_str(
        r#"
base_url: http://api.local:5000
timeout: 30
output_format: html
no_color: true
"#,
    )
    .unwrap();
    assert_eq!(cfg.base_url.as_deref(), Some("http://api.local:5000"));
    assert_eq!(cfg.timeout, Some(30));
    assert_eq!(cfg.output_format.as_deref(), Some("html"));
    assert_eq!(cfg.no_color, Some(true));
}

#[test]
fn transport_errors_render_through_the_same_path() {
    // every ApiError variant collapses into one displayable message
    let status = ApiError::Status { status: 404 };
    let application = ApiError::Application {
        message: "bad input".to_string(),
    };
    assert_eq!(status.to_string(), "server error: 404");
    assert_eq!(application.to_string(), "bad input");
}
