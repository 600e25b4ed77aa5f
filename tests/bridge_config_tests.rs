use chart_bridge::BridgeError;
use chart_bridge::api::{BridgeConfig, OutOfRangeInsert};
use chart_bridge::core::JsonOptions;

#[test]
fn defaults_match_host_conventions() {
    let config = BridgeConfig::default();
    assert_eq!(config.out_of_range_insert, OutOfRangeInsert::AppendAtEnd);
    assert_eq!(config.json_indent, 3);
    assert_eq!(config.json_max_depth, 64);
    assert_eq!(
        config.compact_json_options(),
        JsonOptions {
            indent: 0,
            max_depth: 64
        }
    );
}

#[test]
fn partial_payload_fills_in_defaults() {
    let config = BridgeConfig::from_json_str(r#"{"out_of_range_insert":"reject"}"#)
        .expect("valid config");
    assert_eq!(config.out_of_range_insert, OutOfRangeInsert::Reject);
    assert_eq!(config.json_indent, 3);
    assert_eq!(config.json_max_depth, 64);
}

#[test]
fn pretty_json_round_trips() {
    let config = BridgeConfig::default()
        .with_out_of_range_insert(OutOfRangeInsert::Reject)
        .with_json_indent(2)
        .with_json_max_depth(8);
    let payload = config.to_json_pretty().expect("serialize");
    assert!(payload.contains("\"reject\""));
    assert_eq!(BridgeConfig::from_json_str(&payload).expect("parse"), config);
}

#[test]
fn invalid_limits_are_rejected() {
    let err = BridgeConfig::from_json_str(r#"{"json_max_depth":0}"#).expect_err("zero depth");
    assert!(matches!(err, BridgeError::InvalidData(message) if message.contains("json_max_depth")));

    let err = BridgeConfig::default()
        .with_json_indent(11)
        .validate()
        .expect_err("indent too wide");
    assert!(matches!(err, BridgeError::InvalidData(_)));
}

#[test]
fn malformed_payload_is_invalid_data() {
    let err = BridgeConfig::from_json_str("{not json").expect_err("malformed");
    assert!(matches!(err, BridgeError::InvalidData(message) if message.starts_with("failed to parse bridge config")));
}
