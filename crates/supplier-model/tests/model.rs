//! Tests for supplier-model types.

use supplier_model::{MatchConfig, ModelError, RegistryEntry, Scorer, Threshold};

#[test]
fn threshold_parses_from_text() {
    let threshold: Threshold = " 95 ".parse().expect("parse threshold");
    assert_eq!(threshold.value(), 95.0);
    assert_eq!(
        "high".parse::<Threshold>(),
        Err(ModelError::InvalidThreshold("high".to_string()))
    );
    assert!("101".parse::<Threshold>().is_err());
}

#[test]
fn match_config_serializes() {
    let config = MatchConfig::new(Threshold::new(90.0).unwrap(), Scorer::TokenSort);
    let json = serde_json::to_string(&config).expect("serialize config");
    assert_eq!(json, r#"{"threshold":90.0,"scorer":"token-sort"}"#);
    let round: MatchConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(round, config);
}

#[test]
fn match_config_from_toml_defaults_scorer() {
    let config: MatchConfig = toml::from_str("threshold = 95").expect("parse toml");
    assert_eq!(config.threshold.value(), 95.0);
    assert_eq!(config.scorer, Scorer::TokenSet);
}

#[test]
fn match_config_rejects_out_of_range_threshold() {
    let parsed: Result<MatchConfig, _> = toml::from_str("threshold = 120\nscorer = \"token-set\"");
    let error = parsed.expect_err("threshold above 100 must fail");
    assert!(error.to_string().contains("invalid threshold"));
}

#[test]
fn blank_registry_names() {
    assert!(RegistryEntry::new("UP001", "   ").has_blank_name());
    assert!(RegistryEntry::new("UP001", "").has_blank_name());
    assert!(!RegistryEntry::new("UP001", "ABC").has_blank_name());
}
