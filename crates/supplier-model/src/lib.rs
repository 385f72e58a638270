pub mod config;
pub mod entry;
pub mod error;
pub mod ledger;

pub use config::{MatchConfig, Scorer, Threshold};
pub use entry::RegistryEntry;
pub use error::{ModelError, Result};
pub use ledger::LedgerRow;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_bounds() {
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(100.0).is_ok());
        assert!(Threshold::new(90.5).is_ok());
        assert_eq!(
            Threshold::new(100.5),
            Err(ModelError::InvalidThreshold("100.5".to_string()))
        );
        assert!(Threshold::new(-1.0).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn threshold_accepts_at_boundary() {
        let threshold = Threshold::new(90.0).unwrap();
        assert!(threshold.accepts(90.0));
        assert!(threshold.accepts(100.0));
        assert!(!threshold.accepts(89.0));
    }

    #[test]
    fn scorer_parses_both_spellings() {
        assert_eq!("token-set".parse::<Scorer>().unwrap(), Scorer::TokenSet);
        assert_eq!("TOKEN_SORT".parse::<Scorer>().unwrap(), Scorer::TokenSort);
        assert!("ratio".parse::<Scorer>().is_err());
    }

    #[test]
    fn ledger_row_keeps_cells_when_resolved() {
        let row = LedgerRow::new(
            Some("ABC SDN BHD".to_string()),
            vec!["A-1".to_string(), "ABC SDN BHD".to_string()],
        );
        let resolved = row.with_resolved_code("UP001".to_string());
        assert!(resolved.is_resolved());
        assert!(!row.is_resolved());
        assert_eq!(resolved.cells, row.cells);
        assert_eq!(resolved.supplier_name(), Some("ABC SDN BHD"));
    }
}
