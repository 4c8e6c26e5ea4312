use thiserror::Error;

use super::filter::{FilterSet, MANA_MAX_BOUND, MANA_MIN_BOUND};

/// 验证错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid page: {0} (must be at least 1)")]
    InvalidPage(i64),

    #[error("Invalid mana_min: {0} (must be at least 0)")]
    ManaMinTooLow(i64),

    #[error("Invalid mana_max: {0} (must be at most 20)")]
    ManaMaxTooHigh(i64),

    #[error("Invalid mana range: mana_min {min} is greater than mana_max {max}")]
    InvertedManaRange { min: i64, max: i64 },

    #[error("Invalid {field}: {value:?} (expected equal, greater or less)")]
    UnknownOperator { field: &'static str, value: String },
}

/// 验证器trait
pub trait Validator {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}

/// 始终生效的取值范围检查
impl Validator for FilterSet {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.mana_min < MANA_MIN_BOUND {
            return Err(ValidationError::ManaMinTooLow(self.mana_min));
        }
        if self.mana_max > MANA_MAX_BOUND {
            return Err(ValidationError::ManaMaxTooHigh(self.mana_max));
        }
        Ok(())
    }
}

/// 严格模式下额外的检查
pub fn validate_strict(filters: &FilterSet) -> Result<(), ValidationError> {
    filters.validate()?;
    if filters.mana_min > filters.mana_max {
        return Err(ValidationError::InvertedManaRange {
            min: filters.mana_min,
            max: filters.mana_max,
        });
    }
    Ok(())
}

pub fn validate_page(page: i64) -> Result<u32, ValidationError> {
    if page < 1 || page > i64::from(u32::MAX) {
        return Err(ValidationError::InvalidPage(page));
    }
    Ok(page as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_are_valid() {
        assert!(FilterSet::default().validate().is_ok());
        assert!(validate_strict(&FilterSet::default()).is_ok());
    }

    #[test]
    fn test_mana_bounds() {
        let filters = FilterSet { mana_min: -1, ..FilterSet::default() };
        assert_eq!(filters.validate(), Err(ValidationError::ManaMinTooLow(-1)));

        let filters = FilterSet { mana_max: 21, ..FilterSet::default() };
        assert_eq!(filters.validate(), Err(ValidationError::ManaMaxTooHigh(21)));

        let filters = FilterSet { mana_max: 20, ..FilterSet::default() };
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_only_rejected_in_strict_mode() {
        let filters = FilterSet { mana_min: 5, mana_max: 2, ..FilterSet::default() };
        assert!(filters.validate().is_ok());
        assert_eq!(
            validate_strict(&filters),
            Err(ValidationError::InvertedManaRange { min: 5, max: 2 })
        );
    }

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(1), Ok(1));
        assert_eq!(validate_page(0), Err(ValidationError::InvalidPage(0)));
        assert_eq!(validate_page(-3), Err(ValidationError::InvalidPage(-3)));
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::UnknownOperator { field: "power_operator", value: "weird".to_string() };
        assert_eq!(
            err.to_string(),
            "Invalid power_operator: \"weird\" (expected equal, greater or less)"
        );
        assert_eq!(
            ValidationError::ManaMaxTooHigh(25).to_string(),
            "Invalid mana_max: 25 (must be at most 20)"
        );
    }
}
