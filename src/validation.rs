use rust_decimal::Decimal;
use thiserror::Error;

/// A measurement field outside its allowed range. Messages are part of the
/// API contract and surface verbatim in 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pH must be between 0 and 14")]
    PhOutOfRange,

    #[error("Water temperature must be between 0 and 100")]
    WaterTemperatureOutOfRange,

    #[error("TDS must be a positive value")]
    TdsNegative,
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::PhOutOfRange => "pH",
            ValidationError::WaterTemperatureOutOfRange => "water_temperature",
            ValidationError::TdsNegative => "TDS",
        }
    }
}

pub fn validate_ph(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::from(14) {
        return Err(ValidationError::PhOutOfRange);
    }
    Ok(())
}

pub fn validate_water_temperature(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err(ValidationError::WaterTemperatureOutOfRange);
    }
    Ok(())
}

pub fn validate_tds(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::TdsNegative);
    }
    Ok(())
}

/// Check whichever fields a write supplies, in field order, so the first
/// violated field is the one reported.
pub fn validate_measurement(
    ph: Option<Decimal>,
    water_temperature: Option<Decimal>,
    tds: Option<Decimal>,
) -> Result<(), ValidationError> {
    if let Some(value) = ph {
        validate_ph(value)?;
    }
    if let Some(value) = water_temperature {
        validate_water_temperature(value)?;
    }
    if let Some(value) = tds {
        validate_tds(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn ph_accepts_boundaries() {
        assert!(validate_ph(dec("0")).is_ok());
        assert!(validate_ph(dec("7.00")).is_ok());
        assert!(validate_ph(dec("14")).is_ok());
    }

    #[test]
    fn ph_rejects_out_of_range() {
        assert_eq!(validate_ph(dec("-0.01")), Err(ValidationError::PhOutOfRange));
        assert_eq!(validate_ph(dec("14.01")), Err(ValidationError::PhOutOfRange));
        assert_eq!(validate_ph(dec("15")), Err(ValidationError::PhOutOfRange));
    }

    #[test]
    fn water_temperature_range() {
        assert!(validate_water_temperature(dec("0")).is_ok());
        assert!(validate_water_temperature(dec("25.5")).is_ok());
        assert!(validate_water_temperature(dec("100")).is_ok());
        assert_eq!(
            validate_water_temperature(dec("100.01")),
            Err(ValidationError::WaterTemperatureOutOfRange)
        );
        assert_eq!(
            validate_water_temperature(dec("-1")),
            Err(ValidationError::WaterTemperatureOutOfRange)
        );
    }

    #[test]
    fn tds_must_be_non_negative() {
        assert!(validate_tds(dec("0")).is_ok());
        assert!(validate_tds(dec("800.0")).is_ok());
        assert_eq!(validate_tds(dec("-0.01")), Err(ValidationError::TdsNegative));
    }

    #[test]
    fn first_violated_field_wins() {
        // pH checked before TDS
        let err = validate_measurement(Some(dec("15")), Some(dec("25")), Some(dec("-1")));
        assert_eq!(err, Err(ValidationError::PhOutOfRange));

        let err = validate_measurement(Some(dec("7")), Some(dec("101")), Some(dec("-1")));
        assert_eq!(err, Err(ValidationError::WaterTemperatureOutOfRange));
    }

    #[test]
    fn absent_fields_are_skipped() {
        assert!(validate_measurement(None, None, Some(dec("10"))).is_ok());
        assert_eq!(
            validate_measurement(None, None, Some(dec("-10"))),
            Err(ValidationError::TdsNegative)
        );
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            ValidationError::PhOutOfRange.to_string(),
            "pH must be between 0 and 14"
        );
        assert_eq!(
            ValidationError::WaterTemperatureOutOfRange.to_string(),
            "Water temperature must be between 0 and 100"
        );
        assert_eq!(
            ValidationError::TdsNegative.to_string(),
            "TDS must be a positive value"
        );
    }
}
