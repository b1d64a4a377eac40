//! Concentration cell normalization

use calamine::Data;

/// Reading below the standard curve
pub const BELOW_RANGE: &str = "<Min";

/// Reading above the standard curve
pub const ABOVE_RANGE: &str = ">Max";

/// Concentration could not be calculated; the raw value column is used instead
pub const NO_CALC: &str = "NoCalc";

/// Value written for [`BELOW_RANGE`] readings
pub const BELOW_RANGE_VALUE: f64 = 0.0;

/// Value written for [`ABOVE_RANGE`] readings
pub const ABOVE_RANGE_VALUE: f64 = 99.9;

/// Coerce a spreadsheet cell to a concentration
///
/// Returns `None` for anything that is not a number, a numeric string or one
/// of the range sentinels.
#[must_use]
pub fn normalize_concentration(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => value.is_finite().then_some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => match text.trim() {
            BELOW_RANGE => Some(BELOW_RANGE_VALUE),
            ABOVE_RANGE => Some(ABOVE_RANGE_VALUE),
            other => other.parse::<f64>().ok().filter(|value| value.is_finite()),
        },
        _ => None,
    }
}

/// Pick the concentration cell of a row, falling back to the raw value on `NoCalc`
#[must_use]
pub fn concentration_cell<'a>(concentration: &'a Data, raw_value: &'a Data) -> &'a Data {
    match concentration {
        Data::String(text) if text.trim() == NO_CALC => raw_value,
        _ => concentration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(normalize_concentration(&Data::Float(12.5)), Some(12.5));
        assert_eq!(normalize_concentration(&Data::Int(3)), Some(3.0));
        assert_eq!(normalize_concentration(&Data::String("4.25".to_owned())), Some(4.25));
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(normalize_concentration(&Data::String("<Min".to_owned())), Some(0.0));
        assert_eq!(normalize_concentration(&Data::String(">Max".to_owned())), Some(99.9));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(normalize_concentration(&Data::Empty), None);
        assert_eq!(normalize_concentration(&Data::Bool(true)), None);
        assert_eq!(normalize_concentration(&Data::String("NoCalc".to_owned())), None);
        assert_eq!(normalize_concentration(&Data::String("n/a".to_owned())), None);
        assert_eq!(normalize_concentration(&Data::String("NaN".to_owned())), None);
    }

    #[test]
    fn test_no_calc_falls_back_to_raw_value() {
        let raw = Data::Float(1.75);
        let no_calc = Data::String("NoCalc".to_owned());
        assert_eq!(concentration_cell(&no_calc, &raw), &raw);

        let value = Data::Float(2.0);
        assert_eq!(concentration_cell(&value, &raw), &value);
    }
}
