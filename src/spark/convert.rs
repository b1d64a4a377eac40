//! Concentration unit conversion

/// ng/µL to nM factor for double-stranded DNA (10^6 / 650 g/mol per bp)
pub const NG_PER_UL_TO_NM_FACTOR: f64 = 1538.4615;

/// Convert a ng/µL concentration to nM for the given fragment size in bp
#[must_use]
#[inline]
pub fn ng_per_ul_to_nm(concentration: f64, fragment_size: f64) -> f64 {
    (concentration * NG_PER_UL_TO_NM_FACTOR) / fragment_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fragment_size() {
        let nm = ng_per_ul_to_nm(10.0, 620.0);
        assert!((nm - 24.8139).abs() < 1e-3);
    }

    #[test]
    fn test_zero_concentration() {
        assert!(ng_per_ul_to_nm(0.0, 450.0).abs() < f64::EPSILON);
    }
}
