//! Constants and display helpers shared by both solvers.

/// Compounding periods (and payments) per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Renders a solved value with exactly two decimal places.
///
/// Rounding works on the binary value, the same as C's `%.2f`: a literal
/// such as `2.675` is stored slightly below the midpoint and renders as
/// `2.67`. Non-finite values are printed as-is so a degenerate input stays
/// visible instead of turning into a number.
///
/// # Examples
///
/// ```
/// use finance_core::calculations::common::format_two_places;
///
/// assert_eq!(format_two_places(536.8216), "536.82");
/// assert_eq!(format_two_places(1000.0), "1000.00");
/// assert_eq!(format_two_places(2.675), "2.67");
/// assert_eq!(format_two_places(f64::INFINITY), "inf");
/// ```
pub fn format_two_places(value: f64) -> String {
    format!("{value:.2}")
}

/// Converts a nominal annual rate in percent to the monthly decimal rate.
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / MONTHS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_two_places_pads_whole_numbers() {
        assert_eq!(format_two_places(42.0), "42.00");
    }

    #[test]
    fn format_two_places_rounds_to_cents() {
        assert_eq!(format_two_places(1628.894626777442), "1628.89");
    }

    #[test]
    fn format_two_places_rounds_the_stored_binary_value() {
        assert_eq!(format_two_places(2.675), "2.67");
        assert_eq!(format_two_places(1.005), "1.00");
        assert_eq!(format_two_places(0.125), "0.12");
    }

    #[test]
    fn format_two_places_keeps_sign() {
        assert_eq!(format_two_places(-12.5), "-12.50");
    }

    #[test]
    fn format_two_places_surfaces_non_finite_values() {
        assert_eq!(format_two_places(f64::INFINITY), "inf");
        assert_eq!(format_two_places(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_two_places(f64::NAN), "NaN");
    }

    #[test]
    fn monthly_rate_divides_percent_by_twelve_hundred() {
        assert!((monthly_rate(6.0) - 0.005).abs() < 1e-15);
    }
}
