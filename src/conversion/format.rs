//! Display formatting for amounts
//!
//! Rounding follows the half-up rule of the calculator UI, and numbers render
//! without a trailing ".0".

use super::units::{Unit, G_PER_LB, ML_PER_CUP};

/// Fixed grams-to-tablespoon divisor for the "~N tbsp" hint. It ignores the
/// ingredient's density.
pub const GRAMS_PER_TBSP_APPROX: f64 = 14.7868;

/// Round to the nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to a number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Render a number the way the calculator displays it: "2", "2.5", never "-0"
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Format an amount with its unit label and at most one helper annotation
///
/// Examples:
/// - (3.4, pieces) -> "3 pieces"
/// - (1000, grams) -> "1000 g (2.2 lbs)"
/// - (500, milliliters) -> "500 ml (2.11 cups)"
/// - (30, grams) -> "30 g (~2 tbsp)"
pub fn format_amount(amount: f64, unit: Unit) -> String {
    if unit == Unit::Pieces {
        return format!("{} {}", format_number(round_half_up(amount)), unit.abbreviation());
    }

    let rounded = round_to(amount, 2);

    // The pounds threshold is checked before the tablespoon hint
    if unit == Unit::Grams && rounded > 453.0 {
        let pounds = rounded / G_PER_LB;
        return format!(
            "{} g ({} lbs)",
            format_number(rounded),
            format_number(round_to(pounds, 2))
        );
    }

    if unit == Unit::Milliliters && rounded > 236.0 {
        let cups = rounded / ML_PER_CUP;
        return format!(
            "{} ml ({} cups)",
            format_number(rounded),
            format_number(round_to(cups, 2))
        );
    }

    if unit == Unit::Grams && rounded >= 15.0 {
        let tbsp = rounded / GRAMS_PER_TBSP_APPROX;
        if tbsp >= 1.0 {
            return format!(
                "{} g (~{} tbsp)",
                format_number(rounded),
                format_number(round_half_up(tbsp))
            );
        }
    }

    format!("{} {}", format_number(rounded), unit.abbreviation())
}

/// Rounding used by the standalone converter: more decimals for small values
pub fn round_for_display(value: f64) -> f64 {
    if value < 1.0 {
        round_to(value, 3)
    } else if value < 100.0 {
        round_to(value, 2)
    } else {
        round_half_up(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to(0.15, 1), 0.2);
        assert_eq!(round_to(2.20462, 2), 2.2);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(2.25), "2.25");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_pieces_are_whole() {
        assert_eq!(format_amount(3.4, Unit::Pieces), "3 pieces");
        assert_eq!(format_amount(2.5, Unit::Pieces), "3 pieces");
        assert_eq!(format_amount(0.2, Unit::Pieces), "0 pieces");
        for x in [0.1, 1.49, 7.77, 12.5001] {
            let s = format_amount(x, Unit::Pieces);
            let number = s.trim_end_matches(" pieces");
            assert!(number.parse::<i64>().is_ok(), "{}", s);
        }
    }

    #[test]
    fn test_grams_pounds_annotation() {
        assert_eq!(format_amount(1000.0, Unit::Grams), "1000 g (2.2 lbs)");
        assert_eq!(format_amount(453.5, Unit::Grams), "453.5 g (1 lbs)");
    }

    #[test]
    fn test_grams_tablespoon_annotation() {
        assert_eq!(format_amount(30.0, Unit::Grams), "30 g (~2 tbsp)");
        assert_eq!(format_amount(15.0, Unit::Grams), "15 g (~1 tbsp)");
        // exactly 453 is under the pounds threshold
        assert_eq!(format_amount(453.0, Unit::Grams), "453 g (~31 tbsp)");
    }

    #[test]
    fn test_small_grams_plain() {
        assert_eq!(format_amount(14.996, Unit::Grams), "15 g (~1 tbsp)");
        assert_eq!(format_amount(14.99, Unit::Grams), "14.99 g");
        assert_eq!(format_amount(5.0, Unit::Grams), "5 g");
    }

    #[test]
    fn test_milliliters_cups_annotation() {
        assert_eq!(format_amount(500.0, Unit::Milliliters), "500 ml (2.11 cups)");
        assert_eq!(format_amount(236.0, Unit::Milliliters), "236 ml");
    }

    #[test]
    fn test_other_units_plain() {
        assert_eq!(format_amount(1.333333, Unit::Cups), "1.33 cups");
        assert_eq!(format_amount(2.0, Unit::Teaspoons), "2 tsp");
        assert_eq!(format_amount(0.5, Unit::Tablespoons), "0.5 tbsp");
        assert_eq!(format_amount(600.0, Unit::Ounces), "600 oz");
        assert_eq!(format_amount(1.256, Unit::Pounds), "1.26 lbs");
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(0.12345), 0.123);
        assert_eq!(round_for_display(12.3456), 12.35);
        assert_eq!(round_for_display(236.588), 237.0);
    }
}
