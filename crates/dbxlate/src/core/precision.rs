//! Bit-width / decimal-digit conversions.
//!
//! Engines disagree on how they size numbers: DB2 and PostgreSQL describe
//! integers by bit width, Oracle and most `DECIMAL` types by decimal digits,
//! IEEE floats by a base-2 exponent range and Oracle `NUMBER` by a base-10
//! one. Every importer and generator converts through this module so that the
//! rounding policy is identical across dialects.
//!
//! All conversions round outward: the converted magnitude or exponent range is
//! never narrower than the original, so routing a value through an
//! intermediate representation cannot truncate it.

/// log10(2), the number of decimal digits carried by one bit.
pub const LOG10_2: f64 = std::f64::consts::LOG10_2;

/// Decimal digits needed to hold a `bits`-wide magnitude.
pub fn bits_to_digits(bits: u32) -> u32 {
    (f64::from(bits) * LOG10_2).ceil() as u32
}

/// Bits needed to hold a `digits`-wide decimal magnitude.
pub fn digits_to_bits(digits: u32) -> u32 {
    (f64::from(digits) / LOG10_2).ceil() as u32
}

/// Convert a fractional scale expressed in bits to decimal digits.
///
/// Negative scales round toward zero, which keeps more of the value.
pub fn scale_bits_to_digits(scale: i32) -> i32 {
    (f64::from(scale) * LOG10_2).ceil() as i32
}

/// Convert a fractional scale expressed in decimal digits to bits.
pub fn scale_digits_to_bits(scale: i32) -> i32 {
    (f64::from(scale) / LOG10_2).ceil() as i32
}

/// Convert a base-2 exponent range to base 10.
///
/// The lower bound moves away from zero (`-ceil(-min)`), the upper bound
/// rounds up, so the result covers at least the original range.
pub fn exp2_to_exp10(min_exp: i32, max_exp: i32) -> (i32, i32) {
    let min = -(-f64::from(min_exp) * LOG10_2).ceil();
    let max = (f64::from(max_exp) * LOG10_2).ceil();
    (min as i32, max as i32)
}

/// Convert a base-10 exponent range to base 2.
pub fn exp10_to_exp2(min_exp: i32, max_exp: i32) -> (i32, i32) {
    let min = -(-f64::from(min_exp) / LOG10_2).ceil();
    let max = (f64::from(max_exp) / LOG10_2).ceil();
    (min as i32, max as i32)
}

/// Normalize a magnitude to bits, whatever unit it was reported in.
pub fn as_bits(size: u32, in_bits: bool) -> u32 {
    if in_bits {
        size
    } else {
        digits_to_bits(size)
    }
}

/// Normalize a magnitude to decimal digits, whatever unit it was reported in.
pub fn as_digits(size: u32, in_bits: bool) -> u32 {
    if in_bits {
        bits_to_digits(size)
    } else {
        size
    }
}

/// Normalize a scale to decimal digits.
pub fn scale_as_digits(scale: i32, in_bits: bool) -> i32 {
    if in_bits {
        scale_bits_to_digits(scale)
    } else {
        scale
    }
}

/// Normalize an exponent range to base 2.
pub fn exponents_as_base2(min_exp: i32, max_exp: i32, exp_of_2: bool) -> (i32, i32) {
    if exp_of_2 {
        (min_exp, max_exp)
    } else {
        exp10_to_exp2(min_exp, max_exp)
    }
}

/// Normalize an exponent range to base 10.
pub fn exponents_as_base10(min_exp: i32, max_exp: i32, exp_of_2: bool) -> (i32, i32) {
    if exp_of_2 {
        exp2_to_exp10(min_exp, max_exp)
    } else {
        (min_exp, max_exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_to_digits() {
        assert_eq!(bits_to_digits(0), 0);
        assert_eq!(bits_to_digits(1), 1);
        assert_eq!(bits_to_digits(16), 5);
        assert_eq!(bits_to_digits(32), 10);
        assert_eq!(bits_to_digits(53), 16);
        assert_eq!(bits_to_digits(64), 20);
    }

    #[test]
    fn test_digits_to_bits() {
        assert_eq!(digits_to_bits(5), 17);
        assert_eq!(digits_to_bits(10), 34);
        assert_eq!(digits_to_bits(38), 127);
    }

    #[test]
    fn test_round_trip_never_narrows() {
        for bits in [16u32, 32, 64] {
            let back = digits_to_bits(bits_to_digits(bits));
            assert!(back >= bits, "{} bits came back as {}", bits, back);
        }
        for digits in 1u32..=40 {
            assert!(bits_to_digits(digits_to_bits(digits)) >= digits);
        }
    }

    #[test]
    fn test_scale_conversion_rounds_toward_more_precision() {
        assert_eq!(scale_bits_to_digits(8), 3);
        assert_eq!(scale_digits_to_bits(2), 7);
        assert_eq!(scale_bits_to_digits(-8), -2);
    }

    #[test]
    fn test_exponent_ranges_widen() {
        // IEEE double
        assert_eq!(exp2_to_exp10(-1022, 1023), (-308, 308));
        // Oracle NUMBER
        assert_eq!(exp10_to_exp2(-130, 125), (-432, 416));

        let (min2, max2) = exp10_to_exp2(-130, 125);
        let (min10, max10) = exp2_to_exp10(min2, max2);
        assert!(min10 <= -130);
        assert!(max10 >= 125);
    }

    #[test]
    fn test_extreme_exponents_do_not_overflow() {
        assert_eq!(exp2_to_exp10(i32::MIN, i32::MAX), (-646_456_994, 646_456_993));
        // Out of range in base 2; the cast saturates.
        assert_eq!(exp10_to_exp2(i32::MIN, i32::MAX), (i32::MIN, i32::MAX));
    }

    #[test]
    fn test_unit_normalizers() {
        assert_eq!(as_bits(16, true), 16);
        assert_eq!(as_bits(5, false), 17);
        assert_eq!(as_digits(64, true), 20);
        assert_eq!(as_digits(7, false), 7);
        assert_eq!(scale_as_digits(2, false), 2);
        assert_eq!(exponents_as_base2(-126, 127, true), (-126, 127));
        assert_eq!(exponents_as_base10(-126, 127, true), (-38, 39));
    }
}
