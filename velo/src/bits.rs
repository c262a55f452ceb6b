//! Bit-field extraction from 32-bit words.
//!
//! The graph files pack several fields into single words (out-degree and first
//! edge id, profile type and first sample index, elevation deltas). These
//! helpers pull a field out by shifting it to the top of the word and back
//! down again.

/// Extract the `length`-bit field starting at bit `start` of `value`,
/// sign-extending it.
///
/// # Panics
///
/// Panics if `start + length > 32`.
///
/// # Examples
///
/// ```
/// use velo::bits::extract_signed;
///
/// assert_eq!(extract_signed(0b1011_0000, 4, 4), -5);
/// assert_eq!(extract_signed(0b0111_0000, 4, 4), 7);
/// ```
pub fn extract_signed(value: i32, start: u32, length: u32) -> i32 {
    assert!(
        fits(start, length),
        "bit range of length {length} at {start} exceeds 32 bits"
    );
    if length == 0 {
        return 0;
    }
    (value << (32 - (start + length))) >> (32 - length)
}

/// Extract the `length`-bit field starting at bit `start` of `value`,
/// interpreting it as unsigned.
///
/// # Panics
///
/// Panics if `start + length > 32` or `length == 32`.
///
/// # Examples
///
/// ```
/// use velo::bits::extract_unsigned;
///
/// assert_eq!(extract_unsigned(0b1011_0000, 4, 4), 11);
/// assert_eq!(extract_unsigned(-1, 28, 4), 15);
/// ```
pub fn extract_unsigned(value: i32, start: u32, length: u32) -> u32 {
    assert!(
        fits(start, length) && length < 32,
        "bit range of length {length} at {start} is not a valid unsigned field"
    );
    if length == 0 {
        return 0;
    }
    ((value as u32) << (32 - (start + length))) >> (32 - length)
}

fn fits(start: u32, length: u32) -> bool {
    start.checked_add(length).is_some_and(|end| end <= 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: [i32; 6] = [0, -1, 0x1234_5678, i32::MIN, i32::MAX, -0x0F0F_0F10];

    #[test]
    fn test_unsigned_has_no_high_bits() {
        for value in WORDS {
            for start in 0..32 {
                for length in 1..(32 - start).min(31) + 1 {
                    let field = extract_unsigned(value, start, length);
                    assert_eq!(field >> length, 0, "value={value:#x} start={start}");
                }
            }
        }
    }

    #[test]
    fn test_signed_reembeds_original_bits() {
        for value in WORDS {
            for start in 0..32 {
                for length in 1..=(32 - start) {
                    let field = extract_signed(value, start, length);
                    let mask = if length == 32 {
                        u32::MAX
                    } else {
                        (1u32 << length) - 1
                    };
                    let original = ((value as u32) >> start) & mask;
                    assert_eq!(field as u32 & mask, original);
                    let reembedded = ((field as u32 & mask) << start) as i32;
                    assert_eq!(extract_signed(reembedded, start, length), field);
                }
            }
        }
    }

    #[test]
    fn test_packed_node_word() {
        let word = (5u32 << 28 | 1234) as i32;
        assert_eq!(extract_unsigned(word, 28, 4), 5);
        assert_eq!(extract_unsigned(word, 0, 28), 1234);
    }

    #[test]
    fn test_zero_length_field() {
        assert_eq!(extract_signed(-1, 0, 0), 0);
        assert_eq!(extract_unsigned(-1, 32, 0), 0);
    }

    #[test]
    fn test_full_width_signed() {
        assert_eq!(extract_signed(-42, 0, 32), -42);
    }

    #[test]
    #[should_panic]
    fn test_signed_range_too_long() {
        extract_signed(0, 30, 3);
    }

    #[test]
    #[should_panic(expected = "exceeds 32 bits")]
    fn test_signed_range_overflowing_start() {
        extract_signed(0, u32::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "not a valid unsigned field")]
    fn test_unsigned_range_overflowing_start() {
        extract_unsigned(0, u32::MAX - 1, 4);
    }

    #[test]
    #[should_panic]
    fn test_unsigned_full_width_rejected() {
        extract_unsigned(0, 0, 32);
    }
}
