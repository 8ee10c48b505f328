//! Core-list expression parsing.
//!
//! A core-list expression is a comma-separated list of tokens, each either a
//! single core identifier or an inclusive range of two identifiers joined by a
//! hyphen. Identifiers are decimal, or hexadecimal with a `0x` prefix:
//!
//! ```text
//! 0,1,2,3
//! 0-10,20-18
//! 1,3,5-8,10,0x10-12
//! ```
//!
//! Values are deduplicated as they are collected; the first occurrence decides
//! the output position. A descending range is swapped before enumeration, so
//! `3-0` spans the same cores as `0-3`.

use crate::{Error, Result};

fn parse_core_id(token: &str, inherit_hex: bool) -> Result<(u32, bool)> {
    let token = token.trim_start();

    let (digits, hex) = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(digits) => (digits, true),
        None => (token, inherit_hex),
    };

    let radix = if hex { 16 } else { 10 };
    match u32::from_str_radix(digits, radix) {
        Ok(value) => Ok((value, hex)),
        Err(_) => Err(Error::invalid_config(format!(
            "cannot convert '{token}' to an unsigned number"
        ))),
    }
}

/// Converts a core-list expression into a deduplicated list of core ids.
///
/// At most `max` values are produced: once the limit is reached, parsing stops
/// and the values collected so far are returned without error, silently
/// dropping the rest of the expression. Empty tokens (as left by a trailing
/// comma) are skipped. A bare range end continues the radix of its start, so
/// `0x10-12` spans `0x10..=0x12`.
///
/// An empty or whitespace-only expression yields an empty list; that outcome
/// is distinct from a malformed token, which fails the whole parse.
pub fn parse_core_list(s: &str, max: usize) -> Result<Vec<u32>> {
    let mut cores: Vec<u32> = Vec::new();
    if max == 0 {
        return Ok(cores);
    }

    for token in s.split(',') {
        let token = token.trim_start();
        if token.is_empty() {
            continue;
        }

        if let Some((lo, hi)) = token.split_once('-') {
            let (mut start, start_hex) = parse_core_id(lo, false)?;
            let (mut end, _) = parse_core_id(hi, start_hex)?;
            if start > end {
                std::mem::swap(&mut start, &mut end);
            }
            for value in start..=end {
                if !cores.contains(&value) {
                    cores.push(value);
                }
                if cores.len() >= max {
                    return Ok(cores);
                }
            }
        } else {
            let (value, _) = parse_core_id(token, false)?;
            if !cores.contains(&value) {
                cores.push(value);
            }
            if cores.len() >= max {
                return Ok(cores);
            }
        }
    }

    Ok(cores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_list() {
        assert_eq!(parse_core_list("0,1,2,3", 64).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn parses_range() {
        assert_eq!(parse_core_list("0-3", 64).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn swaps_descending_range() {
        assert_eq!(parse_core_list("3-0", 64).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn mixes_singles_ranges_and_hex() {
        assert_eq!(
            parse_core_list("1,3,5-8,10,0x10-12", 64).unwrap(),
            vec![1, 3, 5, 6, 7, 8, 10, 16, 17, 18]
        );
    }

    #[test]
    fn range_end_continues_hex_radix() {
        assert_eq!(parse_core_list("0x10-0x12", 64).unwrap(), vec![16, 17, 18]);
        assert_eq!(parse_core_list("10-12", 64).unwrap(), vec![10, 11, 12]);
    }

    #[test]
    fn deduplicates_first_seen() {
        assert_eq!(parse_core_list("1,1,2", 64).unwrap(), vec![1, 2]);
        assert_eq!(parse_core_list("0-3,2-5", 64).unwrap(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(parse_core_list("", 64).unwrap().is_empty());
        assert!(parse_core_list("   ", 64).unwrap().is_empty());
        assert!(parse_core_list(",,", 64).unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_core_list("abc", 64).is_err());
        assert!(parse_core_list("1,abc", 64).is_err());
        assert!(parse_core_list("-3", 64).is_err());
        assert!(parse_core_list("1-2-3", 64).is_err());
        assert!(parse_core_list("1 2", 64).is_err());
    }

    #[test]
    fn skips_leading_whitespace_in_tokens() {
        assert_eq!(parse_core_list(" 1, 2, 3", 64).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_core_list("1- 3", 64).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn truncates_at_capacity_without_error() {
        assert_eq!(parse_core_list("0-100", 4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_core_list("0,1,2,3,4,5", 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn zero_capacity_yields_nothing() {
        assert!(parse_core_list("0-3", 0).unwrap().is_empty());
    }
}
