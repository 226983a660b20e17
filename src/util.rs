use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};

/// Compares strings treating runs of ASCII digits as numbers, so that
/// "Unit2" sorts before "Unit10". Non-digit runs compare case-insensitively
/// first, falling back to a plain comparison to keep the order total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for pair in left.iter().zip_longest(right.iter()) {
        let ord = match pair {
            EitherOrBoth::Both(l, r) => compare_chunk(l, r),
            EitherOrBoth::Left(_) => Ordering::Greater,
            EitherOrBoth::Right(_) => Ordering::Less,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.cmp(b)
}

fn chunks(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_digit = None;

    for (idx, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        if prev_digit.is_some_and(|p| p != digit) {
            out.push(&s[start..idx]);
            start = idx;
        }
        prev_digit = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

fn compare_chunk(l: &str, r: &str) -> Ordering {
    let l_digits = l.bytes().all(|b| b.is_ascii_digit());
    let r_digits = r.bytes().all(|b| b.is_ascii_digit());

    match (l_digits, r_digits) {
        (true, true) => {
            let l_trim = l.trim_start_matches('0');
            let r_trim = r.trim_start_matches('0');
            l_trim
                .len()
                .cmp(&r_trim.len())
                .then_with(|| l_trim.cmp(r_trim))
        }
        // digits sort ahead of letters
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => l.to_lowercase().cmp(&r.to_lowercase()),
    }
}
