//! # Numerology Helpers
//!
//! Pure symbolic-content collaborators: digit reduction, date arithmetic,
//! and a letter-value lookup over the graph.
//!
//! These functions never participate in the module manager state machine.
//! [`word_value`] is the only one that reads the graph, and it reads only
//! `Letter` payloads.

use crate::graph::Graph;
use crate::{NodeId, Payload};

/// Master numbers that digit reduction stops at.
const MASTER_NUMBERS: [u64; 2] = [11, 22];

/// Repeatedly sum decimal digits until a single digit remains.
///
/// The master numbers 11 and 22 are preserved rather than reduced further.
#[must_use]
pub fn reduce(mut n: u64) -> u64 {
    while n > 9 && !MASTER_NUMBERS.contains(&n) {
        n = digit_sum(n);
    }
    n
}

/// Sum of the decimal digits of `n`.
#[must_use]
pub fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Digit-reduction arithmetic over a calendar date.
///
/// Each component is reduced independently before the final reduction, so
/// master numbers inside a component survive into the sum.
#[must_use]
pub fn date_number(year: u64, month: u64, day: u64) -> u64 {
    reduce(reduce(year) + reduce(month) + reduce(day))
}

/// Checksum-like value of a word, summing per-letter values read from the
/// graph's `Letter` payloads.
///
/// Whitespace is skipped. Returns `None` when any other character has no
/// letter node or its node carries no letter payload.
#[must_use]
pub fn word_value(graph: &Graph, word: &str) -> Option<i64> {
    let mut total = 0i64;
    for glyph in word.chars() {
        if glyph.is_whitespace() {
            continue;
        }
        let node = graph.node(&NodeId::letter(glyph))?;
        match node.payload {
            Some(Payload::Letter { value, .. }) => total = total.saturating_add(value),
            _ => return None,
        }
    }
    Some(total)
}

// =============================================================================
// TESTS
// =============================================================================
