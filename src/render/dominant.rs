//! Dominant colour selection.

use std::collections::HashMap;

use crate::types::Colour;

/// Most frequent colour among `samples`, grouping by exact RGB.
///
/// Alpha is ignored for grouping; the returned colour is the first sample
/// of the winning group, alpha included. When groups tie, the one whose
/// first sample appears earliest wins. Returns `None` for no samples.
pub fn dominant(samples: &[Colour]) -> Option<Colour> {
    // rgb -> (index of first occurrence, count)
    let mut groups: HashMap<[u8; 3], (usize, usize)> = HashMap::new();

    for (i, colour) in samples.iter().enumerate() {
        groups.entry(colour.rgb_key()).or_insert((i, 0)).1 += 1;
    }

    groups
        .into_values()
        .max_by(|(first_a, count_a), (first_b, count_b)| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(first, _)| samples[first])
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Colour = Colour::rgb(200, 10, 10);
    const B: Colour = Colour::rgb(10, 10, 200);

    #[test]
    fn test_empty() {
        assert_eq!(dominant(&[]), None);
    }

    #[test]
    fn test_majority_wins_in_any_order() {
        let orders: [[Colour; 7]; 4] = [
            [A, A, A, A, A, B, B],
            [B, B, A, A, A, A, A],
            [A, B, A, B, A, A, A],
            [B, A, A, A, B, A, A],
        ];

        for order in &orders {
            assert_eq!(dominant(order), Some(A));
        }
    }

    #[test]
    fn test_tie_prefers_first_seen() {
        assert_eq!(dominant(&[B, A, A, B]), Some(B));
        assert_eq!(dominant(&[A, B, B, A]), Some(A));
    }

    #[test]
    fn test_alpha_ignored_for_grouping() {
        let faint = Colour::new(10, 10, 200, 40);
        // Three B-ish samples (two opaque, one faint) beat two A samples.
        let picked = dominant(&[faint, A, B, A, B]).unwrap();
        assert_eq!(picked, faint);
    }
}
