//! Longest strictly-increasing subsequence.
//!
//! Move detection rests on this: matched pairs whose old indices form an
//! increasing subsequence kept their relative order, so only pairs outside
//! one longest such subsequence need to be reported as moved.

/// Positions (indices into `values`) of one longest strictly-increasing
/// subsequence, in ascending position order.
///
/// Patience algorithm, O(n log n). Ties are resolved deterministically:
/// each subsequence length keeps the position of the smallest tail value
/// seen so far, and the chain is reconstructed from the final tail of the
/// longest length. Equal values never extend a subsequence (strictness).
pub(crate) fn longest_increasing(values: &[usize]) -> Vec<usize> {
    if values.is_empty() {
        return Vec::new();
    }

    // tails[k] holds the position of the smallest tail value among all
    // increasing subsequences of length k + 1 found so far.
    let mut tails: Vec<usize> = Vec::with_capacity(values.len());
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        predecessor[position] = if slot > 0 { Some(tails[slot - 1]) } else { None };
        if slot == tails.len() {
            tails.push(position);
        } else {
            tails[slot] = position;
        }
    }

    let mut chain = Vec::with_capacity(tails.len());
    let mut current = tails.last().copied();
    while let Some(position) = current {
        chain.push(position);
        current = predecessor[position];
    }
    chain.reverse();
    chain
}
