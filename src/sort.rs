//! Radix sort + dedup for numeric strings, built on the same trie
//! primitive as everything else (`spec.md` §4.3.6).
//!
//! The original bolts this directly onto `phfwdReverse`
//! (`phfwdRadixSortOut`); `spec.md` §10 asks that it be a reusable,
//! independently testable function, so it takes a plain `Vec<String>` and
//! has no knowledge of `Base`.

use crate::digit::digit_index;
use crate::trie::Trie;

/// Sorts `numbers` in digit-lexicographic order and removes duplicates, in
/// O(total length) by inserting every string into a throwaway trie (whose
/// data payload is "first input index that reached this node") and
/// folding it in order.
pub fn sort_unique(numbers: Vec<String>) -> Vec<String> {
    let mut trie: Trie<usize> = Trie::new();
    for (i, s) in numbers.iter().enumerate() {
        let indices: Vec<u8> = s
            .chars()
            .map(|c| digit_index(c).expect("caller supplies valid digit strings"))
            .collect();
        let node = trie.insert(&indices);
        if trie.data(node).is_none() {
            trie.set_data(node, Some(i));
        }
    }
    let mut order = Vec::with_capacity(trie.count_data());
    trie.fold(|&i| order.push(i));
    order.into_iter().map(|i| numbers[i].clone()).collect()
}
