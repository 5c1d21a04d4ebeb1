//! A forwarding base: a forward trie (source prefix -> target) and a
//! backward trie (target prefix -> set of sources), kept mutually
//! consistent through every mutation, per `spec.md` §3-§4.3.

use crate::digit::{digit_index, mask_of, DigitMask, Number};
use crate::error::PhfwdError;
use crate::list::{BackList, ListRef};
use crate::sort::sort_unique;
use crate::trie::{NodeId, Trie, Word};
use tracing::{debug, trace};

/// Payload of a data-bearing forward-trie node: which backward-trie node
/// it redirects to, and where in that node's list it's recorded (so the
/// pairing can be unwound in O(1) on overwrite or removal).
struct ForwardEntry {
    target: NodeId,
    list_ref: ListRef,
}

/// A named set of forwarding rules: paired forward/backward tries plus the
/// three queries `spec.md` §4.3 defines over them.
#[derive(Default)]
pub struct Base {
    forward: Trie<ForwardEntry>,
    backward: Trie<BackList>,
}

impl Base {
    pub fn new() -> Self {
        Base {
            forward: Trie::new(),
            backward: Trie::new(),
        }
    }

    /// `spec.md` §4.3.1: redirects `prefix1` to `prefix2`, replacing any
    /// existing rule for `prefix1`. Fails if either string is empty,
    /// contains a non-alphabet character, or the two are equal.
    pub fn add(&mut self, prefix1: &Number, prefix2: &Number) -> Result<(), PhfwdError> {
        if prefix1.as_str() == prefix2.as_str() {
            return Err(PhfwdError::InvalidArgument);
        }
        trace!(from = %prefix1, to = %prefix2, "base.add");

        let f = self.forward.insert(&prefix1.indices());
        let t = self.backward.insert(&prefix2.indices());

        if self.backward.data(t).is_none() {
            self.backward.set_data(t, Some(BackList::new()));
        }
        let list = self
            .backward
            .data_mut(t)
            .expect("just ensured data is Some");
        let list_ref = list.push_back(f);

        if let Some(old) = self.forward.take_data(f) {
            self.delete_backward_entry(old);
        }
        self.forward.set_data(f, Some(ForwardEntry { target: t, list_ref }));
        debug!(from = %prefix1, to = %prefix2, "add");
        Ok(())
    }

    /// `spec.md` §4.3.2: removes every rule whose source prefix is `num`
    /// or a descendant of it. Absence of a matching rule is not an error.
    pub fn remove(&mut self, num: &Number) {
        let indices = num.indices();
        let result = self.forward.find(&indices);
        use crate::trie::FindOutcome::*;
        if !matches!(result.outcome, Found | Substr) {
            return;
        }
        trace!(prefix = %num, "base.remove");
        let backward = &mut self.backward;
        let mut removed = 0usize;
        self.forward.delete_subtree(result.landing, |entry| {
            Self::delete_backward_entry_in(backward, entry);
            removed += 1;
        });
        debug!(prefix = %num, removed, "remove");
    }

    fn delete_backward_entry(&mut self, entry: ForwardEntry) {
        Self::delete_backward_entry_in(&mut self.backward, entry);
    }

    /// Unlinks one forward->backward pairing and, if the backward node's
    /// list becomes empty, deletes the list and rebalances from there
    /// (spec.md §4.3.2's `delete_backward_entry`).
    fn delete_backward_entry_in(backward: &mut Trie<BackList>, entry: ForwardEntry) {
        let list = backward
            .data_mut(entry.target)
            .expect("cross-invariant: target always holds a list");
        list.remove(entry.list_ref);
        if list.is_empty() {
            backward.take_data(entry.target);
            backward.balance(entry.target);
        }
    }

    /// `spec.md` §4.3.3: the forward image of `num` under the
    /// longest-matching stored prefix, or `num` itself if no rule applies.
    pub fn get(&self, num: &Number) -> String {
        let indices = num.indices();
        match self.forward.deepest_prefix_with_data(&indices) {
            None => num.as_str().to_owned(),
            Some((node, matched_len)) => {
                let entry = self.forward.data(node).expect("data-bearing by construction");
                let prefix = self.backward.full_key_of(entry.target);
                let suffix: String = num.as_str().chars().skip(matched_len).collect();
                prefix + &suffix
            }
        }
    }

    /// `spec.md` §4.3.4: every number whose forward image shares a stored
    /// target prefix with `num`, rewritten back to its source, sorted and
    /// deduplicated, plus `num` itself (the identity image always applies).
    pub fn reverse(&self, num: &Number) -> Vec<String> {
        let indices = num.indices();
        let mut out = Vec::new();
        for (node, matched_len) in self.backward.prefixes_with_data(&indices) {
            let list = self.backward.data(node).expect("data-bearing by construction");
            let suffix: String = num.as_str().chars().skip(matched_len).collect();
            for forward_node in list.iter() {
                let prefix = self.forward.full_key_of(forward_node);
                out.push(prefix + &suffix);
            }
        }
        out.push(num.as_str().to_owned());
        sort_unique(out)
    }

    /// `spec.md` §4.3.5: delegates to the backward trie's DP after
    /// extracting the distinct digits named in `alphabet`.
    pub fn non_trivial_count(&self, alphabet: &str, len: usize) -> Word {
        if len == 0 {
            return 0;
        }
        let mask: DigitMask = alphabet
            .chars()
            .filter_map(digit_index)
            .fold(0, |m, d| m | mask_of(d));
        if mask == 0 {
            return 0;
        }
        self.backward.non_trivial_count(len, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::parse(s).unwrap()
    }

    #[test]
    fn simple_redirect() {
        let mut b = Base::new();
        b.add(&num("2"), &num("0")).unwrap();
        assert_eq!(b.get(&num("222")), "022");
        let mut rev = b.reverse(&num("0"));
        rev.sort();
        assert_eq!(rev, vec!["0".to_string(), "2".to_string()]);
    }

    #[test]
    fn longest_prefix_wins() {
        let mut b = Base::new();
        b.add(&num("2"), &num("0")).unwrap();
        b.add(&num("22"), &num("1")).unwrap();
        assert_eq!(b.get(&num("2222")), "122");
    }

    #[test]
    fn overwrite_replaces_old_target() {
        let mut b = Base::new();
        b.add(&num("2"), &num("0")).unwrap();
        b.add(&num("2"), &num("9")).unwrap();
        assert_eq!(b.get(&num("2")), "9");
        assert!(!b.reverse(&num("0")).contains(&"2".to_string()));
    }

    #[test]
    fn reverse_fan_in() {
        let mut b = Base::new();
        b.add(&num("1"), &num("7")).unwrap();
        b.add(&num("12"), &num("7")).unwrap();
        b.add(&num("123"), &num("7")).unwrap();
        let rev = b.reverse(&num("7"));
        assert_eq!(rev, vec!["1", "12", "123", "7"]);
    }

    #[test]
    fn subtree_removal() {
        let mut b = Base::new();
        b.add(&num("12"), &num("5")).unwrap();
        b.add(&num("123"), &num("6")).unwrap();
        b.add(&num("1234"), &num("7")).unwrap();
        b.remove(&num("12"));
        assert_eq!(b.reverse(&num("5")), vec!["5".to_string()]);
        assert_eq!(b.reverse(&num("6")), vec!["6".to_string()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut b = Base::new();
        b.add(&num("2"), &num("0")).unwrap();
        b.remove(&num("2"));
        b.remove(&num("2"));
        assert_eq!(b.get(&num("2")), "2");
    }

    #[test]
    fn self_redirect_rejected() {
        let mut b = Base::new();
        assert!(matches!(
            b.add(&num("2"), &num("2")),
            Err(PhfwdError::InvalidArgument)
        ));
    }

    #[test]
    fn identity_holds_with_no_rules() {
        let b = Base::new();
        assert_eq!(b.get(&num("4321")), "4321");
        assert!(b.reverse(&num("4321")).contains(&"4321".to_string()));
    }

    #[test]
    fn non_trivial_count_empty_base() {
        let b = Base::new();
        assert_eq!(b.non_trivial_count("0123456789", 0), 0);
    }

    #[test]
    fn non_trivial_count_single_rule() {
        let mut b = Base::new();
        b.add(&num("0"), &num("5")).unwrap();
        assert_eq!(b.non_trivial_count("0123456789", 1), 1);
    }

    /// A removal that empties a backward node whose key is a strict prefix
    /// of another stored target triggers `balance` to merge that emptied
    /// node with its one remaining child. The merge must keep the child's
    /// `NodeId` alive (it's still the `ForwardEntry.target` of an unrelated
    /// rule) rather than freeing it -- otherwise the next lookup through
    /// that rule dereferences a freed slab slot.
    #[test]
    fn balance_after_removal_preserves_surviving_targets() {
        let mut b = Base::new();
        b.add(&num("5"), &num("1")).unwrap();
        b.add(&num("6"), &num("12")).unwrap();
        b.remove(&num("5"));
        b.remove(&num("6"));
        assert_eq!(b.get(&num("6")), "6");
    }
}
