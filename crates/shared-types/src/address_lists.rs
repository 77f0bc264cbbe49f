//! # Address Lists
//!
//! Sets of chain addresses (or approval / tracker ids) with polarity.
//!
//! | `whitelist` | `addresses` | Meaning                    |
//! |-------------|-------------|----------------------------|
//! | `true`      | `A`         | exactly `A`                |
//! | `false`     | empty       | every address              |
//! | `false`     | `A`         | every address except `A`   |
//!
//! The id universe is unbounded, so a blacklist is never empty.
//! [`AddressList::get_overlap_details`] mirrors the range primitive: it
//! removes one list from another and returns `(remaining, overlap)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Whitelist or blacklist of ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressList {
    pub addresses: BTreeSet<String>,
    pub whitelist: bool,
}

impl AddressList {
    /// Every address.
    pub fn all() -> Self {
        Self {
            addresses: BTreeSet::new(),
            whitelist: false,
        }
    }

    /// Reserved singleton holding exactly one address or tracker id.
    pub fn reserved(address: impl Into<String>) -> Self {
        Self {
            addresses: BTreeSet::from([address.into()]),
            whitelist: true,
        }
    }

    /// Exactly these addresses.
    pub fn whitelist<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            whitelist: true,
        }
    }

    /// Every address except these.
    pub fn blacklist<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            whitelist: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.whitelist && self.addresses.is_empty()
    }

    pub fn is_all(&self) -> bool {
        !self.whitelist && self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address) == self.whitelist
    }

    /// Whether the two lists share at least one id. Allocation free.
    pub fn overlaps(&self, other: &AddressList) -> bool {
        match (self.whitelist, other.whitelist) {
            (true, true) => self
                .addresses
                .iter()
                .any(|address| other.addresses.contains(address)),
            (true, false) => self
                .addresses
                .iter()
                .any(|address| !other.addresses.contains(address)),
            (false, true) => other
                .addresses
                .iter()
                .any(|address| !self.addresses.contains(address)),
            (false, false) => true,
        }
    }

    /// Remove `other` from `self`, returning `(remaining, overlap)`.
    pub fn get_overlap_details(&self, other: &AddressList) -> (AddressList, AddressList) {
        let in_both: BTreeSet<String> = self
            .addresses
            .intersection(&other.addresses)
            .cloned()
            .collect();
        let only_self: BTreeSet<String> = self
            .addresses
            .difference(&other.addresses)
            .cloned()
            .collect();
        let only_other: BTreeSet<String> = other
            .addresses
            .difference(&self.addresses)
            .cloned()
            .collect();

        match (self.whitelist, other.whitelist) {
            // A \ B and A ∩ B
            (true, true) => (
                AddressList::whitelist(only_self),
                AddressList::whitelist(in_both),
            ),
            // A \ (U \ B) = A ∩ B, A ∩ (U \ B) = A \ B
            (true, false) => (
                AddressList::whitelist(in_both),
                AddressList::whitelist(only_self),
            ),
            // (U \ A) \ B = U \ (A ∪ B), (U \ A) ∩ B = B \ A
            (false, true) => (
                AddressList::blacklist(self.addresses.union(&other.addresses).cloned()),
                AddressList::whitelist(only_other),
            ),
            // (U \ A) \ (U \ B) = B \ A, (U \ A) ∩ (U \ B) = U \ (A ∪ B)
            (false, false) => (
                AddressList::whitelist(only_other),
                AddressList::blacklist(self.addresses.union(&other.addresses).cloned()),
            ),
        }
    }

    /// Union of two lists of equal polarity. `None` when polarities differ.
    pub fn union(&self, other: &AddressList) -> Option<AddressList> {
        if self.whitelist != other.whitelist {
            return None;
        }
        let addresses = if self.whitelist {
            self.addresses.union(&other.addresses).cloned().collect()
        } else {
            self.addresses
                .intersection(&other.addresses)
                .cloned()
                .collect()
        };
        Some(AddressList {
            addresses,
            whitelist: self.whitelist,
        })
    }
}

impl Default for AddressList {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return write!(f, "all");
        }
        let joined = self
            .addresses
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if self.whitelist {
            write!(f, "{{{}}}", joined)
        } else {
            write!(f, "all except {{{}}}", joined)
        }
    }
}
