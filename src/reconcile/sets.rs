//! Set algebra over string lists
//!
//! Pure helpers for comparing, merging and subtracting lists of names, emails
//! and IDs. An unset list (`None`) is an error wherever a list is required;
//! it is never treated as empty.

use std::collections::{BTreeSet, HashSet};

use crate::error::{Error, Result};

/// How [`compare`] relates its left list `a` to its right list `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// At least one element of `b` is in `a`
    Any,
    /// Every element of `b` is in `a`
    All,
    /// No element of `b` is in `a`
    Disjoint,
    /// Same length and the same element at every position
    ExactOrdered,
    /// `b` is a subset of `a` (order ignored)
    Subset,
    /// `a` is at least as long as `b` and contains every element of `b`
    Superset,
    /// Both lists are empty
    BothEmpty,
}

fn require<'a, S>(list: Option<&'a [S]>, what: &str) -> Result<&'a [S]> {
    list.ok_or_else(|| Error::InvalidInput(format!("{} list is not set", what)))
}

/// Compare two lists under `mode`.
///
/// Fails with `InvalidInput` if either side is unset.
pub fn compare<A, B>(a: Option<&[A]>, b: Option<&[B]>, mode: CompareMode) -> Result<bool>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let a = require(a, "left")?;
    let b = require(b, "right")?;

    let lookup: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let contains_all = || b.iter().all(|item| lookup.contains(item.as_ref()));

    let result = match mode {
        CompareMode::Any => b.iter().any(|item| lookup.contains(item.as_ref())),
        CompareMode::All | CompareMode::Subset => contains_all(),
        CompareMode::Disjoint => !b.iter().any(|item| lookup.contains(item.as_ref())),
        CompareMode::ExactOrdered => sequence_eq(a, b),
        CompareMode::Superset => a.len() >= b.len() && contains_all(),
        CompareMode::BothEmpty => a.is_empty() && b.is_empty(),
    };

    Ok(result)
}

/// Element-by-element equality, order included.
pub fn sequence_eq<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.as_ref() == y.as_ref())
}

/// Equality of the distinct non-empty elements, order and duplicates ignored.
pub fn set_eq<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> bool {
    StringSet::from_iter(a) == StringSet::from_iter(b)
}

/// Union of every list: empty strings dropped, deduplicated, sorted.
///
/// Fails with `InvalidInput` if any list is unset; a present-but-empty list is fine.
pub fn merge<S: AsRef<str>>(lists: &[Option<&[S]>]) -> Result<Vec<String>> {
    let mut merged = StringSet::new();
    for list in lists {
        merged.extend(require(*list, "input")?);
    }
    Ok(merged.into_vec())
}

/// `target` minus every element of every remove list: empty strings dropped,
/// deduplicated, sorted.
///
/// Fails with `InvalidInput` if the target or any remove list is unset.
pub fn remove<S, R>(target: Option<&[S]>, remove_lists: &[Option<&[R]>]) -> Result<Vec<String>>
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    let mut remaining = StringSet::from_iter(require(target, "target")?);
    for list in remove_lists {
        for item in require(*list, "remove")? {
            remaining.remove(item.as_ref());
        }
    }
    Ok(remaining.into_vec())
}

// ============================================================================
// StringSet
// ============================================================================

/// Unordered collection of unique, non-empty strings.
///
/// Empty inputs are dropped on insert. Iterates in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSet(BTreeSet<String>);

impl StringSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; empty values are ignored. Returns true if it was new.
    pub fn insert(&mut self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        if value.is_empty() {
            return false;
        }
        self.0.insert(value.to_string())
    }

    pub fn remove(&mut self, value: &str) -> bool {
        self.0.remove(value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Elements of `self` not in `other`, sorted.
    pub fn difference(&self, other: &StringSet) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Elements in both sets, sorted.
    pub fn intersection(&self, other: &StringSet) -> Vec<String> {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> Extend<S> for StringSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StringSet::new();
        set.extend(iter);
        set
    }
}

// ============================================================================
// MembershipDelta
// ============================================================================

/// Difference between a current and a desired membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDelta {
    /// Desired but not current
    pub to_add: Vec<String>,
    /// Current but not desired
    pub to_remove: Vec<String>,
    /// In both
    pub unchanged: Vec<String>,
}

impl MembershipDelta {
    /// Partition `current` and `desired` into additions, removals and unchanged members.
    pub fn between<C, D>(current: &[C], desired: &[D]) -> Self
    where
        C: AsRef<str>,
        D: AsRef<str>,
    {
        let current = StringSet::from_iter(current);
        let desired = StringSet::from_iter(desired);

        Self {
            to_add: desired.difference(&current),
            to_remove: current.difference(&desired),
            unchanged: current.intersection(&desired),
        }
    }

    /// True when applying the desired membership would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
