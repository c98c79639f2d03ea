// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusive open groups: when one member opens, the others close.
//!
//! ## Usage
//!
//! 1) Each dropdown or tooltip joins a group (for example a menu bar) when it is set up.
//! 2) When a member opens, call [`ExclusiveGroups::announce_open`].
//! 3) Close every member it returns.
//!
//! ## Minimal example
//!
//! ```
//! use perch_broadcast::exclusive::ExclusiveGroups;
//!
//! let mut groups: ExclusiveGroups<&str, u32> = ExclusiveGroups::new();
//! groups.join("menu", 1);
//! groups.join("menu", 2);
//! groups.join("menu", 3);
//! assert_eq!(groups.announce_open(&"menu", &2), vec![1, 3]);
//! ```

use alloc::vec::Vec;

/// Named sets of mutually exclusive members.
///
/// Members are kept in join order. A member may belong to several groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExclusiveGroups<G, K> {
    groups: Vec<(G, Vec<K>)>,
}

impl<G, K> Default for ExclusiveGroups<G, K> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<G: Eq, K: Copy + Eq> ExclusiveGroups<G, K> {
    /// Create with no groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `member` to `group`, creating the group on first use.
    ///
    /// Returns `false` if it was already a member.
    pub fn join(&mut self, group: G, member: K) -> bool {
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, members)) => {
                if members.contains(&member) {
                    return false;
                }
                members.push(member);
            }
            None => self.groups.push((group, alloc::vec![member])),
        }
        true
    }

    /// Remove `member` from `group`. Empty groups are dropped.
    pub fn leave(&mut self, group: &G, member: &K) -> bool {
        let Some(gi) = self.groups.iter().position(|(g, _)| g == group) else {
            return false;
        };
        let members = &mut self.groups[gi].1;
        let Some(mi) = members.iter().position(|m| m == member) else {
            return false;
        };
        members.remove(mi);
        if members.is_empty() {
            self.groups.remove(gi);
        }
        true
    }

    /// Remove `member` from every group.
    pub fn leave_all(&mut self, member: &K) {
        for (_, members) in &mut self.groups {
            members.retain(|m| m != member);
        }
        self.groups.retain(|(_, members)| !members.is_empty());
    }

    /// Members of `group` in join order.
    pub fn members(&self, group: &G) -> &[K] {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, members)| members.as_slice())
            .unwrap_or_default()
    }

    /// `owner` opened: returns every other member of `group`, in join order.
    ///
    /// The owner does not need to be a member; an unknown group yields nothing.
    pub fn announce_open(&self, group: &G, owner: &K) -> Vec<K> {
        self.members(group)
            .iter()
            .copied()
            .filter(|m| m != owner)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn join_is_idempotent() {
        let mut g: ExclusiveGroups<u8, u32> = ExclusiveGroups::new();
        assert!(g.join(0, 1));
        assert!(!g.join(0, 1));
        assert_eq!(g.members(&0), &[1]);
    }

    #[test]
    fn announce_excludes_owner_and_keeps_order() {
        let mut g: ExclusiveGroups<u8, u32> = ExclusiveGroups::new();
        for m in [4, 2, 9] {
            g.join(0, m);
        }
        assert_eq!(g.announce_open(&0, &2), vec![4, 9]);
        assert_eq!(g.announce_open(&0, &7), vec![4, 2, 9]);
        assert!(g.announce_open(&1, &2).is_empty());
    }

    #[test]
    fn groups_are_independent() {
        let mut g: ExclusiveGroups<&str, u32> = ExclusiveGroups::new();
        g.join("a", 1);
        g.join("a", 2);
        g.join("b", 2);
        g.join("b", 3);
        assert_eq!(g.announce_open(&"a", &1), vec![2]);
        assert_eq!(g.announce_open(&"b", &3), vec![2]);
    }

    #[test]
    fn leaving_drops_empty_groups() {
        let mut g: ExclusiveGroups<u8, u32> = ExclusiveGroups::new();
        g.join(0, 1);
        g.join(1, 1);
        g.join(1, 2);
        assert!(g.leave(&0, &1));
        assert!(!g.leave(&0, &1));
        assert!(g.members(&0).is_empty());
        g.leave_all(&1);
        assert_eq!(g.members(&1), &[2]);
    }
}
