//! The stop registry: everything consolidation decided, plus what the
//! schedule builder has used so far.
//!
//! Consolidation fills it one group at a time. The schedule builder then
//! calls [`StopRegistry::resolve`], [`StopRegistry::mark_used`] and
//! [`StopRegistry::assign_zone`] while walking trips, and the exporter
//! reads it last.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::domain::{Alias, ExportedStop, ZoneLabel};

/// What [`StopRegistry::assign_zone`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOutcome {
    /// The group already had this zone.
    Unchanged,
    /// First assignment for the group.
    Assigned,
    /// One side was the boundary marker; the group is now a boundary group.
    Widened,
    /// Two different zones collided; the group is now a boundary group.
    Conflict,
}

/// Mutable store of stops, aliases, zones and usage.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    /// Exported stops in insertion order.
    stops: Vec<ExportedStop>,
    /// Stop id → index into `stops`.
    index: HashMap<String, usize>,
    aliases: HashMap<String, Alias>,
    /// Platform id → hub id.
    parents: HashMap<String, String>,
    invalid: HashSet<String>,
    /// Group key → zone.
    zones: HashMap<String, ZoneLabel>,
    used: HashSet<String>,
    /// Every raw id passed to `resolve`, plus the alias target it led to.
    referenced: HashSet<String>,
    /// Referenced ids that ended up in the invalid set.
    missing: HashSet<String>,
}

impl StopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exported stop. A stop with the same id is replaced in place.
    pub fn insert_stop(&mut self, stop: ExportedStop) {
        match self.index.get(&stop.stop_id) {
            Some(&idx) => self.stops[idx] = stop,
            None => {
                self.index.insert(stop.stop_id.clone(), self.stops.len());
                self.stops.push(stop);
            }
        }
    }

    /// Redirect a stake id that isn't exported under its own id.
    pub fn insert_alias(&mut self, stake_id: impl Into<String>, alias: Alias) {
        self.aliases.insert(stake_id.into(), alias);
    }

    pub fn link_parent(&mut self, child_id: impl Into<String>, parent_id: impl Into<String>) {
        self.parents.insert(child_id.into(), parent_id.into());
    }

    /// Record a stake with no usable position and no alias target.
    pub fn mark_invalid(&mut self, stake_id: impl Into<String>) {
        self.invalid.insert(stake_id.into());
    }

    /// Final stop id for a raw stake id, or `None` if the stake can't be
    /// exported.
    ///
    /// Aliases are followed exactly one hop. Invalid stakes, dropped stakes
    /// and ids that were never registered all resolve to `None`.
    pub fn resolve(&mut self, raw_id: &str) -> Option<String> {
        self.referenced.insert(raw_id.to_string());

        let target = match self.aliases.get(raw_id) {
            Some(Alias::Redirect(target)) => target.as_str(),
            Some(Alias::Dropped) => return None,
            None => raw_id,
        };
        if target != raw_id {
            self.referenced.insert(target.to_string());
        }

        if self.invalid.contains(target) {
            self.missing.insert(target.to_string());
            return None;
        }

        self.index.contains_key(target).then(|| target.to_string())
    }

    /// Mark a stop as used by the schedule; a used platform marks its hub too.
    pub fn mark_used(&mut self, stop_id: &str) {
        if let Some(parent) = self.parents.get(stop_id) {
            self.used.insert(parent.clone());
        }
        self.used.insert(stop_id.to_string());
    }

    /// Record the zone a group was seen in.
    ///
    /// The first assignment wins. Once a group is a boundary group it stays
    /// one; two different zones also turn it into a boundary group.
    pub fn assign_zone(&mut self, group_key: &str, zone: ZoneLabel) -> ZoneOutcome {
        let Some(current) = self.zones.get(group_key) else {
            self.zones.insert(group_key.to_string(), zone);
            return ZoneOutcome::Assigned;
        };

        if *current == zone {
            return ZoneOutcome::Unchanged;
        }

        let outcome = if current.is_boundary() || zone.is_boundary() {
            ZoneOutcome::Widened
        } else {
            warn!(
                group = group_key,
                current = %current,
                requested = %zone,
                "stop group has a zone conflict, treating it as a boundary group"
            );
            ZoneOutcome::Conflict
        };

        self.zones.insert(group_key.to_string(), ZoneLabel::Boundary);
        outcome
    }

    pub fn stop(&self, stop_id: &str) -> Option<&ExportedStop> {
        self.index.get(stop_id).map(|&idx| &self.stops[idx])
    }

    /// All exported stops, in insertion order.
    pub fn stops(&self) -> &[ExportedStop] {
        &self.stops
    }

    pub fn alias(&self, stake_id: &str) -> Option<&Alias> {
        self.aliases.get(stake_id)
    }

    pub fn parent(&self, stop_id: &str) -> Option<&str> {
        self.parents.get(stop_id).map(String::as_str)
    }

    pub fn zone(&self, group_key: &str) -> Option<&ZoneLabel> {
        self.zones.get(group_key)
    }

    pub fn is_invalid(&self, stake_id: &str) -> bool {
        self.invalid.contains(stake_id)
    }

    pub fn is_used(&self, stop_id: &str) -> bool {
        self.used.contains(stop_id)
    }

    pub fn was_referenced(&self, raw_id: &str) -> bool {
        self.referenced.contains(raw_id)
    }

    /// Referenced stake ids that still lack a position, in any order.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Position;
    use proptest::prelude::*;

    fn zone() -> impl Strategy<Value = ZoneLabel> {
        prop_oneof![
            Just(ZoneLabel::Boundary),
            "[12]".prop_map(ZoneLabel::Zone),
        ]
    }

    proptest! {
        /// Two assignments give the same result in either order
        #[test]
        fn zone_order_independent(a in zone(), b in zone()) {
            let mut forward = StopRegistry::new();
            forward.assign_zone("1234", a.clone());
            forward.assign_zone("1234", b.clone());

            let mut backward = StopRegistry::new();
            backward.assign_zone("1234", b.clone());
            backward.assign_zone("1234", a.clone());

            prop_assert_eq!(forward.zone("1234"), backward.zone("1234"));
            if a == b {
                prop_assert_eq!(forward.zone("1234"), Some(&a));
            } else {
                prop_assert_eq!(forward.zone("1234"), Some(&ZoneLabel::Boundary));
            }
        }

        /// A resolved id is always an exported, valid stop
        #[test]
        fn resolution_is_one_hop(
            exported in proptest::collection::hash_set("[0-9]{6}", 1..8),
            aliased in proptest::collection::vec(("[0-9]{6}", any::<prop::sample::Index>(), any::<bool>()), 0..8),
            invalid in proptest::collection::vec("[0-9]{6}", 0..4),
        ) {
            let exported: Vec<String> = exported.into_iter().collect();
            let mut reg = StopRegistry::new();
            for id in &exported {
                reg.insert_stop(ExportedStop::new(id.clone(), "S", Position::new(52.0, 21.0)));
            }
            for (id, target, dropped) in &aliased {
                if exported.contains(id) {
                    continue;
                }
                let alias = if *dropped {
                    Alias::Dropped
                } else {
                    Alias::Redirect(target.get(&exported).clone())
                };
                reg.insert_alias(id.clone(), alias);
            }
            for id in &invalid {
                if !exported.contains(id) {
                    reg.mark_invalid(id.clone());
                }
            }

            let raw_ids: Vec<String> = aliased
                .iter()
                .map(|(id, _, _)| id.clone())
                .chain(invalid.iter().cloned())
                .chain(exported.iter().cloned())
                .collect();
            for raw in raw_ids {
                if let Some(id) = reg.resolve(&raw) {
                    prop_assert!(reg.stop(&id).is_some());
                    prop_assert!(!reg.is_invalid(&id));
                    prop_assert!(reg.alias(&id).is_none());
                }
            }
        }
    }
}
