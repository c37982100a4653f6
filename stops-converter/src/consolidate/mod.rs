//! Group consolidation: turning one source group into exported stops,
//! aliases and invalid stakes.
//!
//! Ordinary groups export every physical stake with a known position and
//! alias their virtual stakes to a physical twin. Railway groups become a
//! single station stop, or a hub with one child per platform when the
//! station metadata lists several.

mod railway;


use std::sync::Arc;

use tracing::debug;

use crate::domain::{Alias, ExportedStop, Group, GroupKind, Stake, WheelchairBoarding};
use crate::matcher::match_virtual;
use crate::names::NameBook;
use crate::reference::ReferenceData;
use crate::registry::StopRegistry;
use crate::rules::StopRules;

/// Consolidates groups into a [`StopRegistry`].
#[derive(Debug)]
pub struct Consolidator {
    rules: StopRules,
    reference: Arc<ReferenceData>,
    names: NameBook,
}

impl Consolidator {
    pub fn new(rules: StopRules, reference: Arc<ReferenceData>) -> Self {
        let names = NameBook::new(rules.proper_names.clone());
        Self {
            rules,
            reference,
            names,
        }
    }

    /// Consolidate one group and its stakes into `registry`.
    pub fn load_group(&mut self, mut group: Group, mut stakes: Vec<Stake>, registry: &mut StopRegistry) {
        let name = self.names.resolve(&mut group);
        self.reference.fill_positions(&mut stakes);

        debug!(group = %group.id, name = %name, stakes = stakes.len(), "consolidating group");

        match group.kind() {
            GroupKind::Railway => self.load_railway(&group.id, name, &stakes, registry),
            GroupKind::Ordinary => load_ordinary(&name, &stakes, registry),
        }
    }

    pub fn names(&self) -> &NameBook {
        &self.names
    }
}

/// Every physical stake with a position becomes a stop; virtual stakes
/// alias to their physical twin.
fn load_ordinary(group_name: &str, stakes: &[Stake], registry: &mut StopRegistry) {
    for stake in stakes {
        if stake.is_virtual() {
            match match_virtual(stake, stakes) {
                Some(target) => registry.insert_alias(&stake.id, Alias::Redirect(target.to_string())),
                None => registry.mark_invalid(&stake.id),
            }
            continue;
        }

        let Some(position) = stake.position else {
            registry.mark_invalid(&stake.id);
            continue;
        };

        let mut stop = ExportedStop::new(&stake.id, format!("{} {}", group_name, stake.code), position);
        stop.wheelchair_boarding = WheelchairBoarding::from(stake.wheelchair);
        registry.insert_stop(stop);
    }
}
