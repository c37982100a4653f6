//! Railway station groups.

use tracing::warn;

use crate::domain::{Alias, ExportedStop, LocationType, Position, Stake};
use crate::reference::{StationMeta, platform_number};
use crate::registry::StopRegistry;
use crate::rules::StopRules;

use super::Consolidator;

impl Consolidator {
    /// Consolidate a railway group. Its stakes are all virtual; they end up
    /// aliased to the station, to one of its platforms, or dropped.
    pub(super) fn load_railway(
        &self,
        group_id: &str,
        group_name: String,
        stakes: &[Stake],
        registry: &mut StopRegistry,
    ) {
        if !self.rules.is_active_station(group_id) {
            drop_all(stakes, registry);
            return;
        }

        let meta = self.reference.station(group_id);

        let (position, name) = match meta {
            Some(meta) => (meta.position, meta.name.clone()),
            None => match Position::mean(stakes.iter().filter_map(|s| s.position)) {
                Some(position) => (position, group_name),
                None => {
                    warn!(group = group_id, name = %group_name, "railway station has no position, dropping it");
                    drop_all(stakes, registry);
                    return;
                }
            },
        };

        match meta {
            Some(meta) if !meta.one_platform => {
                load_multi_platform(group_id, &name, position, meta, stakes, &self.rules, registry)
            }
            _ => load_single_stop(group_id, name, position, meta, stakes, registry),
        }
    }
}

fn drop_all(stakes: &[Stake], registry: &mut StopRegistry) {
    for stake in stakes {
        registry.insert_alias(&stake.id, Alias::Dropped);
    }
}

/// A stop carrying the station-wide metadata fields.
fn station_stop(stop_id: &str, name: String, position: Position, meta: Option<&StationMeta>) -> ExportedStop {
    let mut stop = ExportedStop::new(stop_id, name, position);
    if let Some(meta) = meta {
        stop.zone_id = meta.zone();
        stop.ibnr_code = meta.ibnr();
        stop.pkpplk_code = meta.pkpplk();
        stop.wheelchair_boarding = meta.wheelchair;
    }
    stop
}

/// The whole station is one boardable stop.
fn load_single_stop(
    group_id: &str,
    name: String,
    position: Position,
    meta: Option<&StationMeta>,
    stakes: &[Stake],
    registry: &mut StopRegistry,
) {
    registry.insert_stop(station_stop(group_id, name, position, meta));

    for stake in stakes {
        registry.insert_alias(&stake.id, Alias::Redirect(group_id.to_string()));
    }
}

/// A non-boardable hub plus one child stop per platform.
fn load_multi_platform(
    group_id: &str,
    name: &str,
    position: Position,
    meta: &StationMeta,
    stakes: &[Stake],
    rules: &StopRules,
    registry: &mut StopRegistry,
) {
    let mut hub = station_stop(group_id, name.to_string(), position, Some(meta));
    hub.location_type = LocationType::Station;
    registry.insert_stop(hub);

    for (platform_id, platform_pos) in &meta.platforms {
        let platform_name = format!("{} peron {}", name, platform_number(platform_id));
        let mut platform = station_stop(platform_id, platform_name, *platform_pos, Some(meta));
        platform.parent_station = Some(group_id.to_string());
        registry.insert_stop(platform);
        registry.link_parent(platform_id, group_id);
    }

    for stake in stakes {
        match meta.platform_of(&stake.id) {
            Some(platform_id) => {
                registry.insert_alias(&stake.id, Alias::Redirect(platform_id.to_string()));
            }
            None if rules.is_unmapped_exempt(&stake.id) => {}
            None => warn!(
                station = %name,
                stake = %stake.id,
                "no platform defined for railway stake"
            ),
        }
    }
}
