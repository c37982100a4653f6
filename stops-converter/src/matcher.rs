//! Matching virtual stakes to the physical stakes they stand for.

use crate::domain::Stake;

/// Virtual stakes tagged with the wrong family, and their real twin.
const VIRTUAL_OVERRIDES: &[(&str, &str)] = &[
    // Metro Młociny 88 boards at Metro Młociny 28
    ("605988", "605928"),
];

/// Find the physical stake a virtual stake should alias to.
///
/// Candidates are the non-virtual stakes of the same group. In order:
/// a known override, a stake at exactly the same position, a stake of
/// the same family (second code character). Returns `None` when nothing
/// matches; the caller then marks the virtual stake invalid.
pub fn match_virtual<'a>(virt: &Stake, stakes: &'a [Stake]) -> Option<&'a str> {
    let physical = || stakes.iter().filter(|s| !s.is_virtual());
    let same_family = |s: &&Stake| s.code.family() == virt.code.family();

    let overridden = VIRTUAL_OVERRIDES
        .iter()
        .find(|(from, _)| *from == virt.id)
        .and_then(|(_, to)| physical().filter(same_family).find(|s| s.id == *to));
    if let Some(stake) = overridden {
        return Some(&stake.id);
    }

    if let Some(pos) = virt.position
        && let Some(stake) = physical().find(|s| s.position == Some(pos))
    {
        return Some(&stake.id);
    }

    physical().find(same_family).map(|s| s.id.as_str())
}
