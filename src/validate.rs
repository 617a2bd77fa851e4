use crate::builder::place_leftovers;
use crate::cache::TierCache;
use crate::model::condition::CrewRules;
use crate::model::entity::AircraftType;
use crate::model::group::{MemberIdx, Roster, TeamDraft};
use crate::warning::{Warning, WarningCode, Warnings};

/// Takes everyone off restricted teams who may not crew them.
fn strip_unqualified(roster: &mut Roster, cache: &TierCache) -> Vec<MemberIdx> {
    let mut violators = Vec::new();
    for team in roster.teams.iter_mut().filter(|team| team.aircraft.is_restricted()) {
        let (keep, out): (Vec<MemberIdx>, Vec<MemberIdx>) =
            team.members.iter().partition(|&&idx| cache.may_crew(idx, team.aircraft));
        if !out.is_empty() {
            tracing::debug!(team = %team.id(), removed = out.len(), "removed unqualified members");
            team.members = keep;
            violators.extend(out);
        }
    }
    violators
}

fn check_large_sizes(
    roster: &mut Roster,
    cache: &TierCache,
    rules: &CrewRules,
    warnings: &mut Warnings,
) {
    let mut emptied = Vec::new();
    roster.teams.retain(|team| {
        let empty = team.aircraft == AircraftType::Large && team.members.is_empty();
        if empty {
            emptied.push(team.id());
        }
        !empty
    });
    for id in emptied {
        warnings.push(Warning::new(
            WarningCode::ValidatorUndersizedTeam,
            format!("large team {id} lost every member to qualification checks and was removed"),
        ));
    }

    for team in roster.of_type(AircraftType::Large) {
        if team.members.len() < rules.large_min_crew {
            warnings.push(
                Warning::new(
                    WarningCode::ValidatorUndersizedTeam,
                    format!(
                        "large team {} has {} members, below the minimum of {}",
                        team.id(),
                        team.members.len(),
                        rules.large_min_crew
                    ),
                )
                .with_members(cache.ids(&team.members)),
            );
        }
    }
}

fn check_small_sizes(
    roster: &mut Roster,
    cache: &TierCache,
    rules: &CrewRules,
    warnings: &mut Warnings,
) {
    let odd_team = roster.odd_team;
    for team in roster.teams.iter_mut().filter(|team| team.aircraft == AircraftType::Small) {
        let allowed = rules.small_crew + usize::from(odd_team == Some(team.seq));
        if team.members.len() > allowed {
            let excess = team.members.split_off(allowed);
            warnings.push(
                Warning::new(
                    WarningCode::ValidatorTrimmedExcess,
                    format!(
                        "small team {} held {} members; removed {}",
                        team.id(),
                        allowed + excess.len(),
                        cache.names(&excess)
                    ),
                )
                .with_members(cache.ids(&excess)),
            );
        } else if team.members.len() < rules.small_crew {
            warnings.push(
                Warning::new(
                    WarningCode::ValidatorUndersizedTeam,
                    format!(
                        "small team {} has {} members instead of {}",
                        team.id(),
                        team.members.len(),
                        rules.small_crew
                    ),
                )
                .with_members(cache.ids(&team.members)),
            );
        }
    }
}

/// Enforces the hard invariants on a repaired roster.
///
/// Members who may not crew their large team are re-formed into new small
/// teams; a single leftover follows the same placement as the builder's
/// leftover. Size problems that cannot be repaired are reported.
pub fn validate_teams(
    roster: &mut Roster,
    cache: &TierCache,
    rules: &CrewRules,
    warnings: &mut Warnings,
) {
    let violators = strip_unqualified(roster, cache);
    check_large_sizes(roster, cache, rules, warnings);

    if !violators.is_empty() {
        let mut next_seq = roster.next_seq(AircraftType::Small);
        let mut groups = violators.chunks_exact(rules.small_crew);
        for chunk in groups.by_ref() {
            roster.teams.push(TeamDraft::new(AircraftType::Small, next_seq, chunk.to_vec()));
            next_seq += 1;
        }
        place_leftovers(roster, groups.remainder(), cache, rules, warnings);
    }

    check_small_sizes(roster, cache, rules, warnings);
}
