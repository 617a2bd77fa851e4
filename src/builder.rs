use crate::cache::TierCache;
use crate::cohort::CohortSplit;
use crate::model::condition::CrewRules;
use crate::model::entity::AircraftType;
use crate::model::group::{MemberIdx, Roster, TeamDraft};
use crate::warning::{Warning, WarningCode, Warnings};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub teams: Vec<TeamDraft>,
    pub large_formed: usize,
    /// Members that fit neither a small team nor a large team with room.
    pub leftover: Vec<MemberIdx>,
}

/// Greedy team construction.
///
/// Large teams are filled to `large_min_crew` from the front of the
/// large-qualified list, stopping at the first team that cannot be filled.
/// Everyone else is paired into small teams in working order; a remainder
/// that is large-qualified tops up the first large team with room.
pub fn build_teams(
    split: CohortSplit,
    requested: usize,
    rules: &CrewRules,
    cache: &TierCache,
) -> BuildOutcome {
    let CohortSplit { large_qualified, small_only } = split;
    let mut teams = Vec::new();

    let mut cursor = 0;
    for seq in 1..=requested {
        let end = cursor + rules.large_min_crew;
        if end > large_qualified.len() {
            break;
        }
        teams.push(TeamDraft::new(AircraftType::Large, seq, large_qualified[cursor..end].to_vec()));
        cursor = end;
    }
    let large_formed = teams.len();

    let overflow: Vec<MemberIdx> = large_qualified[cursor..]
        .iter()
        .chain(small_only.iter())
        .copied()
        .collect();
    let mut pairs = overflow.chunks_exact(rules.small_crew);
    for (seq, chunk) in (1..).zip(pairs.by_ref()) {
        teams.push(TeamDraft::new(AircraftType::Small, seq, chunk.to_vec()));
    }

    let mut leftover = Vec::new();
    for &idx in pairs.remainder() {
        let host = teams.iter_mut().find(|team| {
            team.aircraft == AircraftType::Large && team.members.len() < rules.large_max_crew
        });
        match host {
            Some(team) if cache.get(idx).large_qualified => team.members.push(idx),
            _ => leftover.push(idx),
        }
    }

    tracing::debug!(
        requested,
        large_formed,
        small_formed = teams.len() - large_formed,
        leftover = leftover.len(),
        "built provisional teams"
    );
    BuildOutcome { teams, large_formed, leftover }
}

/// Places members that no team could take.
///
/// The first one joins the last full small team, which becomes the roster's
/// single odd-sized team. Anyone after that, or
/// anyone at all when no small team exists, stays unassigned.
pub fn place_leftovers(
    roster: &mut Roster,
    leftovers: &[MemberIdx],
    cache: &TierCache,
    rules: &CrewRules,
    warnings: &mut Warnings,
) {
    for &idx in leftovers {
        let member = cache.member(idx);
        let host = match roster.odd_team {
            Some(_) => None,
            None => roster
                .teams
                .iter_mut()
                .filter(|team| {
                    team.aircraft == AircraftType::Small && team.members.len() == rules.small_crew
                })
                .max_by_key(|team| team.seq),
        };
        match host {
            Some(team) => {
                team.members.push(idx);
                roster.odd_team = Some(team.seq);
                warnings.push(
                    Warning::new(
                        WarningCode::OddPoolForSmallType,
                        format!(
                            "{} ({}) joined small team {} as an extra member: the pool has an \
                             odd number of members",
                            member.name,
                            member.id,
                            team.id()
                        ),
                    )
                    .with_members([member.id.clone()]),
                );
            }
            None => warnings.push(
                Warning::new(
                    WarningCode::OverflowUnassigned,
                    format!("{} ({}) could not be placed on any team", member.name, member.id),
                )
                .with_members([member.id.clone()]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::CrewMember;

    fn pool(large: usize, small: usize) -> Vec<CrewMember> {
        let large = (0..large).map(|n| {
            CrewMember::new(format!("L{n}"), format!("Large {n}"), "FA")
                .with_qualification(AircraftType::Large)
        });
        let small =
            (0..small).map(|n| CrewMember::new(format!("S{n}"), format!("Small {n}"), "FA"));
        large.chain(small).collect()
    }

    fn split(large: usize, small: usize) -> CohortSplit {
        CohortSplit {
            large_qualified: (0..large).collect(),
            small_only: (large..large + small).collect(),
        }
    }

    fn sizes(outcome: &BuildOutcome, aircraft: AircraftType) -> Vec<usize> {
        outcome
            .teams
            .iter()
            .filter(|team| team.aircraft == aircraft)
            .map(|team| team.members.len())
            .collect()
    }

    #[test]
    fn fills_large_teams_then_pairs_the_rest() {
        let pool = pool(10, 0);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(10, 0), 2, &CrewRules::default(), &cache);
        assert_eq!(outcome.large_formed, 2);
        assert_eq!(sizes(&outcome, AircraftType::Large), vec![4, 4]);
        assert_eq!(sizes(&outcome, AircraftType::Small), vec![2]);
        assert!(outcome.leftover.is_empty());
        assert_eq!(outcome.teams[0].members, vec![0, 1, 2, 3]);
        assert_eq!(outcome.teams[2].members, vec![8, 9]);
    }

    #[test]
    fn stops_at_first_large_team_that_cannot_fill() {
        let pool = pool(5, 0);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(5, 0), 2, &CrewRules::default(), &cache);
        assert_eq!(outcome.large_formed, 1);
        // The fifth member is the odd one out and tops up the large team.
        assert_eq!(sizes(&outcome, AircraftType::Large), vec![5]);
        assert!(sizes(&outcome, AircraftType::Small).is_empty());
        assert!(outcome.leftover.is_empty());
    }

    #[test]
    fn overflow_keeps_large_remainder_ahead_of_small_only() {
        let pool = pool(6, 2);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(6, 2), 1, &CrewRules::default(), &cache);
        let small: Vec<_> = outcome
            .teams
            .iter()
            .filter(|team| team.aircraft == AircraftType::Small)
            .collect();
        assert_eq!(small[0].members, vec![4, 5]);
        assert_eq!(small[1].members, vec![6, 7]);
        assert_eq!(small[1].seq, 2);
    }

    #[test]
    fn small_only_remainder_is_left_over() {
        let pool = pool(4, 3);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(4, 3), 1, &CrewRules::default(), &cache);
        assert_eq!(outcome.leftover, vec![6]);
        assert_eq!(sizes(&outcome, AircraftType::Large), vec![4]);
    }

    #[test]
    fn remainder_without_large_team_is_left_over() {
        let pool = pool(3, 0);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(3, 0), 0, &CrewRules::default(), &cache);
        assert_eq!(outcome.large_formed, 0);
        assert_eq!(sizes(&outcome, AircraftType::Small), vec![2]);
        assert_eq!(outcome.leftover, vec![2]);
    }

    #[test]
    fn full_large_teams_do_not_host_the_remainder() {
        let pool = pool(5, 0);
        let cache = TierCache::create(&pool);
        let rules = CrewRules { large_max_crew: 4, ..CrewRules::default() };
        let outcome = build_teams(split(5, 0), 1, &rules, &cache);
        assert_eq!(outcome.leftover, vec![4]);
    }

    #[test]
    fn first_leftover_joins_last_small_team() {
        let pool = pool(0, 5);
        let cache = TierCache::create(&pool);
        let outcome = build_teams(split(0, 5), 0, &CrewRules::default(), &cache);
        let mut roster = Roster::new(outcome.teams);
        let mut warnings = Warnings::default();
        let rules = CrewRules::default();
        place_leftovers(&mut roster, &outcome.leftover, &cache, &rules, &mut warnings);

        assert_eq!(roster.odd_team, Some(2));
        assert_eq!(roster.teams[1].members, vec![2, 3, 4]);
        let warnings = warnings.into_vec();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::OddPoolForSmallType);
        assert_eq!(warnings[0].members, vec![pool[4].id.clone()]);
    }

    #[test]
    fn leftover_without_small_team_is_unassigned() {
        let pool = pool(0, 1);
        let cache = TierCache::create(&pool);
        let mut roster = Roster::default();
        let mut warnings = Warnings::default();
        place_leftovers(&mut roster, &[0], &cache, &CrewRules::default(), &mut warnings);

        assert_eq!(roster.member_count(), 0);
        assert_eq!(warnings.as_slice()[0].code, WarningCode::OverflowUnassigned);
    }

    #[test]
    fn only_one_odd_team_is_allowed() {
        let pool = pool(0, 4);
        let cache = TierCache::create(&pool);
        let mut roster = Roster::new(vec![TeamDraft::new(AircraftType::Small, 1, vec![0, 1])]);
        let mut warnings = Warnings::default();
        place_leftovers(&mut roster, &[2, 3], &cache, &CrewRules::default(), &mut warnings);

        let codes: Vec<_> = warnings.as_slice().iter().map(|warning| warning.code).collect();
        assert_eq!(codes, vec![WarningCode::OddPoolForSmallType, WarningCode::OverflowUnassigned]);
        assert_eq!(roster.teams[0].members, vec![0, 1, 2]);
    }
}
