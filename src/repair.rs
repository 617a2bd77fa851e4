use std::collections::{HashSet, VecDeque};

use crate::action::{Action, Index, Position};
use crate::cache::TierCache;
use crate::model::condition::CrewRules;
use crate::model::group::{MemberIdx, Roster, TeamDraft};

/// Least senior member of `team` that `accept` lets through.
fn least_senior(
    team: &TeamDraft,
    cache: &TierCache,
    accept: impl Fn(MemberIdx) -> bool,
) -> Option<Index> {
    team.members
        .iter()
        .enumerate()
        .filter(|&(_, &idx)| accept(idx))
        .max_by(|&(_, &a), &(_, &b)| cache.compare(a, b))
        .map(|(member_index, _)| member_index)
}

/// Finds an action that hands one senior from `rich` to `needy` without
/// putting anyone on a team they may not crew or breaking size rules.
fn plan(
    roster: &Roster,
    cache: &TierCache,
    rules: &CrewRules,
    needy: Index,
    rich: Index,
) -> Option<Action> {
    let needy_team = &roster.teams[needy];
    let rich_team = &roster.teams[rich];

    let senior = least_senior(rich_team, cache, |idx| {
        cache.is_senior(idx) && cache.may_crew(idx, needy_team.aircraft)
    })?;
    let from = Position { team_index: rich, member_index: senior };

    match least_senior(needy_team, cache, |idx| cache.may_crew(idx, rich_team.aircraft)) {
        Some(member_index) => {
            Some(Action::Swap(from, Position { team_index: needy, member_index }))
        }
        None if rich_team.members.len() > rules.min_crew(rich_team.aircraft)
            && needy_team.members.len() < rules.max_crew(needy_team.aircraft) =>
        {
            Some(Action::Move { from, to: needy })
        }
        None => None,
    }
}

/// Finds a chain of exchanges that ends with a senior joining `needy` when
/// no single swap or move can.
///
/// The needy team hands a member to a second team, which hands one on, and
/// so on until some team hands a senior back to the needy team. Every hop
/// must respect the receiving team's type. A team only gives up a senior if
/// it keeps one, either because it holds several or because the member it
/// just received is a senior. Team sizes never change.
///
/// The search is breadth first over (team, received a senior) states, so the
/// shortest chain wins. A team can appear twice in the chain, once passing
/// a non-senior and once passing its senior after receiving another.
fn plan_cycle(
    roster: &Roster,
    cache: &TierCache,
    seniors: &[usize],
    needy: Index,
) -> Option<Action> {
    let teams = &roster.teams;
    let state = |team: Index, carries_senior: bool| team * 2 + usize::from(carries_senior);
    let mut came_from: Vec<Option<(usize, Position)>> = vec![None; teams.len() * 2];
    let mut seen = vec![false; teams.len() * 2];
    let mut queue = VecDeque::new();

    let start = state(needy, false);
    seen[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let (team, received_senior) = (current / 2, current % 2 == 1);
        let may_pass_senior = seniors[team] >= 2 || (seniors[team] == 1 && received_senior);

        for passes_senior in [false, true] {
            if passes_senior && !may_pass_senior {
                continue;
            }
            for target in (0..teams.len()).filter(|&target| target != team) {
                if target == needy && !passes_senior {
                    continue;
                }
                let aircraft = teams[target].aircraft;
                let Some(member_index) = least_senior(&teams[team], cache, |idx| {
                    cache.is_senior(idx) == passes_senior && cache.may_crew(idx, aircraft)
                }) else {
                    continue;
                };
                let position = Position { team_index: team, member_index };

                if target == needy {
                    let mut chain = vec![position];
                    let mut cursor = current;
                    while let Some((previous, position)) = came_from[cursor] {
                        chain.push(position);
                        cursor = previous;
                    }
                    chain.reverse();
                    return Some(Action::Cycle(chain));
                }

                let next = state(target, passes_senior);
                if !seen[next] {
                    seen[next] = true;
                    came_from[next] = Some((current, position));
                    queue.push_back(next);
                }
            }
        }
    }
    None
}

/// Moves seniors from teams holding more than one towards teams holding none.
///
/// Each applied action gives one needy team a senior and leaves every other
/// team with as many seniors as it needs. A direct swap or move with a rich
/// team is tried first, then a chain of exchanges through other teams. A
/// needy team that neither can serve is set aside for the rest of the run.
/// Returns the number of actions applied.
pub fn repair_fairness(roster: &mut Roster, cache: &TierCache, rules: &CrewRules) -> usize {
    let mut set_aside: HashSet<Index> = HashSet::new();
    let mut applied = 0;

    for _ in 0..cache.len() {
        let seniors: Vec<usize> =
            roster.teams.iter().map(|team| cache.count_tiers(team).seniors()).collect();
        let needy: Vec<Index> = (0..seniors.len())
            .filter(|index| seniors[*index] == 0 && !set_aside.contains(index))
            .collect();
        let rich: Vec<Index> = (0..seniors.len()).filter(|index| seniors[*index] > 1).collect();
        if needy.is_empty() || rich.is_empty() {
            break;
        }

        let found = needy.iter().find_map(|&needy| {
            let action = rich
                .iter()
                .find_map(|&rich| plan(roster, cache, rules, needy, rich))
                .or_else(|| plan_cycle(roster, cache, &seniors, needy));
            if action.is_none() {
                set_aside.insert(needy);
            }
            action
        });
        let Some(action) = found else {
            break;
        };

        tracing::debug!(?action, "rebalancing seniors");
        if let Err(err) = roster.act(action, cache) {
            tracing::warn!(%err, "planned fairness action was rejected");
            break;
        }
        applied += 1;
    }
    applied
}
