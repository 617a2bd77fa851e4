use itertools::Itertools;
use thiserror::Error;

use crate::cache::TierCache;
use crate::model::entity::AircraftType;
use crate::model::group::{MemberIdx, Roster};

pub type Index = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub team_index: Index,
    pub member_index: Index,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Swap(Position, Position),
    Move { from: Position, to: Index },
    /// Each member moves into the slot of the next position, the last one
    /// into the slot of the first.
    Cycle(Vec<Position>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Member {member} is not qualified for {aircraft:?}")]
    Unqualified { member: MemberIdx, aircraft: AircraftType },
}

impl Roster {
    fn member_at(&self, position: Position) -> Result<MemberIdx, ActionError> {
        self.teams
            .get(position.team_index)
            .and_then(|team| team.members.get(position.member_index))
            .copied()
            .ok_or(ActionError::InvalidPosition)
    }

    fn aircraft_at(&self, team_index: Index) -> Result<AircraftType, ActionError> {
        self.teams
            .get(team_index)
            .map(|team| team.aircraft)
            .ok_or(ActionError::InvalidPosition)
    }

    fn check_fit(
        &self,
        member: MemberIdx,
        team_index: Index,
        cache: &TierCache,
    ) -> Result<(), ActionError> {
        let aircraft = self.aircraft_at(team_index)?;
        if cache.may_crew(member, aircraft) {
            Ok(())
        } else {
            Err(ActionError::Unqualified { member, aircraft })
        }
    }

    /// Applies a move, swap or cycle after checking positions and qualifications.
    /// The roster is unchanged when an error is returned.
    pub fn act(&mut self, action: Action, cache: &TierCache) -> Result<(), ActionError> {
        match action {
            Action::Swap(position1, position2) => {
                if position1.team_index == position2.team_index {
                    return Err(ActionError::InvalidPosition);
                }
                let member1 = self.member_at(position1)?;
                let member2 = self.member_at(position2)?;
                self.check_fit(member1, position2.team_index, cache)?;
                self.check_fit(member2, position1.team_index, cache)?;
                self.teams[position1.team_index].members[position1.member_index] = member2;
                self.teams[position2.team_index].members[position2.member_index] = member1;
                Ok(())
            }
            Action::Move { from, to } => {
                if from.team_index == to {
                    return Err(ActionError::InvalidPosition);
                }
                let member = self.member_at(from)?;
                self.check_fit(member, to, cache)?;
                self.teams[from.team_index].members.remove(from.member_index);
                self.teams[to].members.push(member);
                Ok(())
            }
            Action::Cycle(positions) => {
                let hops = positions.iter().zip(positions.iter().cycle().skip(1));
                if positions.len() < 2
                    || !positions.iter().all_unique()
                    || hops.clone().any(|(from, to)| from.team_index == to.team_index)
                {
                    return Err(ActionError::InvalidPosition);
                }
                let members = positions
                    .iter()
                    .map(|&position| self.member_at(position))
                    .collect::<Result<Vec<MemberIdx>, ActionError>>()?;
                for (&member, (_, to)) in members.iter().zip(hops.clone()) {
                    self.check_fit(member, to.team_index, cache)?;
                }
                for (member, (_, to)) in members.into_iter().zip(hops) {
                    self.teams[to.team_index].members[to.member_index] = member;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::CrewMember;
    use crate::model::group::TeamDraft;

    fn pool() -> Vec<CrewMember> {
        vec![
            CrewMember::new("1", "Ana", "SC").with_qualification(AircraftType::Large),
            CrewMember::new("2", "Bo", "FA").with_qualification(AircraftType::Large),
            CrewMember::new("3", "Cy", "FA"),
            CrewMember::new("4", "Di", "FA"),
        ]
    }

    fn roster() -> Roster {
        Roster::new(vec![
            TeamDraft::new(AircraftType::Large, 1, vec![0, 1]),
            TeamDraft::new(AircraftType::Small, 1, vec![2, 3]),
        ])
    }

    fn swap_heads() -> Action {
        Action::Swap(
            Position { team_index: 0, member_index: 0 },
            Position { team_index: 1, member_index: 0 },
        )
    }

    #[test]
    fn swap_refuses_unqualified_member() {
        let pool = pool();
        let cache = TierCache::create(&pool);
        let mut roster = roster();
        let err = roster.act(swap_heads(), &cache).unwrap_err();
        assert_eq!(err, ActionError::Unqualified { member: 2, aircraft: AircraftType::Large });
        assert_eq!(roster.teams[0].members, vec![0, 1]);
        assert_eq!(roster.teams[1].members, vec![2, 3]);
    }

    #[test]
    fn swap_exchanges_members() {
        let mut pool = pool();
        pool[2] = pool[2].clone().with_qualification(AircraftType::Large);
        let cache = TierCache::create(&pool);
        let mut roster = roster();
        roster.act(swap_heads(), &cache).unwrap();
        assert_eq!(roster.teams[0].members, vec![2, 1]);
        assert_eq!(roster.teams[1].members, vec![0, 3]);
    }

    #[test]
    fn move_checks_target_qualification() {
        let pool = pool();
        let cache = TierCache::create(&pool);
        let mut roster = roster();
        let err = roster
            .act(Action::Move { from: Position { team_index: 1, member_index: 1 }, to: 0 }, &cache)
            .unwrap_err();
        assert_eq!(err, ActionError::Unqualified { member: 3, aircraft: AircraftType::Large });

        roster
            .act(Action::Move { from: Position { team_index: 0, member_index: 0 }, to: 1 }, &cache)
            .unwrap();
        assert_eq!(roster.teams[0].members, vec![1]);
        assert_eq!(roster.teams[1].members, vec![2, 3, 0]);
    }

    #[test]
    fn invalid_positions_are_rejected() {
        let pool = pool();
        let cache = TierCache::create(&pool);
        let mut roster = roster();
        let err = roster
            .act(Action::Move { from: Position { team_index: 5, member_index: 0 }, to: 1 }, &cache)
            .unwrap_err();
        assert_eq!(err, ActionError::InvalidPosition);
        let err = roster
            .act(
                Action::Swap(
                    Position { team_index: 0, member_index: 0 },
                    Position { team_index: 0, member_index: 1 },
                ),
                &cache,
            )
            .unwrap_err();
        assert_eq!(err, ActionError::InvalidPosition);
    }

    fn three_teams() -> (Vec<CrewMember>, Roster) {
        let pool = vec![
            CrewMember::new("1", "Ana", "SC").with_qualification(AircraftType::Large),
            CrewMember::new("2", "Bo", "FA").with_qualification(AircraftType::Large),
            CrewMember::new("3", "Cy", "FA").with_qualification(AircraftType::Large),
            CrewMember::new("4", "Di", "FA"),
        ];
        let roster = Roster::new(vec![
            TeamDraft::new(AircraftType::Large, 1, vec![0, 1]),
            TeamDraft::new(AircraftType::Small, 1, vec![2]),
            TeamDraft::new(AircraftType::Small, 2, vec![3]),
        ]);
        (pool, roster)
    }

    fn at(team_index: Index, member_index: Index) -> Position {
        Position { team_index, member_index }
    }

    #[test]
    fn cycle_rotates_members_through_three_teams() {
        let (pool, mut roster) = three_teams();
        let cache = TierCache::create(&pool);
        roster.act(Action::Cycle(vec![at(2, 0), at(1, 0), at(0, 0)]), &cache).unwrap();
        assert_eq!(roster.teams[0].members, vec![2, 1]);
        assert_eq!(roster.teams[1].members, vec![3]);
        assert_eq!(roster.teams[2].members, vec![0]);
    }

    #[test]
    fn cycle_is_rejected_whole_when_one_hop_is_unqualified() {
        let (pool, mut roster) = three_teams();
        let cache = TierCache::create(&pool);
        let before = roster.clone();
        let err = roster
            .act(Action::Cycle(vec![at(2, 0), at(0, 0), at(1, 0)]), &cache)
            .unwrap_err();
        assert_eq!(err, ActionError::Unqualified { member: 3, aircraft: AircraftType::Large });
        assert_eq!(roster, before);
    }

    #[test]
    fn cycle_needs_distinct_positions_on_other_teams() {
        let (pool, mut roster) = three_teams();
        let cache = TierCache::create(&pool);
        let rejected = [
            vec![at(0, 0)],
            vec![at(0, 0), at(0, 1)],
            vec![at(1, 0), at(2, 0), at(1, 0)],
        ];
        for positions in rejected {
            let err = roster.act(Action::Cycle(positions), &cache).unwrap_err();
            assert_eq!(err, ActionError::InvalidPosition);
        }
    }
}
