use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;

use crate::model::entity::{AircraftType, CrewId, CrewMember, SeniorityTier};
use crate::model::group::{MemberIdx, TeamDraft};
use crate::rank;

/// Per-member facts derived once from the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMember {
    pub tier: SeniorityTier,
    pub order: u32,
    pub large_qualified: bool,
}

impl CachedMember {
    fn create(member: &CrewMember) -> CachedMember {
        CachedMember {
            tier: member.tier(),
            order: member.rank_order(),
            large_qualified: member.is_qualified_for(AircraftType::Large),
        }
    }

    /// Seniority key; smaller is more senior.
    pub fn key(&self) -> (SeniorityTier, u32) {
        (self.tier, self.order)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierCounter(HashMap<SeniorityTier, usize>);

impl From<Vec<SeniorityTier>> for TierCounter {
    fn from(tiers: Vec<SeniorityTier>) -> Self {
        let mut counter = HashMap::new();
        for tier in tiers {
            *counter.entry(tier).or_insert(0) += 1;
        }
        TierCounter(counter)
    }
}

impl TierCounter {
    pub fn get(&self, tier: SeniorityTier) -> usize {
        self.0.get(&tier).copied().unwrap_or(0)
    }

    /// Members at Senior or above.
    pub fn seniors(&self) -> usize {
        self.get(SeniorityTier::HigherSenior) + self.get(SeniorityTier::Senior)
    }
}

/// Lookup from pool index (and identifier) to derived member facts, kept for
/// the whole allocation run.
pub struct TierCache<'a> {
    pool: &'a [CrewMember],
    members: Vec<CachedMember>,
    by_id: HashMap<&'a CrewId, MemberIdx>,
}

impl<'a> TierCache<'a> {
    pub fn create(pool: &'a [CrewMember]) -> TierCache<'a> {
        let members = pool.iter().map(CachedMember::create).collect();
        let mut by_id = HashMap::new();
        for (idx, member) in pool.iter().enumerate() {
            by_id.entry(&member.id).or_insert(idx);
        }
        TierCache { pool, members, by_id }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, idx: MemberIdx) -> &CachedMember {
        &self.members[idx]
    }

    pub fn member(&self, idx: MemberIdx) -> &'a CrewMember {
        &self.pool[idx]
    }

    /// Tier of the first pool member with this identifier.
    pub fn tier_of(&self, id: &CrewId) -> Option<SeniorityTier> {
        self.by_id.get(id).map(|&idx| self.members[idx].tier)
    }

    pub fn is_senior(&self, idx: MemberIdx) -> bool {
        self.members[idx].tier.is_senior()
    }

    /// Whether the member may sit on a team of this type. Unrestricted types
    /// take anyone.
    pub fn may_crew(&self, idx: MemberIdx, aircraft: AircraftType) -> bool {
        !aircraft.is_restricted() || self.members[idx].large_qualified
    }

    pub fn count_tiers(&self, team: &TeamDraft) -> TierCounter {
        team.members
            .iter()
            .map(|&idx| self.members[idx].tier)
            .collect::<Vec<SeniorityTier>>()
            .into()
    }

    /// Display order: tier, then rank order, then natural identifier order.
    pub fn compare(&self, a: MemberIdx, b: MemberIdx) -> Ordering {
        self.members[a]
            .key()
            .cmp(&self.members[b].key())
            .then_with(|| rank::natural_cmp(&self.pool[a].id.0, &self.pool[b].id.0))
    }

    pub fn names(&self, members: &[MemberIdx]) -> String {
        members
            .iter()
            .map(|&idx| format!("{} ({})", self.pool[idx].name, self.pool[idx].id))
            .join(", ")
    }

    pub fn ids(&self, members: &[MemberIdx]) -> Vec<CrewId> {
        members.iter().map(|&idx| self.pool[idx].id.clone()).collect()
    }
}
