use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::builder::{build_teams, place_leftovers};
use crate::cache::TierCache;
use crate::cohort::split_cohorts;
use crate::error::AllocationError;
use crate::model::condition::AllocationConfig;
use crate::model::entity::{CrewId, CrewMember};
use crate::model::group::{Roster, Team};
use crate::repair::repair_fairness;
use crate::validate::validate_teams;
use crate::warning::{Warning, WarningCode, Warnings};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub teams: Vec<Team>,
    pub warnings: Vec<Warning>,
}

impl AllocationResult {
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }

    /// Members named by warnings that left them off every team.
    pub fn unassigned(&self) -> Vec<&CrewId> {
        self.warnings
            .iter()
            .filter(|warning| warning.code.leaves_unassigned())
            .flat_map(|warning| warning.members.iter())
            .collect()
    }
}

/// Forms training teams from a crew pool.
///
/// The allocator owns its random source and nothing else, so calling
/// [`Allocator::form_teams`] again with the same input reshuffles the teams.
/// Inject a seeded RNG with [`Allocator::with_rng`] for a fixed outcome.
pub struct Allocator<R = SmallRng> {
    rng: R,
}

impl Allocator<SmallRng> {
    pub fn new() -> Self {
        Allocator { rng: SmallRng::from_entropy() }
    }
}

impl Default for Allocator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Allocator<R> {
    pub fn with_rng(rng: R) -> Self {
        Allocator { rng }
    }

    pub fn form_teams(
        &mut self,
        pool: &[CrewMember],
        config: &AllocationConfig,
    ) -> Result<AllocationResult, AllocationError> {
        let requested = config.requested_large_teams()?;
        let rules = &config.rules;
        let cache = TierCache::create(pool);
        let mut warnings = Warnings::default();

        let split = split_cohorts(&cache, &mut self.rng);
        let available = split.large_qualified.len();
        let outcome = build_teams(split, requested, rules, &cache);
        if outcome.large_formed < requested {
            warnings.push(Warning::new(
                WarningCode::InsufficientPoolForLargeTypeCount,
                format!(
                    "requested {} large teams but formed {}: only {} large-qualified members \
                     for teams of at least {}",
                    requested, outcome.large_formed, available, rules.large_min_crew
                ),
            ));
        }

        let mut roster = Roster::new(outcome.teams);
        place_leftovers(&mut roster, &outcome.leftover, &cache, rules, &mut warnings);

        let moves = repair_fairness(&mut roster, &cache, rules);
        validate_teams(&mut roster, &cache, rules, &mut warnings);

        roster.teams.sort_by_key(|team| (team.aircraft, team.seq));
        for team in roster.teams.iter_mut() {
            team.members.sort_by(|&a, &b| cache.compare(a, b));
        }

        tracing::debug!(
            pool = pool.len(),
            assigned = roster.member_count(),
            teams = roster.teams.len(),
            moves,
            warnings = warnings.as_slice().len(),
            "formed teams"
        );
        Ok(AllocationResult {
            teams: roster.teams.iter().map(|team| team.to_team(pool)).collect(),
            warnings: warnings.into_vec(),
        })
    }

    /// Same as [`Allocator::form_teams`]; named for the "reshuffle" request.
    pub fn reshuffle(
        &mut self,
        pool: &[CrewMember],
        config: &AllocationConfig,
    ) -> Result<AllocationResult, AllocationError> {
        self.form_teams(pool, config)
    }
}
