use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cache::TierCache;
use crate::model::entity::SeniorityTier;
use crate::model::group::MemberIdx;

/// Working order handed to the team builder, most senior cohorts first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CohortSplit {
    pub large_qualified: Vec<MemberIdx>,
    pub small_only: Vec<MemberIdx>,
}

impl CohortSplit {
    pub fn len(&self) -> usize {
        self.large_qualified.len() + self.small_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shuffles each seniority tier independently, concatenates the tiers in
/// priority order and splits the result by large-type qualification.
///
/// Each tier is sorted into display order before it is shuffled, so the
/// outcome depends only on the RNG state and not on how the pool was ordered.
pub fn split_cohorts<R: Rng + ?Sized>(cache: &TierCache, rng: &mut R) -> CohortSplit {
    let mut cohorts = (0..cache.len()).into_group_map_by(|&idx| cache.get(idx).tier);

    let mut working = Vec::with_capacity(cache.len());
    for tier in SeniorityTier::ALL {
        let mut cohort = cohorts.remove(&tier).unwrap_or_default();
        cohort.sort_by(|&a, &b| cache.compare(a, b));
        cohort.shuffle(rng);
        working.extend(cohort);
    }

    let (large_qualified, small_only): (Vec<MemberIdx>, Vec<MemberIdx>) =
        working.into_iter().partition(|&idx| cache.get(idx).large_qualified);

    tracing::debug!(
        large_qualified = large_qualified.len(),
        small_only = small_only.len(),
        "split pool into cohorts"
    );
    CohortSplit { large_qualified, small_only }
}
