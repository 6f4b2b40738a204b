//! Transient partition of a population into species.
//!
//! Every generation a speciated population hands its individuals over to a
//! [`Species`], the model evolves each group on its own, and the groups are
//! concatenated back. The merge does not keep a global order: the engine
//! re-evaluates and re-sorts right after.

use crate::types::Individual;

/// A population split into disjoint groups.
///
/// Groups are contiguous fitness bands of the (sorted) input: the first
/// group holds the best individuals. Group sizes differ by at most one, and
/// trailing groups are empty when there are more species than individuals.
#[derive(Debug, Clone)]
pub struct Species<G> {
    groups: Vec<Vec<Individual<G>>>,
}

impl<G> Species<G> {
    /// Splits `individuals` into `count` groups, in order.
    ///
    /// Every individual lands in exactly one group. A `count` of zero is
    /// treated as one group.
    pub fn partition(individuals: Vec<Individual<G>>, count: usize) -> Self {
        let count = count.max(1);
        let n = individuals.len();
        let base = n / count;
        let extra = n % count;

        let mut groups: Vec<Vec<Individual<G>>> = Vec::with_capacity(count);
        let mut rest = individuals.into_iter();
        for k in 0..count {
            let size = base + usize::from(k < extra);
            groups.push(rest.by_ref().take(size).collect());
        }
        Self { groups }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there is no group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of individuals across groups.
    pub fn individual_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Read access to the groups.
    pub fn groups(&self) -> &[Vec<Individual<G>>] {
        &self.groups
    }

    /// Mutable access to the groups, one model application per group.
    pub fn groups_mut(&mut self) -> &mut [Vec<Individual<G>>] {
        &mut self.groups
    }

    /// Concatenates the groups back into one individual sequence.
    pub fn merge(self) -> Vec<Individual<G>> {
        let mut merged = Vec::with_capacity(self.individual_count());
        for group in self.groups {
            merged.extend(group);
        }
        merged
    }
}
