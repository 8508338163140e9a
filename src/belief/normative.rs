use crate::individual::Individual;

/// Per task position, how often each resource appears among accepted individuals.
///
/// The table holds raw counts. They are not normalized: relative counts are
/// all that biased sampling and the preferred-resource query need.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NormativeKnowledge {
    num_resources: usize,
    counts: Vec<Vec<u32>>,
}

impl NormativeKnowledge {
    /// Creates an all-zero table with one row per task.
    pub fn new(num_tasks: usize, num_resources: usize) -> Self {
        Self {
            num_resources,
            counts: vec![vec![0; num_resources]; num_tasks],
        }
    }

    /// Rebuilds the table from scratch out of `accepted`.
    ///
    /// Genes outside the table are ignored; the driver guarantees they never occur.
    pub fn rebuild<'a, I>(&mut self, accepted: I)
    where
        I: IntoIterator<Item = &'a Individual>,
    {
        for row in &mut self.counts {
            row.iter_mut().for_each(|c| *c = 0);
        }

        for individual in accepted {
            for (row, &resource) in self.counts.iter_mut().zip(individual.genes()) {
                if let Some(count) = row.get_mut(resource) {
                    *count += 1;
                }
            }
        }
    }

    /// Counts for one task position.
    pub fn counts(&self, position: usize) -> &[u32] {
        &self.counts[position]
    }

    pub fn table(&self) -> &[Vec<u32>] {
        &self.counts
    }

    /// Whether any accepted individual contributed to `position`.
    pub fn has_observations(&self, position: usize) -> bool {
        self.counts[position].iter().any(|&c| c > 0)
    }

    /// The most frequent resource at `position`, lowest index on ties.
    /// `None` before any observation.
    pub fn most_common(&self, position: usize) -> Option<usize> {
        let row = &self.counts[position];
        let max = *row.iter().max()?;
        if max == 0 {
            return None;
        }
        row.iter().position(|&c| c == max)
    }

    /// Resources used at `position` at least half as often as the most common
    /// one. Every resource is preferred before any observation.
    pub fn preferred(&self, position: usize) -> Vec<usize> {
        let row = &self.counts[position];
        let max = row.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return (0..self.num_resources).collect();
        }

        row.iter()
            .enumerate()
            .filter(|&(_, &count)| 2 * count >= max)
            .map(|(resource, _)| resource)
            .collect()
    }
}
