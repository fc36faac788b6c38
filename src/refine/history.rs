//! Generation history.

use serde::{Deserialize, Serialize};

use crate::types::{Entity, Label, Labeling};

/// One committed labeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Iteration that produced this labeling (0 for the seed).
    pub iteration: u32,
    /// Labels of every entity.
    pub labels: Labeling,
}

/// Append-only sequence of generations.
///
/// Invariant: `generations[i].iteration == i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    generations: Vec<Generation>,
}

impl History {
    /// Start a history at generation 0.
    pub(crate) fn start(labels: Labeling) -> Self {
        Self {
            generations: vec![Generation { iteration: 0, labels }],
        }
    }

    /// Append the next generation, returning its iteration.
    pub(crate) fn push(&mut self, labels: Labeling) -> u32 {
        let iteration = self.generations.len() as u32;
        self.generations.push(Generation { iteration, labels });
        iteration
    }

    /// Generation `iteration`, if it exists.
    pub fn at(&self, iteration: u32) -> Option<&Generation> {
        self.generations.get(iteration as usize)
    }

    /// Most recent generation.
    pub fn latest(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// Number of generations, including generation 0.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether no generation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Iterate generations oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Generation> + '_ {
        self.generations.iter()
    }

    /// Label of `entity` as it was `generations_ago` generations before the latest.
    pub fn label_generations_ago(&self, entity: &Entity, generations_ago: u32) -> Option<Label> {
        let latest = self.generations.len().checked_sub(1)?;
        let index = latest.checked_sub(generations_ago as usize)?;
        self.generations.get(index)?.labels.get(entity)
    }

    /// Distinct label count of every generation, oldest first.
    pub fn label_counts(&self) -> Vec<usize> {
        self.generations
            .iter()
            .map(|g| g.labels.distinct_count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeId;

    fn node(n: u64) -> Entity {
        Entity::Node(NodeId::new(n))
    }

    fn labeling(labels: &[(u64, u32)]) -> Labeling {
        labels.iter().map(|&(n, l)| (node(n), Label::new(l))).collect()
    }

    #[test]
    fn test_iterations_are_indices() {
        let mut history = History::start(labeling(&[(1, 0), (2, 0)]));
        assert_eq!(history.push(labeling(&[(1, 0), (2, 1)])), 1);
        assert_eq!(history.push(labeling(&[(1, 1), (2, 0)])), 2);

        assert_eq!(history.len(), 3);
        for (i, g) in history.iter().enumerate() {
            assert_eq!(g.iteration as usize, i);
        }
        assert!(history.at(3).is_none());
    }

    #[test]
    fn test_label_generations_ago() {
        let mut history = History::start(labeling(&[(1, 0), (2, 0)]));
        history.push(labeling(&[(1, 0), (2, 1)]));

        assert_eq!(history.label_generations_ago(&node(2), 0), Some(Label::new(1)));
        assert_eq!(history.label_generations_ago(&node(2), 1), Some(Label::new(0)));
        assert_eq!(history.label_generations_ago(&node(2), 2), None);
        assert_eq!(history.label_generations_ago(&node(9), 0), None);
    }

    #[test]
    fn test_label_counts() {
        let mut history = History::start(labeling(&[(1, 0), (2, 0), (3, 0)]));
        history.push(labeling(&[(1, 0), (2, 1), (3, 0)]));
        assert_eq!(history.label_counts(), vec![1, 2]);
    }
}
