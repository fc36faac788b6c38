//! Labels and labelings.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::entity::Entity;

/// Dense label assigned to an entity in one generation.
///
/// Label values carry no meaning across generations; only the partition does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(u32);

impl Label {
    /// Create a label.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw label value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generation's assignment of labels to entities.
///
/// Backed by a `BTreeMap` so iteration is in entity order. Serialized as a
/// list of `[entity, label]` entries, since JSON object keys must be strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Entity, Label)>", into = "Vec<(Entity, Label)>")]
pub struct Labeling(BTreeMap<Entity, Label>);

impl Labeling {
    /// Create an empty labeling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of an entity.
    pub fn get(&self, entity: &Entity) -> Option<Label> {
        self.0.get(entity).copied()
    }

    /// Set the label of an entity.
    pub fn insert(&mut self, entity: Entity, label: Label) {
        self.0.insert(entity, label);
    }

    /// Whether the entity is labeled.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.0.contains_key(entity)
    }

    /// Number of labeled entities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entity is labeled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate (entity, label) in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Entity, Label)> + '_ {
        self.0.iter().map(|(e, l)| (e, *l))
    }

    /// Iterate entities in order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.0.keys()
    }

    /// Number of distinct labels in use.
    pub fn distinct_count(&self) -> usize {
        self.0.values().collect::<BTreeSet<_>>().len()
    }

    /// Group entities by label. Classes are keyed by label, members in entity order.
    pub fn partition(&self) -> BTreeMap<Label, Vec<Entity>> {
        let mut classes: BTreeMap<Label, Vec<Entity>> = BTreeMap::new();
        for (entity, label) in &self.0 {
            classes.entry(*label).or_default().push(*entity);
        }
        classes
    }

    /// Number of entities carrying each label.
    pub fn class_sizes(&self) -> BTreeMap<Label, usize> {
        let mut sizes: BTreeMap<Label, usize> = BTreeMap::new();
        for label in self.0.values() {
            *sizes.entry(*label).or_default() += 1;
        }
        sizes
    }

    /// Whether this labeling's partition refines `coarser`'s.
    ///
    /// True when both label the same entities and any two entities sharing a
    /// label here also share a label in `coarser`.
    pub fn refines(&self, coarser: &Labeling) -> bool {
        if self.0.len() != coarser.0.len() {
            return false;
        }
        // Each fine class must map into exactly one coarse class.
        let mut image: BTreeMap<Label, Label> = BTreeMap::new();
        for (entity, fine) in &self.0 {
            let Some(coarse) = coarser.get(entity) else {
                return false;
            };
            match image.get(fine) {
                Some(seen) if *seen != coarse => return false,
                Some(_) => {}
                None => {
                    image.insert(*fine, coarse);
                }
            }
        }
        true
    }

    /// Whether both labelings induce the same partition, regardless of label values.
    pub fn same_partition(&self, other: &Labeling) -> bool {
        self.refines(other) && other.refines(self)
    }
}

impl From<BTreeMap<Entity, Label>> for Labeling {
    fn from(map: BTreeMap<Entity, Label>) -> Self {
        Self(map)
    }
}

impl From<Vec<(Entity, Label)>> for Labeling {
    fn from(entries: Vec<(Entity, Label)>) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl From<Labeling> for Vec<(Entity, Label)> {
    fn from(labeling: Labeling) -> Self {
        labeling.0.into_iter().collect()
    }
}

impl FromIterator<(Entity, Label)> for Labeling {
    fn from_iter<I: IntoIterator<Item = (Entity, Label)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
