//! Facts, entity ids, and the entity universe.

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer entity (or relation) identifier.
pub type EntityId = u64;

/// Column offset of the subject in a fact.
pub const SUBJECT: usize = 0;
/// Column offset of the relation in a fact.
pub const RELATION: usize = 1;
/// Column offset of the object in a fact.
pub const OBJECT: usize = 2;

/// A (subject, relation, object) triple of integer ids.
///
/// Columns are positional: 0 = subject, 1 = relation, 2 = object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    /// Subject entity (head).
    pub subject: EntityId,
    /// Relation id.
    pub relation: EntityId,
    /// Object entity (tail).
    pub object: EntityId,
}

impl Fact {
    /// Create a new fact from subject, relation, object.
    pub fn new(subject: EntityId, relation: EntityId, object: EntityId) -> Self {
        Self {
            subject,
            relation,
            object,
        }
    }

    /// The three columns in positional order.
    pub fn to_array(self) -> [EntityId; 3] {
        [self.subject, self.relation, self.object]
    }
}

impl From<[EntityId; 3]> for Fact {
    fn from([subject, relation, object]: [EntityId; 3]) -> Self {
        Self::new(subject, relation, object)
    }
}

impl From<(EntityId, EntityId, EntityId)> for Fact {
    fn from((subject, relation, object): (EntityId, EntityId, EntityId)) -> Self {
        Self::new(subject, relation, object)
    }
}

impl From<Fact> for [EntityId; 3] {
    fn from(f: Fact) -> Self {
        f.to_array()
    }
}

impl Index<usize> for Fact {
    type Output = EntityId;

    fn index(&self, column: usize) -> &EntityId {
        match column {
            SUBJECT => &self.subject,
            RELATION => &self.relation,
            OBJECT => &self.object,
            _ => panic!("fact column {column} out of range (0..3)"),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.relation, self.object)
    }
}

/// Which slot of a fact is replaced by candidate entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionSide {
    /// Replace the subject: rank (?, r, o).
    Subject,
    /// Replace the object: rank (s, r, ?).
    Object,
}

impl CorruptionSide {
    /// Both sides, subject first.
    pub const BOTH: [CorruptionSide; 2] = [CorruptionSide::Subject, CorruptionSide::Object];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for CorruptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered set of every known entity id.
///
/// Order is preserved and is the order candidates are generated in. Ids must
/// be distinct but need not be contiguous or sorted.
#[derive(Debug, Clone)]
pub struct EntityUniverse {
    entities: Vec<EntityId>,
    members: HashSet<EntityId>,
}

impl EntityUniverse {
    /// Build a universe, rejecting empty and duplicate-bearing inputs.
    pub fn new(entities: Vec<EntityId>) -> Result<Self> {
        if entities.is_empty() {
            return Err(Error::EmptyUniverse);
        }
        let mut members = HashSet::with_capacity(entities.len());
        for &e in &entities {
            if !members.insert(e) {
                return Err(Error::DuplicateEntity(e));
            }
        }
        Ok(Self { entities, members })
    }

    /// Dense universe `0..num_entities`.
    pub fn dense(num_entities: u64) -> Result<Self> {
        Self::new((0..num_entities).collect())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Never true: construction rejects empty universes.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }
}

impl TryFrom<Vec<EntityId>> for EntityUniverse {
    type Error = Error;

    fn try_from(entities: Vec<EntityId>) -> Result<Self> {
        Self::new(entities)
    }
}
