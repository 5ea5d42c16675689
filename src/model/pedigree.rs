//! Pedigree: a rooted family tree used by the inheritance engine.

use indexmap::IndexMap;

/// Biological sex of a pedigree member.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

/// One member of a [`Pedigree`].
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct Individual {
    pub name: String,
    pub sex: Sex,
    pub affected: bool,
    pub father: Option<String>,
    pub mother: Option<String>,
}

/// Error constructing a [`Pedigree`]: a parent reference names nobody in
/// the pedigree.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("individual {individual:?} references unknown parent {parent:?}")]
pub struct DanglingParentError {
    pub individual: String,
    pub parent: String,
}

/// An immutable family tree. Parents must either be absent or name another
/// individual already present in the same pedigree.
#[derive(Debug, Clone, PartialEq)]
pub struct Pedigree {
    members: IndexMap<String, Individual>,
}

impl Pedigree {
    /// Build a pedigree, validating that every parent reference resolves.
    pub fn new(individuals: Vec<Individual>) -> Result<Self, DanglingParentError> {
        let members: IndexMap<String, Individual> = individuals
            .into_iter()
            .map(|i| (i.name.clone(), i))
            .collect();

        for individual in members.values() {
            for parent in [&individual.father, &individual.mother].into_iter().flatten() {
                if !members.contains_key(parent) {
                    return Err(DanglingParentError {
                        individual: individual.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        Ok(Self { members })
    }

    pub fn get(&self, name: &str) -> Option<&Individual> {
        self.members.get(name)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.members.values()
    }

    pub fn affected(&self) -> impl Iterator<Item = &Individual> {
        self.members.values().filter(|i| i.affected)
    }

    pub fn unaffected(&self) -> impl Iterator<Item = &Individual> {
        self.members.values().filter(|i| !i.affected)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Unaffected parents of a given (presumably affected) individual.
    pub fn unaffected_parents_of(&self, name: &str) -> Vec<&Individual> {
        let Some(individual) = self.get(name) else {
            return Vec::new();
        };
        [&individual.father, &individual.mother]
            .into_iter()
            .flatten()
            .filter_map(|p| self.get(p))
            .filter(|p| !p.affected)
            .collect()
    }
}
