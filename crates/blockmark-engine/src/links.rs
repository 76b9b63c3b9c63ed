use std::collections::{BTreeMap, btree_map::Entry};

use serde::{Deserialize, Serialize};

/// Target of a reference-style link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDef {
    pub destination: String,
    pub title: Option<String>,
}

/// Normalized label → definition. The first definition of a label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable {
    defs: BTreeMap<String, LinkDef>,
}

impl LinkTable {
    /// Looks up `label`, normalizing it first.
    pub fn get(&self, label: &str) -> Option<&LinkDef> {
        self.defs.get(&normalize_label(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkDef)> {
        self.defs.iter().map(|(label, def)| (label.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Records a definition. Returns `false` when the label was already taken.
    pub(crate) fn insert(&mut self, label: &str, def: LinkDef) -> bool {
        match self.defs.entry(normalize_label(label)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(def);
                true
            }
        }
    }
}

/// Trims, collapses inner whitespace runs to one space and lowercases.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
