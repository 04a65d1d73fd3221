//! The item catalog: a per-snapshot immutable mapping from normalized name
//! to item record, with derived per-class indices.
//!
//! A catalog is built wholesale by [`CatalogBuilder`] and never mutated
//! afterward; the engine swaps whole snapshots when the inventory source
//! refreshes, so readers always see either the old or the new catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::quality::Quality;

/// A single bank item with its three independent stock counters.
///
/// All fields are public: any combination of values is a valid record. An
/// item with every counter at zero is still a catalog entry (zero stock is
/// not "not found").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name, canonical casing. Normalization never overwrites this.
    pub name: String,
    /// Class/category association, if known (e.g. "wizard").
    pub class_key: Option<String>,
    /// Whether this item is a spell (scroll, tome, song...).
    pub is_spell: bool,
    pub raw_count: u32,
    pub enchanted_count: u32,
    pub legendary_count: u32,
    /// Which inventory source the record came from (display only).
    pub source: Option<String>,
    /// Upstream database id (display only).
    pub item_id: Option<u64>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_key: None,
            is_spell: false,
            raw_count: 0,
            enchanted_count: 0,
            legendary_count: 0,
            source: None,
            item_id: None,
        }
    }

    pub fn with_counts(mut self, raw: u32, enchanted: u32, legendary: u32) -> Self {
        self.raw_count = raw;
        self.enchanted_count = enchanted;
        self.legendary_count = legendary;
        self
    }

    pub fn with_class(mut self, class_key: impl Into<String>) -> Self {
        self.class_key = Some(class_key.into());
        self
    }

    pub fn as_spell(mut self) -> Self {
        self.is_spell = true;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Stock counter for one quality tier.
    pub fn count(&self, quality: Quality) -> u32 {
        match quality {
            Quality::Raw => self.raw_count,
            Quality::Enchanted => self.enchanted_count,
            Quality::Legendary => self.legendary_count,
        }
    }

    /// Whether the item is in stock at the given tier.
    pub fn has_quality(&self, quality: Quality) -> bool {
        self.count(quality) > 0
    }

    /// Tiers currently in stock, lowest first.
    pub fn available_qualities(&self) -> Vec<Quality> {
        Quality::all()
            .iter()
            .copied()
            .filter(|q| self.has_quality(*q))
            .collect()
    }

    /// Best tier in stock; Raw when everything is at zero (used by the
    /// transport's one-click add flow, which needs a default).
    pub fn highest_quality(&self) -> Quality {
        if self.legendary_count > 0 {
            Quality::Legendary
        } else if self.enchanted_count > 0 {
            Quality::Enchanted
        } else {
            Quality::Raw
        }
    }
}

/// Immutable snapshot of the known inventory.
///
/// Records keep insertion order, which the matcher relies on for its
/// deterministic first-seen-wins tie-break.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// (normalized key, record), in insertion order.
    entries: Vec<(String, ItemRecord)>,
    by_key: HashMap<String, usize>,
    /// class key -> non-spell entry indices, insertion order.
    class_items: HashMap<String, Vec<usize>>,
    /// class key -> spell entry indices, sorted by display name.
    class_spells: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// An empty catalog, for startup before the first refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&ItemRecord> {
        self.by_key.get(key).map(|&i| &self.entries[i].1)
    }

    /// Iterate (key, record) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Spell items for a class, pre-sorted by display name. Empty when the
    /// class is absent from the index.
    pub fn spells_for_class(&self, class_key: &str) -> Vec<&ItemRecord> {
        self.class_spells
            .get(class_key)
            .map(|indices| indices.iter().map(|&i| &self.entries[i].1).collect())
            .unwrap_or_default()
    }

    /// Non-spell items for a class, in insertion order.
    pub fn items_for_class(&self, class_key: &str) -> Vec<&ItemRecord> {
        self.class_items
            .get(class_key)
            .map(|indices| indices.iter().map(|&i| &self.entries[i].1).collect())
            .unwrap_or_default()
    }
}

/// Accumulates records, then derives the key map and class indices in one
/// step. The built catalog is complete before anyone can observe it.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<(String, ItemRecord)>,
    by_key: HashMap<String, usize>,
}

impl CatalogBuilder {
    /// Add a record. The key is derived from the display name via
    /// [`normalize`]; a record whose name normalizes to an existing key
    /// replaces the earlier record in place (keeping its position), and a
    /// name that normalizes to nothing is dropped.
    pub fn push(&mut self, record: ItemRecord) -> &mut Self {
        let key = normalize(&record.name);
        if key.is_empty() {
            return self;
        }
        match self.by_key.get(&key) {
            Some(&index) => {
                self.entries[index].1 = record;
            }
            None => {
                self.by_key.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
        self
    }

    pub fn build(self) -> Catalog {
        let mut class_items: HashMap<String, Vec<usize>> = HashMap::new();
        let mut class_spells: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, (_, record)) in self.entries.iter().enumerate() {
            if let Some(class_key) = &record.class_key {
                if record.is_spell {
                    class_spells.entry(class_key.clone()).or_default().push(index);
                } else {
                    class_items.entry(class_key.clone()).or_default().push(index);
                }
            }
        }

        // Spell listings render alphabetically.
        for indices in class_spells.values_mut() {
            indices.sort_by(|&a, &b| {
                let left = self.entries[a].1.name.to_lowercase();
                let right = self.entries[b].1.name.to_lowercase();
                left.cmp(&right)
            });
        }

        Catalog {
            entries: self.entries,
            by_key: self.by_key,
            class_items,
            class_spells,
        }
    }
}
