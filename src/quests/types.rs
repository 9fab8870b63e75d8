use crate::constants::NO_PREREQUISITE;
use crate::errors::DataError;
use std::collections::HashMap;

/// Direct dependency of a quest. At most one per quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerequisite {
    None,
    Quest(String),
}

impl Prerequisite {
    /// Parses the catalog value, where `NONE` (any case) or a blank means no dependency.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_PREREQUISITE) {
            Prerequisite::None
        } else {
            Prerequisite::Quest(trimmed.to_string())
        }
    }

    pub fn quest_id(&self) -> Option<&str> {
        match self {
            Prerequisite::None => None,
            Prerequisite::Quest(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    pub prerequisite: Prerequisite,
}

/// Immutable id -> definition table, iterated in load order.
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: Vec<QuestDefinition>,
    index: HashMap<String, usize>,
}

impl QuestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = QuestDefinition>,
    ) -> Result<Self, DataError> {
        let mut catalog = Self::new();
        for quest in definitions {
            catalog.insert(quest)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, quest: QuestDefinition) -> Result<(), DataError> {
        if self.index.contains_key(&quest.id) {
            return Err(DataError::DuplicateId(quest.id));
        }
        self.index.insert(quest.id.clone(), self.quests.len());
        self.quests.push(quest);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&QuestDefinition> {
        self.index.get(id).map(|&i| &self.quests[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.quests.iter()
    }
}
