//! Prerequisite Catalog
//!
//! Read-only lookup from normalized quest title to its prerequisites.

use std::collections::HashMap;

use tracing::warn;

use super::definition::{PrerequisiteEntry, RawPrerequisite};
use super::state::QuestSet;
use super::title::normalize_title;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default)]
pub struct PrerequisiteCatalog {
    entries: HashMap<String, PrerequisiteEntry>,
}

impl PrerequisiteCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Parse a `quest_data.json` document keyed by quest title
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, RawPrerequisite> =
            serde_json::from_str(content).map_err(|source| EngineError::Parse {
                context: "quest prerequisite table".to_string(),
                source,
            })?;

        let mut catalog = Self::new();
        for (title, prerequisite) in &raw {
            catalog.insert(PrerequisiteEntry::from_raw(title, prerequisite));
        }
        catalog.validate_quest_references();

        Ok(catalog)
    }

    pub fn insert(&mut self, entry: PrerequisiteEntry) {
        if self.entries.contains_key(&entry.quest_title) {
            warn!("Duplicate prerequisite entry '{}', overwriting", entry.quest_title);
        }
        self.entries.insert(entry.quest_title.clone(), entry);
    }

    /// Warn about required quests that have no entry of their own
    fn validate_quest_references(&self) {
        for entry in self.entries.values() {
            for required in &entry.required_quests {
                if !self.entries.contains_key(required) {
                    warn!(
                        "Quest '{}' requires '{}', which has no catalog entry",
                        entry.quest_title, required
                    );
                }
            }
        }
    }

    /// Entry for a quest. Missing entries are an error, never "no requirements".
    pub fn get(&self, title: &str) -> Result<&PrerequisiteEntry> {
        let key = normalize_title(title);
        self.entries
            .get(&key)
            .ok_or_else(|| EngineError::not_found("prerequisite entry", key))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(&normalize_title(title))
    }

    /// Titles of quests in the set with no catalog entry, in set order
    pub fn missing_titles(&self, quests: &QuestSet) -> Vec<String> {
        quests
            .all()
            .map(|q| q.normalized_title())
            .filter(|title| !self.entries.contains_key(title))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::state::{Quest, QuestStatus, RawQuestRecord};

    const QUEST_DATA: &str = r#"{
        "Waterfall": {"skills": null, "quests": null},
        "Legends' Quest": {
            "skills": [[50, "Agility"], [56, "Woodcutting"]],
            "quests": ["Waterfall", "Heroes' Quest"]
        },
        "Heroes' Quest": {"skills": [[53, "Herblore"]], "quests": ["Dragon Slayer"]}
    }"#;

    #[test]
    fn test_load_catalog() {
        let catalog = PrerequisiteCatalog::from_json_str(QUEST_DATA).unwrap();
        assert_eq!(catalog.len(), 3);

        let legends = catalog.get("legends' quest").unwrap();
        assert_eq!(legends.required_skills.len(), 2);
        assert_eq!(legends.required_quests, vec!["Waterfall", "Heroes' Quest"]);
        assert!(catalog.get("Waterfall").unwrap().is_unrestricted());
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let catalog = PrerequisiteCatalog::from_json_str(QUEST_DATA).unwrap();
        assert!(matches!(
            catalog.get("Plague City"),
            Err(EngineError::NotFound { kind: "prerequisite entry", .. })
        ));
        assert!(!catalog.contains("Plague City"));
    }

    #[test]
    fn test_missing_titles() {
        let catalog = PrerequisiteCatalog::from_json_str(QUEST_DATA).unwrap();
        let records: Vec<RawQuestRecord> = serde_json::from_str(
            r#"[
                {"title": "Plague City", "status": "NOT_STARTED"},
                {"title": "waterfall", "status": "STARTED"},
                {"title": "Dragon Slayer", "status": "COMPLETED"}
            ]"#,
        )
        .unwrap();
        let quests = QuestSet::partition(&records).unwrap();

        assert_eq!(
            catalog.missing_titles(&quests),
            vec!["Plague City".to_string(), "Dragon Slayer".to_string()]
        );
    }

    #[test]
    fn test_insert_normalizes() {
        let mut catalog = PrerequisiteCatalog::new();
        catalog.insert(PrerequisiteEntry::new("the restless ghost"));
        assert!(catalog.contains("The Restless Ghost"));

        let quest = Quest::new("THE RESTLESS GHOST", QuestStatus::NotStarted);
        assert!(catalog.get(&quest.title).is_ok());
    }

    #[test]
    fn test_malformed_table() {
        assert!(matches!(
            PrerequisiteCatalog::from_json_str(r#"{"Waterfall": {"skills": [["x"]]}}"#),
            Err(EngineError::Parse { .. })
        ));
    }
}
