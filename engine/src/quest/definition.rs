//! Quest Prerequisite Definitions
//!
//! These structures are deserialized from `quest_data.json`.

use serde::{Deserialize, Serialize};

use super::title::normalize_title;

/// Prerequisites as they appear in `quest_data.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrerequisite {
    /// `[level, skill name]` pairs
    #[serde(default)]
    pub skills: Option<Vec<(i32, String)>>,
    #[serde(default)]
    pub quests: Option<Vec<String>>,
}

/// Minimum level in a named skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRequirement {
    pub level: i32,
    pub skill: String,
}

/// Everything a player needs before starting a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteEntry {
    /// Normalized title, also the catalog key
    pub quest_title: String,
    pub required_skills: Vec<SkillRequirement>,
    /// Normalized titles of quests that must be completed
    pub required_quests: Vec<String>,
}

impl PrerequisiteEntry {
    pub fn new(quest_title: &str) -> Self {
        Self {
            quest_title: normalize_title(quest_title),
            required_skills: Vec::new(),
            required_quests: Vec::new(),
        }
    }

    pub fn with_skill(mut self, level: i32, skill: &str) -> Self {
        self.required_skills.push(SkillRequirement {
            level,
            skill: skill.to_string(),
        });
        self
    }

    pub fn with_quest(mut self, title: &str) -> Self {
        self.required_quests.push(normalize_title(title));
        self
    }

    pub fn from_raw(title: &str, raw: &RawPrerequisite) -> Self {
        Self {
            quest_title: normalize_title(title),
            required_skills: raw
                .skills
                .iter()
                .flatten()
                .map(|(level, skill)| SkillRequirement {
                    level: *level,
                    skill: skill.clone(),
                })
                .collect(),
            required_quests: raw
                .quests
                .iter()
                .flatten()
                .map(|q| normalize_title(q))
                .collect(),
        }
    }

    /// True when the quest has neither skill nor quest requirements
    pub fn is_unrestricted(&self) -> bool {
        self.required_skills.is_empty() && self.required_quests.is_empty()
    }
}
