//! Quest eligibility
//!
//! A not-started quest is eligible when the player meets every skill level
//! it lists and has completed every quest it lists. Missing data (no catalog
//! entry, a skill absent from the player's map) is an error, not a pass.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::definition::SkillRequirement;
use super::registry::PrerequisiteCatalog;
use super::state::{completed_title_set, Quest, QuestSet};
use super::title::normalize_title;
use crate::error::{EngineError, Result};
use crate::skills::SkillProgress;

/// Player skills keyed by display name
pub type SkillMap = HashMap<String, SkillProgress>;

/// Filter `not_started` down to the quests whose prerequisites are met.
/// Output keeps the input order.
pub fn eligible(
    not_started: &[Quest],
    completed: &[Quest],
    skills: &SkillMap,
    catalog: &PrerequisiteCatalog,
) -> Result<Vec<Quest>> {
    let completed_titles = completed_title_set(completed);
    let mut result = Vec::new();

    for quest in not_started {
        let entry = catalog.get(&quest.title)?;

        let skills_met = check_skill_reqs(skills, &entry.required_skills)?;
        let quests_met = check_quest_reqs(&completed_titles, &entry.required_quests);

        if skills_met && quests_met {
            result.push(quest.clone());
        } else {
            debug!(
                "'{}' not eligible (skills met: {}, quests met: {})",
                quest.title, skills_met, quests_met
            );
        }
    }

    Ok(result)
}

/// Every requirement's skill must be present in `skills` at or above its level.
pub fn check_skill_reqs(skills: &SkillMap, requirements: &[SkillRequirement]) -> Result<bool> {
    for requirement in requirements {
        let progress = skills
            .get(&normalize_title(&requirement.skill))
            .ok_or_else(|| EngineError::not_found("skill", requirement.skill.clone()))?;
        if progress.level < requirement.level {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Every required title must be in the completed set. Titles on both sides
/// are compared in normalized form.
pub fn check_quest_reqs(completed_titles: &HashSet<String>, requirements: &[String]) -> bool {
    requirements
        .iter()
        .all(|title| completed_titles.contains(&normalize_title(title)))
}

impl QuestSet {
    /// Not-started quests the player could begin now
    pub fn eligible(&self, skills: &SkillMap, catalog: &PrerequisiteCatalog) -> Result<Vec<Quest>> {
        eligible(self.not_started(), self.completed(), skills, catalog)
    }
}
