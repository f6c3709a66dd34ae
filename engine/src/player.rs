//! Player profile snapshot
//!
//! Decoded from a RuneMetrics profile body. Building a snapshot never
//! touches the network; history is fetched separately and attached by the
//! caller if it wants it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::quest::SkillMap;
use crate::skills::{RawSkillValue, SkillProgress, SkillType};

/// Profile body as returned by the profile endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "combatlevel")]
    pub combat_level: i32,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default, rename = "totalskill")]
    pub total_skill: i32,
    /// Stored at 10x the displayed value
    #[serde(default, rename = "totalxp")]
    pub total_xp: i64,
    #[serde(default, rename = "questscomplete")]
    pub quests_complete: i32,
    #[serde(default, rename = "questsstarted")]
    pub quests_started: i32,
    #[serde(default, rename = "questsnotstarted")]
    pub quests_not_started: i32,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default, rename = "skillvalues")]
    pub skill_values: Vec<RawSkillValue>,
    #[serde(default, rename = "playtimedays")]
    pub play_time_days: Option<f64>,
    #[serde(default, rename = "playtimehours")]
    pub play_time_hours: Option<f64>,
}

/// Adventurer's log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub date: String,
    pub details: String,
    pub text: String,
}

/// Immutable view of one player at fetch time
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub combat_level: i32,
    pub rank: Option<i64>,
    pub total_skill: i32,
    pub total_experience: i64,
    pub quests_complete: i32,
    pub quests_started: i32,
    pub quests_not_started: i32,
    pub activities: Vec<Activity>,
    pub play_time_days: Option<f64>,
    skills: SkillMap,
}

impl PlayerSnapshot {
    pub fn from_profile(raw: &RawProfile) -> Result<Self> {
        if let Some(ref error) = raw.error {
            return Err(if error == "PROFILE_PRIVATE" {
                EngineError::AuthenticationRequired
            } else {
                EngineError::not_found("player", error.clone())
            });
        }

        if raw.skill_values.is_empty() {
            return Err(EngineError::Validation(format!(
                "Profile for '{}' carries no skill values",
                raw.name
            )));
        }

        let mut skills = SkillMap::new();
        for value in &raw.skill_values {
            let progress = SkillProgress::from_raw(value)?;
            skills.insert(progress.name().to_string(), progress);
        }
        if skills.len() < SkillType::ALL.len() {
            warn!(
                "Profile for '{}' lists {} of {} skills",
                raw.name,
                skills.len(),
                SkillType::ALL.len()
            );
        }

        let play_time_days = raw
            .play_time_days
            .map(|days| days + raw.play_time_hours.unwrap_or(0.0) / 24.0);

        Ok(Self {
            name: raw.name.clone(),
            combat_level: raw.combat_level,
            rank: raw.rank.as_deref().and_then(parse_rank),
            total_skill: raw.total_skill,
            total_experience: raw.total_xp / 10,
            quests_complete: raw.quests_complete,
            quests_started: raw.quests_started,
            quests_not_started: raw.quests_not_started,
            activities: raw.activities.clone(),
            play_time_days,
            skills,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawProfile = serde_json::from_str(content).map_err(|source| EngineError::Parse {
            context: "player profile".to_string(),
            source,
        })?;
        Self::from_profile(&raw)
    }

    /// Skills keyed by display name
    pub fn skills(&self) -> &SkillMap {
        &self.skills
    }

    pub fn skill(&self, skill: SkillType) -> Result<&SkillProgress> {
        self.skills
            .get(skill.display_name())
            .ok_or_else(|| EngineError::not_found("skill", skill.display_name()))
    }

    /// Skills in catalog order
    pub fn skills_in_order(&self) -> Vec<&SkillProgress> {
        SkillType::ALL
            .iter()
            .filter_map(|s| self.skills.get(s.display_name()))
            .collect()
    }

    /// Sum of all skill levels present in the snapshot
    pub fn total_level(&self) -> i32 {
        self.skills.values().map(|s| s.level).sum()
    }
}

/// "1,234,567" -> 1234567
fn parse_rank(rank: &str) -> Option<i64> {
    rank.replace(',', "").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "name": "Zezima",
        "combatlevel": 138,
        "rank": "12,345",
        "totalskill": 2898,
        "totalxp": 54321000,
        "questscomplete": 250,
        "questsstarted": 3,
        "questsnotstarted": 40,
        "activities": [
            {"date": "16-Oct-2026 11:58",
             "details": "I levelled my Woodcutting skill, I am now level 75.",
             "text": "Levelled up Woodcutting."}
        ],
        "skillvalues": [
            {"level": 75, "xp": 12500000, "rank": 200000, "id": 8},
            {"level": 99, "xp": 130344310, "rank": 1000, "id": 0}
        ],
        "playtimedays": 10,
        "playtimehours": 12
    }"#;

    #[test]
    fn test_from_profile() {
        let player = PlayerSnapshot::from_json_str(PROFILE).unwrap();
        assert_eq!(player.name, "Zezima");
        assert_eq!(player.rank, Some(12_345));
        assert_eq!(player.total_experience, 5_432_100);
        assert_eq!(player.play_time_days, Some(10.5));
        assert_eq!(player.activities.len(), 1);

        let wc = player.skill(SkillType::Woodcutting).unwrap();
        assert_eq!(wc.level, 75);
        assert_eq!(wc.experience, 1_250_000);
        assert_eq!(player.skills()["Attack"].experience, 13_034_431);
        assert_eq!(player.total_level(), 174);

        let ordered: Vec<&str> = player.skills_in_order().iter().map(|s| s.name()).collect();
        assert_eq!(ordered, vec!["Attack", "Woodcutting"]);
    }

    #[test]
    fn test_private_profile() {
        let body = r#"{"error": "PROFILE_PRIVATE", "loggedIn": "false"}"#;
        let result = PlayerSnapshot::from_json_str(body);
        assert!(matches!(result, Err(EngineError::AuthenticationRequired)));
    }

    #[test]
    fn test_unknown_player() {
        let body = r#"{"error": "NO_PROFILE", "loggedIn": "false"}"#;
        let result = PlayerSnapshot::from_json_str(body);
        assert!(matches!(result, Err(EngineError::NotFound { kind: "player", .. })));
    }

    #[test]
    fn test_profile_without_skills_rejected() {
        assert!(matches!(
            PlayerSnapshot::from_json_str("{}"),
            Err(EngineError::Validation(_))
        ));

        let empty = r#"{"name": "Zezima", "totalxp": 0, "skillvalues": []}"#;
        assert!(matches!(
            PlayerSnapshot::from_json_str(empty),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_skill_lookup() {
        let player = PlayerSnapshot::from_json_str(PROFILE).unwrap();
        assert!(matches!(
            player.skill(SkillType::Invention),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("1,234,567"), Some(1_234_567));
        assert_eq!(parse_rank("42"), Some(42));
        assert_eq!(parse_rank("unranked"), None);
    }
}
