//! Monthly XP history
//!
//! One `xp-monthly` response per skill. Responses are keyed by skill on
//! insert so the order they arrive in does not matter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::skills::SkillType;

#[derive(Debug, Clone, Deserialize)]
pub struct RawMonthlyResponse {
    #[serde(default, rename = "monthlyXpGain")]
    pub monthly_xp_gain: Vec<RawSkillMonthly>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSkillMonthly {
    #[serde(rename = "skillId")]
    pub skill_id: i64,
    #[serde(default, rename = "totalXp")]
    pub total_xp: i64,
    #[serde(default, rename = "averageXpGain")]
    pub average_xp_gain: i64,
    #[serde(default, rename = "totalGain")]
    pub total_gain: i64,
    #[serde(default, rename = "monthData")]
    pub month_data: Vec<RawMonthData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMonthData {
    #[serde(rename = "xpGain")]
    pub xp_gain: i64,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub rank: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGain {
    pub month: DateTime<Utc>,
    pub experience_gain: i64,
    pub rank: Option<i64>,
}

/// Twelve-month gain summary for one skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillHistory {
    pub skill: SkillType,
    pub total_experience: i64,
    pub average_gain: i64,
    pub total_gain: i64,
    pub months: Vec<MonthGain>,
}

impl SkillHistory {
    pub fn from_response(raw: &RawMonthlyResponse) -> Result<Self> {
        let entry = raw
            .monthly_xp_gain
            .first()
            .ok_or_else(|| EngineError::not_found("skill history", "monthlyXpGain"))?;
        let skill = SkillType::from_id(entry.skill_id).ok_or_else(|| {
            EngineError::Validation(format!("Unknown skill id {} in history", entry.skill_id))
        })?;

        let months = entry
            .month_data
            .iter()
            .map(|m| {
                let month = DateTime::from_timestamp_millis(m.timestamp).ok_or_else(|| {
                    EngineError::Validation(format!("Bad history timestamp {}", m.timestamp))
                })?;
                Ok(MonthGain {
                    month,
                    experience_gain: m.xp_gain / 10,
                    rank: m.rank,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            skill,
            total_experience: entry.total_xp / 10,
            average_gain: entry.average_xp_gain / 10,
            total_gain: entry.total_gain / 10,
            months,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawMonthlyResponse =
            serde_json::from_str(content).map_err(|source| EngineError::Parse {
                context: "monthly history".to_string(),
                source,
            })?;
        Self::from_response(&raw)
    }

    /// Month with the largest gain
    pub fn best_month(&self) -> Option<&MonthGain> {
        self.months.iter().max_by_key(|m| m.experience_gain)
    }
}

/// Histories for every fetched skill, in skill id order
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerHistory {
    skills: BTreeMap<SkillType, SkillHistory>,
}

impl PlayerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, history: SkillHistory) {
        self.skills.insert(history.skill, history);
    }

    pub fn get(&self, skill: SkillType) -> Option<&SkillHistory> {
        self.skills.get(&skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillHistory> {
        self.skills.values()
    }

    pub fn total_gain(&self) -> i64 {
        self.skills.values().map(|h| h.total_gain).sum()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<SkillHistory> for PlayerHistory {
    fn from_iter<I: IntoIterator<Item = SkillHistory>>(iter: I) -> Self {
        let mut history = Self::new();
        for skill in iter {
            history.insert(skill);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(skill_id: i64, total_gain: i64) -> String {
        format!(
            r#"{{
                "monthlyXpGain": [{{
                    "skillId": {skill_id},
                    "totalXp": 130344310,
                    "averageXpGain": 250000,
                    "totalGain": {total_gain},
                    "monthData": [
                        {{"xpGain": 1000000, "timestamp": 1696118400000, "rank": 5000}},
                        {{"xpGain": 2000000, "timestamp": 1698796800000, "rank": 4000}}
                    ]
                }}],
                "loggedIn": "false"
            }}"#
        )
    }

    #[test]
    fn test_parse_history() {
        let history = SkillHistory::from_json_str(&response(8, 3_000_000)).unwrap();
        assert_eq!(history.skill, SkillType::Woodcutting);
        assert_eq!(history.total_experience, 13_034_431);
        assert_eq!(history.total_gain, 300_000);
        assert_eq!(history.months.len(), 2);
        assert_eq!(history.months[0].month.to_rfc3339(), "2023-10-01T00:00:00+00:00");

        let best = history.best_month().unwrap();
        assert_eq!(best.experience_gain, 200_000);
    }

    #[test]
    fn test_empty_history_not_found() {
        let result = SkillHistory::from_json_str(r#"{"monthlyXpGain": []}"#);
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_insert_order_independent() {
        let a = SkillHistory::from_json_str(&response(10, 100)).unwrap();
        let b = SkillHistory::from_json_str(&response(0, 200)).unwrap();

        let forward: PlayerHistory = vec![a.clone(), b.clone()].into_iter().collect();
        let reverse: PlayerHistory = vec![b, a].into_iter().collect();

        let order = |h: &PlayerHistory| h.iter().map(|s| s.skill).collect::<Vec<_>>();
        assert_eq!(order(&forward), vec![SkillType::Attack, SkillType::Fishing]);
        assert_eq!(order(&forward), order(&reverse));
        assert_eq!(forward.total_gain(), 30);
    }
}
