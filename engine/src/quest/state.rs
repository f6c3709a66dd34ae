//! Player Quest State
//!
//! A player's quest list partitioned by status. Built once from a fetched
//! list and never mutated afterwards.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::title::{is_variant_title, normalize_title};
use crate::error::{EngineError, Result};

/// Status of a quest for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestStatus {
    NotStarted,
    Started,
    Completed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "NOT_STARTED",
            QuestStatus::Started => "STARTED",
            QuestStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for QuestStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NOT_STARTED" => Ok(QuestStatus::NotStarted),
            "STARTED" => Ok(QuestStatus::Started),
            "COMPLETED" => Ok(QuestStatus::Completed),
            _ => Err(EngineError::Validation(format!("Unknown quest status '{}'", s))),
        }
    }
}

/// Quest record as returned by the quests endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestRecord {
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub difficulty: Option<i32>,
    #[serde(default)]
    pub members: Option<bool>,
    #[serde(default, rename = "questPoints")]
    pub quest_points: Option<i32>,
    #[serde(default, rename = "userEligible")]
    pub user_eligible: Option<bool>,
}

/// Envelope of the quests endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestResponse {
    #[serde(default)]
    pub quests: Option<Vec<RawQuestRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A quest with a recognized status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub title: String,
    pub status: QuestStatus,
    pub difficulty: Option<i32>,
    pub members: Option<bool>,
    pub quest_points: Option<i32>,
    pub user_eligible: Option<bool>,
}

impl Quest {
    pub fn new(title: &str, status: QuestStatus) -> Self {
        Self {
            title: title.to_string(),
            status,
            difficulty: None,
            members: None,
            quest_points: None,
            user_eligible: None,
        }
    }

    pub fn from_raw(raw: &RawQuestRecord) -> Result<Self> {
        let status = raw.status.parse::<QuestStatus>().map_err(|_| {
            EngineError::Validation(format!(
                "Quest '{}' has unknown status '{}'",
                raw.title, raw.status
            ))
        })?;

        Ok(Self {
            title: raw.title.clone(),
            status,
            difficulty: raw.difficulty,
            members: raw.members,
            quest_points: raw.quest_points,
            user_eligible: raw.user_eligible,
        })
    }

    /// Title in catalog key form
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// A player's quests split by status
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestSet {
    not_started: Vec<Quest>,
    started: Vec<Quest>,
    completed: Vec<Quest>,
}

impl QuestSet {
    /// Drop variant titles, then place each record by status. An
    /// unrecognized status fails the whole partition.
    pub fn partition(records: &[RawQuestRecord]) -> Result<Self> {
        let mut set = Self::default();
        let mut skipped = 0;

        for raw in records {
            if is_variant_title(&raw.title) {
                skipped += 1;
                continue;
            }
            let quest = Quest::from_raw(raw)?;
            match quest.status {
                QuestStatus::NotStarted => set.not_started.push(quest),
                QuestStatus::Started => set.started.push(quest),
                QuestStatus::Completed => set.completed.push(quest),
            }
        }

        debug!(
            "Partitioned {} quests ({} not started, {} started, {} completed, {} variants skipped)",
            records.len(),
            set.not_started.len(),
            set.started.len(),
            set.completed.len(),
            skipped
        );

        Ok(set)
    }

    /// Decode a quests endpoint body. A body with neither an error nor a
    /// quest list is rejected.
    pub fn from_response(response: &RawQuestResponse) -> Result<Self> {
        if let Some(ref error) = response.error {
            return Err(if error == "PROFILE_PRIVATE" {
                EngineError::AuthenticationRequired
            } else {
                EngineError::not_found("player quests", error.clone())
            });
        }
        let records = response
            .quests
            .as_deref()
            .ok_or_else(|| EngineError::not_found("player quests", "quests"))?;
        Self::partition(records)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let response: RawQuestResponse =
            serde_json::from_str(content).map_err(|source| EngineError::Parse {
                context: "quest list".to_string(),
                source,
            })?;
        Self::from_response(&response)
    }

    pub fn not_started(&self) -> &[Quest] {
        &self.not_started
    }

    pub fn started(&self) -> &[Quest] {
        &self.started
    }

    pub fn completed(&self) -> &[Quest] {
        &self.completed
    }

    pub fn with_status(&self, status: QuestStatus) -> &[Quest] {
        match status {
            QuestStatus::NotStarted => &self.not_started,
            QuestStatus::Started => &self.started,
            QuestStatus::Completed => &self.completed,
        }
    }

    /// Every quest, not started first, then started, then completed
    pub fn all(&self) -> impl Iterator<Item = &Quest> {
        self.not_started
            .iter()
            .chain(self.started.iter())
            .chain(self.completed.iter())
    }

    pub fn len(&self) -> usize {
        self.not_started.len() + self.started.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn completed_title_set(completed: &[Quest]) -> HashSet<String> {
    completed.iter().map(Quest::normalized_title).collect()
}
