//! Experience rate tables
//!
//! Per-skill training tiers loaded from `rates.json`: a level range, the
//! method used over it, and the XP/hr that method yields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::skills::{SkillType, MAX_LEVEL};

/// Rate segment as it appears in `rates.json`
#[derive(Debug, Clone, Deserialize)]
pub struct RawRateSegment {
    pub start_range: i32,
    pub end_range: i32,
    pub method: String,
    #[serde(rename = "xp/hr")]
    pub xp_per_hour: f64,
}

/// One training tier for a skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSegment {
    pub start_level: i32,
    pub end_level: i32,
    pub method: String,
    pub experience_per_hour: f64,
}

impl RateSegment {
    pub fn new(start_level: i32, end_level: i32, method: &str, experience_per_hour: f64) -> Self {
        Self {
            start_level,
            end_level,
            method: method.to_string(),
            experience_per_hour,
        }
    }

    pub fn from_raw(raw: &RawRateSegment) -> Result<Self> {
        let segment = Self {
            start_level: raw.start_range,
            end_level: raw.end_range,
            method: raw.method.clone(),
            experience_per_hour: raw.xp_per_hour,
        };
        segment.validate()?;
        Ok(segment)
    }

    /// Check the segment against the experience table and its own bounds
    pub fn validate(&self) -> Result<()> {
        for level in [self.start_level, self.end_level] {
            if !(1..=MAX_LEVEL).contains(&level) {
                return Err(EngineError::Range {
                    level,
                    max: MAX_LEVEL,
                });
            }
        }
        if self.start_level >= self.end_level {
            return Err(EngineError::Validation(format!(
                "Segment '{}' runs from {} to {}",
                self.method, self.start_level, self.end_level
            )));
        }
        if !(self.experience_per_hour > 0.0) {
            return Err(EngineError::Configuration(format!(
                "Segment '{}' ({} -> {}) has non-positive XP/hr {}",
                self.method, self.start_level, self.end_level, self.experience_per_hour
            )));
        }
        Ok(())
    }

    /// Display label, e.g. "50 -> 70"
    pub fn range_label(&self) -> String {
        format!("{} -> {}", self.start_level, self.end_level)
    }
}

/// Ordered rate segments for every skill that has reference data
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    segments: HashMap<SkillType, Vec<RateSegment>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self {
            segments: HashMap::new(),
        }
    }

    /// Parse a `rates.json` document keyed by skill display name
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<RawRateSegment>> =
            serde_json::from_str(content).map_err(|source| EngineError::Parse {
                context: "rate table".to_string(),
                source,
            })?;

        let mut table = Self::new();
        for (name, raw_segments) in raw {
            let skill = SkillType::from_name(&name)
                .ok_or_else(|| EngineError::not_found("skill", name.clone()))?;
            let segments = raw_segments
                .iter()
                .map(RateSegment::from_raw)
                .collect::<Result<Vec<_>>>()?;
            table.insert(skill, segments)?;
        }

        Ok(table)
    }

    /// Add or replace the segments for a skill. Segments must ascend and
    /// must not overlap.
    pub fn insert(&mut self, skill: SkillType, segments: Vec<RateSegment>) -> Result<()> {
        for segment in &segments {
            segment.validate()?;
        }
        for pair in segments.windows(2) {
            if pair[1].start_level < pair[0].end_level {
                return Err(EngineError::Validation(format!(
                    "{} segments out of order: {} followed by {}",
                    skill,
                    pair[0].range_label(),
                    pair[1].range_label()
                )));
            }
        }

        debug!("Rate table: {} segments for {}", segments.len(), skill);
        self.segments.insert(skill, segments);
        Ok(())
    }

    /// All segments for a skill
    pub fn segments(&self, skill: SkillType) -> Result<&[RateSegment]> {
        self.segments
            .get(&skill)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::not_found("rate table", skill.display_name()))
    }

    /// Segments starting at or above `current_level` and ending at or below
    /// `target_level`, in ascending order. A segment straddling the target
    /// is left out rather than clipped.
    pub fn applicable_segments(
        &self,
        skill: SkillType,
        current_level: i32,
        target_level: i32,
    ) -> Result<Vec<&RateSegment>> {
        Ok(self
            .segments(skill)?
            .iter()
            .filter(|s| s.start_level >= current_level && s.end_level <= target_level)
            .collect())
    }

    pub fn contains(&self, skill: SkillType) -> bool {
        self.segments.contains_key(&skill)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
