//! Hours-to-target estimation
//!
//! Walks the applicable rate segments in ascending order, charging the XP
//! from the running total to each segment's end level at that segment's
//! rate. Segments that straddle the target level are skipped entirely, so
//! a target inside a segment under-reports the remaining hours.

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::rates::RateTable;
use crate::skills::{total_xp_for_level, SkillProgress, SkillType, MAX_LEVEL};

/// Per-segment breakdown of an estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentEstimate {
    pub start_level: i32,
    pub end_level: i32,
    pub method: String,
    pub experience_required: i64,
    pub hours: f64,
}

impl SegmentEstimate {
    pub fn range_label(&self) -> String {
        format!("{} -> {}", self.start_level, self.end_level)
    }
}

/// Result of projecting a skill forward to a target level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionEstimate {
    pub skill: SkillType,
    pub target_level: i32,
    pub total_hours: f64,
    pub segments: Vec<SegmentEstimate>,
}

/// Estimate with the per-segment breakdown.
pub fn estimate_to_target(
    progress: &SkillProgress,
    target_level: i32,
    rates: &RateTable,
) -> Result<ProgressionEstimate> {
    if !(1..=MAX_LEVEL).contains(&target_level) {
        return Err(EngineError::Range {
            level: target_level,
            max: MAX_LEVEL,
        });
    }

    let mut experience = progress.experience;
    let mut total_hours = 0.0;
    let mut segments = Vec::new();
    let mut previous_end: Option<i32> = None;

    for segment in rates.applicable_segments(progress.skill, progress.level, target_level)? {
        if let Some(end) = previous_end {
            if segment.start_level > end {
                return Err(EngineError::Validation(format!(
                    "{} rates have no segment between levels {} and {}",
                    progress.skill, end, segment.start_level
                )));
            }
        }
        if !(segment.experience_per_hour > 0.0) {
            return Err(EngineError::Configuration(format!(
                "{} segment '{}' has non-positive XP/hr {}",
                progress.skill, segment.method, segment.experience_per_hour
            )));
        }

        let segment_xp = total_xp_for_level(segment.end_level)?;
        let experience_required = (segment_xp - experience).max(0);
        let hours = experience_required as f64 / segment.experience_per_hour;

        total_hours += hours;
        experience = experience.max(segment_xp);
        previous_end = Some(segment.end_level);

        segments.push(SegmentEstimate {
            start_level: segment.start_level,
            end_level: segment.end_level,
            method: segment.method.clone(),
            experience_required,
            hours,
        });
    }

    Ok(ProgressionEstimate {
        skill: progress.skill,
        target_level,
        total_hours,
        segments,
    })
}

/// Total hours from the player's current XP to `target_level`.
pub fn hours_to_target(
    progress: &SkillProgress,
    target_level: i32,
    rates: &RateTable,
) -> Result<f64> {
    Ok(estimate_to_target(progress, target_level, rates)?.total_hours)
}

impl SkillProgress {
    pub fn hours_to_target(&self, target_level: i32, rates: &RateTable) -> Result<f64> {
        hours_to_target(self, target_level, rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateSegment;

    fn woodcutting_rates() -> RateTable {
        let mut table = RateTable::new();
        table
            .insert(
                SkillType::Woodcutting,
                vec![
                    RateSegment::new(1, 15, "Normal trees", 5_000.0),
                    RateSegment::new(15, 30, "Oaks", 15_000.0),
                    RateSegment::new(30, 60, "Willows", 40_000.0),
                    RateSegment::new(60, 99, "Ivy", 60_000.0),
                ],
            )
            .unwrap();
        table
    }

    #[test]
    fn test_hours_from_level_one() {
        let rates = woodcutting_rates();
        let progress = SkillProgress::new(SkillType::Woodcutting, 1, 0);

        let estimate = estimate_to_target(&progress, 30, &rates).unwrap();
        assert_eq!(estimate.segments.len(), 2);
        // 1 -> 15: 2,411 XP at 5k/hr; 15 -> 30: 13,363 - 2,411 at 15k/hr
        assert_eq!(estimate.segments[0].experience_required, 2_411);
        assert_eq!(estimate.segments[1].experience_required, 10_952);
        let expected = 2_411.0 / 5_000.0 + 10_952.0 / 15_000.0;
        assert!((estimate.total_hours - expected).abs() < 1e-9);
    }

    #[test]
    fn test_segment_below_current_level_skipped() {
        let rates = woodcutting_rates();
        // Level 20 sits inside the oak segment, which starts below it
        let progress = SkillProgress::new(SkillType::Woodcutting, 20, 5_000);

        let estimate = estimate_to_target(&progress, 60, &rates).unwrap();
        assert_eq!(estimate.segments.len(), 1);
        assert_eq!(estimate.segments[0].method, "Willows");
        assert_eq!(estimate.segments[0].experience_required, 273_742 - 5_000);
    }

    #[test]
    fn test_straddling_target_not_clipped() {
        let rates = woodcutting_rates();
        let progress = SkillProgress::new(SkillType::Woodcutting, 30, 13_363);

        // 60 -> 99 ends past 80 so only the willow segment counts
        let to_80 = hours_to_target(&progress, 80, &rates).unwrap();
        let to_60 = hours_to_target(&progress, 60, &rates).unwrap();
        assert_eq!(to_80, to_60);
    }

    #[test]
    fn test_hours_monotonic_in_target() {
        let rates = woodcutting_rates();
        let progress = SkillProgress::new(SkillType::Woodcutting, 1, 0);

        let mut last = 0.0;
        for target in 1..=MAX_LEVEL {
            let hours = hours_to_target(&progress, target, &rates).unwrap();
            assert!(hours >= last, "target {} dropped to {}", target, hours);
            last = hours;
        }
        assert!(last > 0.0);
    }

    #[test]
    fn test_detailed_segments_sum_to_total() {
        let rates = woodcutting_rates();
        let progress = SkillProgress::new(SkillType::Woodcutting, 1, 40);

        let estimate = estimate_to_target(&progress, 99, &rates).unwrap();
        let summed: f64 = estimate.segments.iter().map(|s| s.hours).sum();
        assert!((summed - estimate.total_hours).abs() < 1e-9);
        assert_eq!(estimate.segments[3].range_label(), "60 -> 99");
        assert_eq!(
            progress.hours_to_target(99, &rates).unwrap(),
            estimate.total_hours
        );
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut rates = RateTable::new();
        let result = rates.insert(
            SkillType::Mining,
            vec![RateSegment::new(1, 50, "Idle", 0.0)],
        );
        assert!(matches!(result, Err(EngineError::Configuration(_))));

        // Nothing was stored, so estimating reports the missing table
        let progress = SkillProgress::new(SkillType::Mining, 1, 0);
        assert!(matches!(
            hours_to_target(&progress, 50, &rates),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_gap_between_segments_rejected() {
        let mut rates = RateTable::new();
        rates
            .insert(
                SkillType::Hunter,
                vec![
                    RateSegment::new(1, 20, "Birds", 3_000.0),
                    RateSegment::new(40, 60, "Chinchompas", 50_000.0),
                ],
            )
            .unwrap();
        let progress = SkillProgress::new(SkillType::Hunter, 1, 0);

        assert!(matches!(
            hours_to_target(&progress, 60, &rates),
            Err(EngineError::Validation(_))
        ));
        // Stopping before the gap is fine
        assert!(hours_to_target(&progress, 20, &rates).is_ok());
    }

    #[test]
    fn test_invalid_target_and_missing_table() {
        let rates = woodcutting_rates();
        let progress = SkillProgress::new(SkillType::Woodcutting, 1, 0);
        assert!(matches!(
            hours_to_target(&progress, MAX_LEVEL + 1, &rates),
            Err(EngineError::Range { .. })
        ));

        let fishing = SkillProgress::new(SkillType::Fishing, 1, 0);
        assert!(matches!(
            hours_to_target(&fishing, 50, &rates),
            Err(EngineError::NotFound { .. })
        ));
    }
}
