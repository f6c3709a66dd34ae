//! Skill catalog and the RuneScape experience curve.
//!
//! 27 skills, ids fixed by their position in [`SKILL_NAMES`]. Every skill
//! shares the same cumulative threshold table, levels 1 to 103.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Highest level present in the experience table
pub const MAX_LEVEL: i32 = 103;

/// Minimum cumulative XP for each level; index 0 is level 1.
/// Level 2 = 83 XP, Level 99 = 13,034,431 XP
pub const LEVEL_XP: [i64; MAX_LEVEL as usize] = [
    0, 83, 174, 276, 388, 512, 650, 801,
    969, 1_154, 1_358, 1_584, 1_833, 2_107, 2_411, 2_746,
    3_115, 3_523, 3_973, 4_470, 5_018, 5_624, 6_291, 7_028,
    7_842, 8_740, 9_730, 10_824, 12_031, 13_363, 14_833, 16_456,
    18_247, 20_224, 22_406, 24_815, 27_473, 30_408, 33_648, 37_224,
    41_171, 45_529, 50_339, 55_649, 61_512, 67_983, 75_127, 83_014,
    91_721, 101_333, 111_945, 123_660, 136_594, 150_872, 166_636, 184_040,
    203_254, 224_466, 247_886, 273_742, 302_288, 333_804, 368_599, 407_015,
    449_428, 496_254, 547_953, 605_032, 668_051, 737_627, 814_445, 899_257,
    992_895, 1_096_278, 1_210_421, 1_336_443, 1_475_581, 1_629_200, 1_798_808, 1_986_068,
    2_192_818, 2_421_087, 2_673_114, 2_951_373, 3_258_594, 3_597_792, 3_972_294, 4_385_776,
    4_842_295, 5_346_332, 5_902_831, 6_517_253, 7_195_629, 7_944_614, 8_771_558, 9_684_577,
    10_692_629, 11_805_606, 13_034_431, 14_391_160, 15_889_109, 17_542_976, 19_368_992,
];

/// Skill display names in id order
pub const SKILL_NAMES: [&str; 27] = [
    "Attack",
    "Defence",
    "Strength",
    "Constitution",
    "Ranged",
    "Prayer",
    "Magic",
    "Cooking",
    "Woodcutting",
    "Fletching",
    "Fishing",
    "Firemaking",
    "Crafting",
    "Smithing",
    "Mining",
    "Herblore",
    "Agility",
    "Thieving",
    "Slayer",
    "Farming",
    "Runecrafting",
    "Hunter",
    "Construction",
    "Summoning",
    "Dungeoneering",
    "Divination",
    "Invention",
];

/// Minimum cumulative XP required for a level.
pub fn total_xp_for_level(level: i32) -> Result<i64> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(EngineError::Range {
            level,
            max: MAX_LEVEL,
        });
    }
    Ok(LEVEL_XP[(level - 1) as usize])
}

/// One of the 27 skills. Discriminant is the RuneMetrics skill id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Attack = 0,
    Defence,
    Strength,
    Constitution,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
    Summoning,
    Dungeoneering,
    Divination,
    Invention,
}

impl SkillType {
    pub const ALL: [SkillType; 27] = [
        SkillType::Attack,
        SkillType::Defence,
        SkillType::Strength,
        SkillType::Constitution,
        SkillType::Ranged,
        SkillType::Prayer,
        SkillType::Magic,
        SkillType::Cooking,
        SkillType::Woodcutting,
        SkillType::Fletching,
        SkillType::Fishing,
        SkillType::Firemaking,
        SkillType::Crafting,
        SkillType::Smithing,
        SkillType::Mining,
        SkillType::Herblore,
        SkillType::Agility,
        SkillType::Thieving,
        SkillType::Slayer,
        SkillType::Farming,
        SkillType::Runecrafting,
        SkillType::Hunter,
        SkillType::Construction,
        SkillType::Summoning,
        SkillType::Dungeoneering,
        SkillType::Divination,
        SkillType::Invention,
    ];

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn display_name(&self) -> &'static str {
        SKILL_NAMES[*self as usize]
    }

    pub fn from_id(id: i64) -> Option<SkillType> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<SkillType> {
        let name = name.trim();
        Self::ALL
            .iter()
            .find(|s| s.display_name().eq_ignore_ascii_case(name))
            .copied()
    }
}

impl std::fmt::Display for SkillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Skill entry as it appears in a profile's `skillvalues`
#[derive(Debug, Clone, Deserialize)]
pub struct RawSkillValue {
    pub id: i64,
    pub level: i32,
    /// Stored at 10x the displayed value
    pub xp: i64,
    #[serde(default)]
    pub rank: Option<i64>,
}

/// A player's standing in one skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProgress {
    pub skill: SkillType,
    pub level: i32,
    pub experience: i64,
    pub rank: Option<i64>,
}

impl SkillProgress {
    pub fn new(skill: SkillType, level: i32, experience: i64) -> Self {
        Self {
            skill,
            level,
            experience,
            rank: None,
        }
    }

    pub fn from_raw(raw: &RawSkillValue) -> Result<Self> {
        let skill = SkillType::from_id(raw.id)
            .ok_or_else(|| EngineError::Validation(format!("Unknown skill id {}", raw.id)))?;
        if raw.level < 1 {
            return Err(EngineError::Validation(format!(
                "{} has level {}",
                skill, raw.level
            )));
        }

        Ok(Self {
            skill,
            level: raw.level,
            experience: raw.xp / 10,
            rank: raw.rank,
        })
    }

    pub fn name(&self) -> &'static str {
        self.skill.display_name()
    }

    /// XP needed to reach the next level
    pub fn next_level_experience_gap(&self) -> Result<i64> {
        Ok(total_xp_for_level(self.level + 1)? - self.experience)
    }

    /// XP progress within current level (0.0 to 1.0)
    pub fn level_progress(&self) -> f32 {
        let (Ok(current_level_xp), Ok(next_level_xp)) = (
            total_xp_for_level(self.level),
            total_xp_for_level(self.level + 1),
        ) else {
            return 1.0;
        };
        let xp_in_level = self.experience - current_level_xp;
        let xp_needed = next_level_xp - current_level_xp;
        (xp_in_level as f32 / xp_needed as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_table() {
        // Known RS XP values
        assert_eq!(total_xp_for_level(1).unwrap(), 0);
        assert_eq!(total_xp_for_level(2).unwrap(), 83);
        assert_eq!(total_xp_for_level(92).unwrap(), 6_517_253);
        assert_eq!(total_xp_for_level(99).unwrap(), 13_034_431);
        assert!(total_xp_for_level(0).is_err());
        assert!(total_xp_for_level(MAX_LEVEL + 1).is_err());
    }

    #[test]
    fn test_thresholds_strictly_increase() {
        for level in 1..MAX_LEVEL {
            assert!(
                total_xp_for_level(level).unwrap() < total_xp_for_level(level + 1).unwrap(),
                "level {} not below level {}",
                level,
                level + 1
            );
        }
    }

    #[test]
    fn test_skill_catalog() {
        assert_eq!(SkillType::from_id(0), Some(SkillType::Attack));
        assert_eq!(SkillType::from_id(8), Some(SkillType::Woodcutting));
        assert_eq!(SkillType::from_id(26), Some(SkillType::Invention));
        assert_eq!(SkillType::from_id(27), None);
        assert_eq!(SkillType::from_id(-1), None);

        for (i, skill) in SkillType::ALL.iter().enumerate() {
            assert_eq!(skill.id() as usize, i);
            assert_eq!(skill.display_name(), SKILL_NAMES[i]);
        }

        assert_eq!(SkillType::from_name("woodcutting"), Some(SkillType::Woodcutting));
        assert_eq!(SkillType::from_name(" Runecrafting "), Some(SkillType::Runecrafting));
        assert_eq!(SkillType::from_name("Sailing"), None);
    }

    #[test]
    fn test_from_raw_divides_xp() {
        let raw = RawSkillValue {
            id: 8,
            level: 75,
            xp: 12_500_000,
            rank: Some(1234),
        };
        let progress = SkillProgress::from_raw(&raw).unwrap();
        assert_eq!(progress.skill, SkillType::Woodcutting);
        assert_eq!(progress.experience, 1_250_000);
        assert_eq!(progress.name(), "Woodcutting");

        let unknown = RawSkillValue {
            id: 40,
            level: 1,
            xp: 0,
            rank: None,
        };
        assert!(matches!(
            SkillProgress::from_raw(&unknown),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_next_level_gap() {
        let progress = SkillProgress::new(SkillType::Mining, 1, 0);
        assert_eq!(progress.next_level_experience_gap().unwrap(), 83);

        let progress = SkillProgress::new(SkillType::Mining, 98, 12_000_000);
        assert_eq!(progress.next_level_experience_gap().unwrap(), 1_034_431);

        let maxed = SkillProgress::new(SkillType::Mining, MAX_LEVEL, 19_368_992);
        assert!(matches!(
            maxed.next_level_experience_gap(),
            Err(EngineError::Range { level: 104, .. })
        ));
    }

    #[test]
    fn test_level_progress() {
        let progress = SkillProgress::new(SkillType::Magic, 1, 0);
        assert_eq!(progress.level_progress(), 0.0);

        let halfway = SkillProgress::new(SkillType::Magic, 2, 128);
        assert!((halfway.level_progress() - 0.494).abs() < 0.01);

        let maxed = SkillProgress::new(SkillType::Magic, MAX_LEVEL, 20_000_000);
        assert_eq!(maxed.level_progress(), 1.0);
    }
}
