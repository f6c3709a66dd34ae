//! RuneMetrics engine
//!
//! Skill levels and experience thresholds, hours-to-target projection over
//! tiered XP rates, and quest eligibility against a prerequisite catalog.
//! Inputs are already-fetched snapshots; nothing here talks to the network.

pub mod data;
pub mod error;
pub mod history;
pub mod player;
pub mod progression;
pub mod quest;
pub mod rates;
pub mod skills;

pub use data::ReferenceData;
pub use error::{EngineError, ErrorKind, Result};
pub use history::{PlayerHistory, SkillHistory};
pub use player::PlayerSnapshot;
pub use progression::{estimate_to_target, hours_to_target, ProgressionEstimate, SegmentEstimate};
pub use quest::{PrerequisiteCatalog, Quest, QuestSet, QuestStatus, SkillMap};
pub use rates::{RateSegment, RateTable};
pub use skills::{SkillProgress, SkillType, MAX_LEVEL};
