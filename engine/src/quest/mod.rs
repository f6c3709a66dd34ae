//! Quest Module
//!
//! Prerequisite catalog, the player's partitioned quest list, and the
//! eligibility check that joins them with skill levels.

pub mod definition;
pub mod eligibility;
pub mod registry;
pub mod state;
pub mod title;

pub use definition::{PrerequisiteEntry, RawPrerequisite, SkillRequirement};
pub use eligibility::{check_quest_reqs, check_skill_reqs, eligible, SkillMap};
pub use registry::PrerequisiteCatalog;
pub use state::{Quest, QuestSet, QuestStatus, RawQuestRecord, RawQuestResponse};
pub use title::{is_variant_title, normalize_title};
