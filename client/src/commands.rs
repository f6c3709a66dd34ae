//! Command implementations
//!
//! Each command fetches what it needs, hands it to the engine, and prints
//! the result. Formatting lives in `format_*` functions so it can be tested
//! without a network.

use std::path::Path;

use anyhow::{Context, Result};
use runemetrics_engine::{
    estimate_to_target, PlayerHistory, PlayerSnapshot, ProgressionEstimate, Quest, QuestSet,
    QuestStatus, ReferenceData, SkillType,
};

use crate::api::RuneMetricsClient;
use crate::render::{thousands, Table};

pub fn profile(client: &RuneMetricsClient, player_name: &str) -> Result<()> {
    let player = client.fetch_profile(player_name)?;
    print!("{}", format_profile(&player));
    Ok(())
}

pub fn quests(
    client: &RuneMetricsClient,
    player_name: &str,
    status: Option<QuestStatus>,
) -> Result<()> {
    let quests = client.fetch_quests(player_name)?;
    print!("{}", format_quests(&quests, status));
    Ok(())
}

pub fn eligible(client: &RuneMetricsClient, data_dir: &Path, player_name: &str) -> Result<()> {
    let catalog = ReferenceData::load_catalog(data_dir)
        .with_context(|| format!("Failed to load quest data from {:?}", data_dir))?;
    let player = client.fetch_profile(player_name)?;
    let quests = client.fetch_quests(player_name)?;

    let eligible = quests
        .eligible(player.skills(), &catalog)
        .context("Failed to evaluate quest eligibility")?;
    print!("{}", format_eligible(&player.name, &eligible));
    Ok(())
}

pub fn hours(
    client: &RuneMetricsClient,
    data_dir: &Path,
    player_name: &str,
    skill_name: &str,
    target: i32,
    detailed: bool,
) -> Result<()> {
    let skill = SkillType::from_name(skill_name)
        .with_context(|| format!("Unknown skill '{}'", skill_name))?;
    let rates = ReferenceData::load_rates(data_dir)
        .with_context(|| format!("Failed to load rates from {:?}", data_dir))?;
    let player = client.fetch_profile(player_name)?;

    let progress = player.skill(skill)?;
    let estimate = estimate_to_target(progress, target, &rates)
        .with_context(|| format!("Failed to estimate {} to level {}", skill, target))?;
    print!("{}", format_estimate(&estimate, progress.level, detailed));
    Ok(())
}

pub fn history(client: &RuneMetricsClient, player_name: &str) -> Result<()> {
    let history = client.fetch_history(player_name, &SkillType::ALL)?;
    print!("{}", format_history(&history));
    Ok(())
}

pub fn audit(client: &RuneMetricsClient, data_dir: &Path, player_name: &str) -> Result<()> {
    let catalog = ReferenceData::load_catalog(data_dir)
        .with_context(|| format!("Failed to load quest data from {:?}", data_dir))?;
    let quests = client.fetch_quests(player_name)?;

    let missing = catalog.missing_titles(&quests);
    if missing.is_empty() {
        println!("All {} quests have prerequisite entries", quests.len());
    } else {
        for title in &missing {
            println!("{}", title);
        }
        println!("{} of {} quests missing from quest data", missing.len(), quests.len());
    }
    Ok(())
}

pub fn format_profile(player: &PlayerSnapshot) -> String {
    let mut out = format!(
        "{} (combat {}, total level {}, total XP {})\n",
        player.name,
        player.combat_level,
        player.total_skill,
        thousands(player.total_experience)
    );
    if let Some(rank) = player.rank {
        out.push_str(&format!("Rank: {}\n", thousands(rank)));
    }
    out.push_str(&format!(
        "Quests: {} complete, {} started, {} not started\n",
        player.quests_complete, player.quests_started, player.quests_not_started
    ));
    if let Some(days) = player.play_time_days {
        out.push_str(&format!("Play time: {:.1} days\n", days));
    }

    let mut table = Table::new(&["Skill", "Level", "XP", "XP to next"]);
    for skill in player.skills_in_order() {
        let to_next = skill
            .next_level_experience_gap()
            .map(thousands)
            .unwrap_or_else(|_| "-".to_string());
        table.add_row(vec![
            skill.name().to_string(),
            skill.level.to_string(),
            thousands(skill.experience),
            to_next,
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_quests(quests: &QuestSet, status: Option<QuestStatus>) -> String {
    let mut table = Table::new(&["Quest", "Status", "Quest points"]);
    let selected: Vec<&Quest> = match status {
        Some(status) => quests.with_status(status).iter().collect(),
        None => quests.all().collect(),
    };
    for quest in &selected {
        table.add_row(vec![
            quest.title.clone(),
            quest.status.as_str().to_string(),
            quest.quest_points.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }
    format!("{}{} quests\n", table, selected.len())
}

pub fn format_eligible(player_name: &str, eligible: &[Quest]) -> String {
    if eligible.is_empty() {
        return format!("{} cannot start any new quests yet\n", player_name);
    }
    let mut out = format!("{} can start {} quests:\n", player_name, eligible.len());
    for quest in eligible {
        out.push_str(&format!("  {}\n", quest.title));
    }
    out
}

pub fn format_estimate(
    estimate: &ProgressionEstimate,
    current_level: i32,
    detailed: bool,
) -> String {
    let mut out = String::new();
    if detailed {
        let mut table = Table::new(&["Segment", "Method", "XP req", "hours"]);
        for segment in &estimate.segments {
            table.add_row(vec![
                segment.range_label(),
                segment.method.clone(),
                thousands(segment.experience_required),
                format!("{:.2}", segment.hours),
            ]);
        }
        out.push_str(&table.to_string());
    }
    out.push_str(&format!(
        "{} {} -> {}: {:.2} hours\n",
        estimate.skill, current_level, estimate.target_level, estimate.total_hours
    ));
    out
}

pub fn format_history(history: &PlayerHistory) -> String {
    let mut table = Table::new(&["Skill", "Total gain", "Average", "Best month"]);
    for skill in history.iter() {
        let best = skill
            .best_month()
            .map(|m| format!("{} ({})", m.month.format("%b %Y"), thousands(m.experience_gain)))
            .unwrap_or_default();
        table.add_row(vec![
            skill.skill.display_name().to_string(),
            thousands(skill.total_gain),
            thousands(skill.average_gain),
            best,
        ]);
    }
    format!("{}Total gain: {}\n", table, thousands(history.total_gain()))
}
