use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use runemetrics_engine::{PlayerHistory, PlayerSnapshot, QuestSet, SkillHistory, SkillType};

use super::types::ApiError;
use crate::config::ClientConfig;

/// Blocking client for the RuneMetrics endpoints
pub struct RuneMetricsClient {
    agent: ureq::Agent,
    profile_url: String,
    quests_url: String,
    monthly_url: String,
}

impl RuneMetricsClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();

        Self {
            agent,
            profile_url: config.profile_url.clone(),
            quests_url: config.quests_url.clone(),
            monthly_url: config.monthly_url.clone(),
        }
    }

    /// GET a URL with query parameters and return the body
    fn get_body(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let started = Instant::now();

        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request.call()?;
        let body = response
            .into_string()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        log::info!("Fetched {} in {:.4} secs", url, started.elapsed().as_secs_f64());
        Ok(body)
    }

    /// Profile snapshot for a player
    pub fn fetch_profile(&self, player_name: &str) -> Result<PlayerSnapshot, ApiError> {
        let body = self.get_body(&self.profile_url, &[("user", player_name)])?;
        Ok(PlayerSnapshot::from_json_str(&body)?)
    }

    /// Quest list for a player, partitioned by status
    pub fn fetch_quests(&self, player_name: &str) -> Result<QuestSet, ApiError> {
        let body = self.get_body(&self.quests_url, &[("user", player_name)])?;
        Ok(QuestSet::from_json_str(&body)?)
    }

    /// Monthly XP history for one skill
    pub fn fetch_skill_history(
        &self,
        player_name: &str,
        skill: SkillType,
    ) -> Result<SkillHistory, ApiError> {
        let skill_id = skill.id().to_string();
        let body = self.get_body(
            &self.monthly_url,
            &[("searchName", player_name), ("skillid", &skill_id)],
        )?;
        Ok(SkillHistory::from_json_str(&body)?)
    }

    /// Monthly XP history for every skill, one request each
    pub fn fetch_history(
        &self,
        player_name: &str,
        skills: &[SkillType],
    ) -> Result<PlayerHistory, ApiError> {
        let started = Instant::now();
        let progress = ProgressBar::new(skills.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("fetching player history {bar:30} {percent}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut history = PlayerHistory::new();
        for skill in skills {
            progress.set_message(skill.display_name());
            let result = self.fetch_skill_history(player_name, *skill);
            progress.inc(1);
            history.insert(result.inspect_err(|_| progress.abandon())?);
        }
        progress.finish_and_clear();

        log::info!(
            "Finished fetching history for {} skills in {:.4} secs",
            history.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(history)
    }
}
