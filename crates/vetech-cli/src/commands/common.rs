use serde::Serialize;
use vetech_core::models::{
    AppointmentRequest, AppointmentRequestStatus, Consultation, ConsultationOverview, Diet, Goal,
    HealthSummary, Pet, PetStatistics, PointEntry, PointsTotals, RedeemedReward, Reward,
};
use vetech_core::util::date_prefix;
use vetech_core::{ApiClient, Session};

use crate::auth::KeyringSessionStore;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub type CliClient = ApiClient<KeyringSessionStore>;

/// Resolved profile plus a client bound to its stored session.
pub struct CliContext {
    pub profile_name: String,
    pub client: CliClient,
}

impl CliContext {
    pub fn load(profile: Option<&str>, api_url: Option<&str>) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        Self::from_config(&config, profile, api_url)
    }

    pub fn from_config(
        config: &CliProfilesConfig,
        profile: Option<&str>,
        api_url: Option<&str>,
    ) -> Result<Self, CliError> {
        let profile_name = config.resolve_profile_name(profile);
        let client_config = config
            .profile(&profile_name)
            .cloned()
            .unwrap_or_default()
            .client_config(api_url)
            .map_err(vetech_core::Error::from)?;
        let client = ApiClient::new(&client_config, KeyringSessionStore::new(&profile_name))?;
        tracing::debug!(profile = %profile_name, base_url = client.base_url(), "CLI context ready");
        Ok(Self {
            profile_name,
            client,
        })
    }

    /// Restores the stored session, failing when the profile is signed out.
    pub fn require_session(&self) -> Result<Session, CliError> {
        self.client
            .session()
            .restore()
            .ok_or_else(|| CliError::NotSignedIn(self.profile_name.clone()))
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{empty_message}");
    }
    for line in lines {
        println!("{line}");
    }
}

pub fn format_pet_lines(pets: &[Pet]) -> Vec<String> {
    pets.iter()
        .map(|pet| {
            let mut details = vec![pet.species.clone()];
            if let Some(breed) = pet.breed.as_deref().filter(|breed| !breed.is_empty()) {
                details.push(breed.to_string());
            }
            if let Some(age) = pet.age {
                details.push(format!("{age} anos"));
            }
            if let Some(weight) = pet.weight {
                details.push(format!("{weight} kg"));
            }
            format!("{}  {} ({})", pet.id, pet.name, details.join(", "))
        })
        .collect()
}

pub fn format_consultation_lines(consultations: &[Consultation]) -> Vec<String> {
    consultations
        .iter()
        .map(|consultation| {
            format!(
                "{}  {} {}  {}  [{}]  pet={}",
                consultation.id,
                date_prefix(&consultation.date),
                consultation.start_slot().unwrap_or("--:--"),
                consultation.service_type.as_deref().unwrap_or("Consulta"),
                consultation.status.as_str(),
                consultation.animal_id
            )
        })
        .collect()
}

pub fn format_overview_lines(overview: &ConsultationOverview) -> Vec<String> {
    let describe = |consultation: Option<&Consultation>| {
        consultation.map_or_else(
            || "none".to_string(),
            |consultation| {
                format!(
                    "{} {} ({})",
                    date_prefix(&consultation.date),
                    consultation.start_slot().unwrap_or("--:--"),
                    consultation.id
                )
            },
        )
    };
    vec![
        format!("Next: {}", describe(overview.next.as_ref())),
        format!("Last: {}", describe(overview.last.as_ref())),
    ]
}

pub fn format_request_lines(requests: &[AppointmentRequest]) -> Vec<String> {
    requests
        .iter()
        .map(|request| {
            let status = request
                .status
                .map_or("pending", AppointmentRequestStatus::as_str);
            format!(
                "{}  {} {}-{}  {}  [{}]  pet={}",
                request.id.as_deref().unwrap_or("-"),
                request.date,
                request.start_time,
                request.end_time,
                request.service_type,
                status,
                request.animal_id
            )
        })
        .collect()
}

pub fn format_diet_lines(diets: &[Diet]) -> Vec<String> {
    diets
        .iter()
        .map(|diet| {
            format!(
                "{}  {}  [{}]  {} cal/dia, {} refeições  {} → {}",
                diet.id.as_deref().unwrap_or("-"),
                diet.name,
                diet.status.as_str(),
                diet.daily_calories,
                diet.meals_per_day,
                diet.start_date,
                diet.end_date
            )
        })
        .collect()
}

pub fn format_goal_lines(goals: &[Goal]) -> Vec<String> {
    goals
        .iter()
        .map(|goal| {
            format!(
                "{}  {}  {} {} ({})  +{} pts  [{}]",
                goal.id,
                goal.description,
                goal.quantity,
                goal.unit,
                goal.period.as_str(),
                goal.reward_points,
                goal.status.as_str()
            )
        })
        .collect()
}

pub fn format_point_lines(entries: &[PointEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("{}  +{}  {}", entry.date, entry.points, entry.description))
        .collect()
}

pub fn format_reward_lines(rewards: &[Reward]) -> Vec<String> {
    rewards
        .iter()
        .map(|reward| {
            format!(
                "{}  {}  {} pts  {}",
                reward.id, reward.name, reward.points_required, reward.kind
            )
        })
        .collect()
}

pub fn format_redeemed_lines(redeemed: &[RedeemedReward]) -> Vec<String> {
    redeemed
        .iter()
        .map(|reward| {
            format!(
                "{}  {}  code={}  -{} pts  [{}]",
                reward.redeemed_at,
                reward.reward_name.as_deref().unwrap_or(&reward.reward_id),
                reward.verification_code,
                reward.points_spent,
                reward.status.as_str()
            )
        })
        .collect()
}

pub fn format_statistics_lines(entries: &[PetStatistics], totals: PointsTotals) -> Vec<String> {
    let mut lines = entries
        .iter()
        .map(|entry| match &entry.statistics {
            Some(statistics) => format!(
                "{}  total={} disponíveis={} período={} metas concluídas={}",
                entry.pet.name,
                statistics.total_points,
                statistics.available_points,
                statistics.period_points,
                statistics.goals_completed
            ),
            None => format!("{}  (sem estatísticas)", entry.pet.name),
        })
        .collect::<Vec<_>>();
    lines.push(format!(
        "Total: {} pts, {} disponíveis, {} no período",
        totals.total, totals.available, totals.period
    ));
    lines
}

pub fn format_health_lines(summary: &HealthSummary) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", summary.pet.name, summary.pet.species),
        format!("Peso atual: {} kg", summary.current_weight),
        format!("Dietas ativas: {}", summary.active_diets.len()),
    ];
    if let Some(last) = &summary.last_consultation {
        lines.push(format!("Última consulta: {}", date_prefix(&last.date)));
    }
    lines.extend(summary.recent_entries.iter().map(|entry| {
        format!("{}  {}  {}", date_prefix(&entry.date), entry.title, entry.description)
    }));
    lines
}
