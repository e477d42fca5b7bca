use std::collections::BTreeMap;

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use vetech_core::auth::claims::TokenIdentity;
use vetech_core::models::{
    AppointmentRequest, ClientProfile, DailyProgress, Pet, PetStatistics, PointsTotals,
    Statistics,
};
use vetech_core::SessionUser;

use crate::cli::{
    ActivityArg, Cli, Commands, CompletionShell, ConsultationCommands, DietCommands, FeedingArg,
    ObjectiveArg, PetCommands, RewardCommands,
};
use crate::commands::auth_cmd::format_identity_lines;
use crate::commands::common::{
    format_pet_lines, format_request_lines, format_statistics_lines, CliContext,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::config::apply_config_init;
use crate::commands::diets::{build_diet_request, format_daily_progress_lines};
use crate::commands::profile::format_profile_lines;
use crate::commands::requests::normalize_clock_time;
use crate::commands::rewards::format_ranking_lines;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

fn pet(id: &str, name: &str, weight: Option<f64>) -> Pet {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "species": "Cachorro",
        "breed": "Labrador",
        "age": 5,
        "weight": weight,
    }))
    .unwrap()
}

#[test]
fn format_pet_lines_joins_known_details() {
    let mut without_breed = pet("p2", "Mia", None);
    without_breed.species = "Gato".to_string();
    without_breed.breed = Some(String::new());
    without_breed.age = None;

    assert_eq!(
        format_pet_lines(&[pet("p1", "Rex", Some(28.5)), without_breed]),
        vec![
            "p1  Rex (Cachorro, Labrador, 5 anos, 28.5 kg)".to_string(),
            "p2  Mia (Gato)".to_string(),
        ]
    );
}

#[test]
fn format_request_lines_treat_missing_status_as_pending() {
    let request: AppointmentRequest = serde_json::from_value(json!({
        "id": "r1",
        "animal_id": "p1",
        "service_type": "Vacina",
        "date": "2025-11-15",
        "start_time": "14:00:00",
        "end_time": "15:00:00",
        "priority": "normal"
    }))
    .unwrap();

    assert_eq!(
        format_request_lines(&[request]),
        vec!["r1  2025-11-15 14:00:00-15:00:00  Vacina  [pending]  pet=p1".to_string()]
    );
}

#[test]
fn format_statistics_lines_end_with_totals() {
    let entries = vec![
        PetStatistics {
            pet: pet("p1", "Rex", None),
            statistics: Some(Statistics {
                total_points: 120,
                period_points: 30,
                available_points: 80,
                goals_completed: 4,
                ..Statistics::default()
            }),
        },
        PetStatistics {
            pet: pet("p2", "Mia", None),
            statistics: None,
        },
    ];
    let totals = PointsTotals::from_statistics(&entries);

    assert_eq!(
        format_statistics_lines(&entries, totals),
        vec![
            "Rex  total=120 disponíveis=80 período=30 metas concluídas=4".to_string(),
            "Mia  (sem estatísticas)".to_string(),
            "Total: 120 pts, 80 disponíveis, 30 no período".to_string(),
        ]
    );
}

#[test]
fn format_identity_lines_skip_missing_fields() {
    let identity = TokenIdentity {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        phone: String::new(),
        role: "tutor".to_string(),
        animal_id: None,
        clinic_id: Some("c1".to_string()),
    };

    let lines = format_identity_lines(&identity, Some(1_754_044_200));
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "Clinic: c1");
    assert_eq!(lines[5], "Expires: 2025-08-01T10:30:00+00:00");
    assert!(!lines.iter().any(|line| line.starts_with("Phone")));
}

#[test]
fn normalize_clock_time_accepts_short_and_full_forms() {
    assert_eq!(normalize_clock_time("14:00").unwrap(), "14:00:00");
    assert_eq!(normalize_clock_time(" 09:30:15 ").unwrap(), "09:30:15");
    assert!(matches!(
        normalize_clock_time("2pm"),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn build_diet_request_falls_back_to_recorded_weight() {
    let rex = pet("p1", "Rex", Some(12.0));

    let request = build_diet_request(
        &rex,
        ActivityArg::Alta,
        ObjectiveArg::Emagrecimento,
        FeedingArg::Mista,
        None,
        Some("  ".to_string()),
    )
    .unwrap();
    assert_eq!(request.animal_id, "p1");
    assert_eq!(request.pet_name, "Rex");
    assert!((request.weight_kg - 12.0).abs() < f64::EPSILON);
    assert_eq!(request.age_years, 5);
    assert_eq!(request.notes, None);

    let explicit = build_diet_request(
        &rex,
        ActivityArg::Moderada,
        ObjectiveArg::Manutencao,
        FeedingArg::Racao,
        Some(9.5),
        None,
    )
    .unwrap();
    assert!((explicit.weight_kg - 9.5).abs() < f64::EPSILON);
}

#[test]
fn build_diet_request_requires_some_weight() {
    let result = build_diet_request(
        &pet("p1", "Rex", None),
        ActivityArg::Moderada,
        ObjectiveArg::Manutencao,
        FeedingArg::Racao,
        None,
        None,
    );
    assert!(matches!(result, Err(CliError::InvalidInput(message)) if message.contains("Rex")));
}

#[test]
fn format_daily_progress_lines_list_meals() {
    let progress: DailyProgress = serde_json::from_value(json!({
        "date": "2025-11-15",
        "total_refeicoes": 2,
        "refeicoes_realizadas": 1,
        "total_calorias": 864.0,
        "calorias_consumidas": 432.0,
        "progresso_percentual": 50.0,
        "refeicoes": [
            { "refeicao_index": 0, "horario_realizado": "08:00", "quantidade_gramas": 108.0 }
        ]
    }))
    .unwrap();

    assert_eq!(
        format_daily_progress_lines(&progress),
        vec![
            "2025-11-15: 1/2 refeições, 432/864 cal (50%)".to_string(),
            "  #0 08:00  108 g".to_string(),
        ]
    );
}

#[test]
fn format_ranking_lines_read_loose_entries() {
    let ranking = vec![
        json!({ "nome": "Rex", "pontos": 300 }),
        json!({ "animal_nome": "Mia" }),
    ];
    assert_eq!(
        format_ranking_lines(&ranking),
        vec!["  1. Rex  300 pts".to_string(), "  2. Mia".to_string()]
    );
}

#[test]
fn format_profile_lines_show_dash_without_phone() {
    let lines = format_profile_lines(&ClientProfile::default());
    assert_eq!(lines[0], "Name:  Usuário");
    assert_eq!(lines[2], "Phone: -");
}

#[test]
fn apply_config_init_sets_and_activates_profile() {
    let mut config = CliProfilesConfig::default();

    let name = apply_config_init(
        &mut config,
        Some("clinica"),
        Some(" https://api.vetech.example/ "),
        Some(30),
        false,
    )
    .unwrap();

    assert_eq!(name, "clinica");
    assert_eq!(config.active_profile.as_deref(), Some("clinica"));
    assert_eq!(
        config.profile("clinica"),
        Some(&CliProfile {
            api_base_url: Some("https://api.vetech.example".to_string()),
            request_timeout_secs: Some(30),
        })
    );
}

#[test]
fn apply_config_init_keeps_active_profile_when_asked() {
    let mut config = CliProfilesConfig {
        version: 1,
        active_profile: Some("casa".to_string()),
        profiles: BTreeMap::new(),
    };

    apply_config_init(&mut config, Some("testes"), None, None, true).unwrap();

    assert_eq!(config.active_profile.as_deref(), Some("casa"));
    assert!(config.profile("testes").is_some());
}

#[test]
fn apply_config_init_rejects_bad_values() {
    let mut config = CliProfilesConfig::default();
    assert!(matches!(
        apply_config_init(&mut config, Some("x"), Some("api.vetech.example"), None, false),
        Err(CliError::Config(_))
    ));
    assert!(matches!(
        apply_config_init(&mut config, Some("x"), None, Some(0), false),
        Err(CliError::Config(_))
    ));
    assert!(config.profile("x").is_none());
}

#[test]
fn cli_context_uses_profile_backend_and_keychain_session() {
    let mut config = CliProfilesConfig::default();
    config.profiles.insert(
        "cli-context-test".to_string(),
        CliProfile {
            api_base_url: Some("http://localhost:8000".to_string()),
            request_timeout_secs: Some(5),
        },
    );

    let context =
        CliContext::from_config(&config, Some("cli-context-test"), Some("http://127.0.0.1:9000/"))
            .unwrap();
    assert_eq!(context.profile_name, "cli-context-test");
    assert_eq!(context.client.base_url(), "http://127.0.0.1:9000");
    assert!(matches!(
        context.require_session(),
        Err(CliError::NotSignedIn(profile)) if profile == "cli-context-test"
    ));

    let user = SessionUser {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        phone: None,
    };
    context.client.session().establish("stored-token", user.clone()).unwrap();

    let reloaded = CliContext::from_config(&config, Some("cli-context-test"), None).unwrap();
    let session = reloaded.require_session().unwrap();
    assert_eq!(session.token, "stored-token");
    assert_eq!(session.user, user);
    assert_eq!(reloaded.client.base_url(), "http://localhost:8000");

    reloaded.client.session().clear().unwrap();
    assert!(reloaded.require_session().is_err());
}

#[test]
fn cli_parses_global_profile_and_aliases() {
    let cli = Cli::try_parse_from([
        "vetech",
        "--profile",
        "casa",
        "appointments",
        "slots",
        "2025-11-15",
        "--json",
    ])
    .unwrap();
    assert_eq!(cli.profile.as_deref(), Some("casa"));
    assert!(matches!(
        cli.command,
        Commands::Consultations {
            command: ConsultationCommands::Slots { ref date, json: true }
        } if date == "2025-11-15"
    ));

    let cli = Cli::try_parse_from(["vetech", "pets", "delete", "p1", "--api-url", "http://x"])
        .unwrap();
    assert_eq!(cli.api_url.as_deref(), Some("http://x"));
    assert!(matches!(
        cli.command,
        Commands::Pets {
            command: PetCommands::Remove { ref id }
        } if id == "p1"
    ));
}

#[test]
fn cli_parses_diet_and_reward_options() {
    let cli = Cli::try_parse_from([
        "vetech",
        "diets",
        "generate",
        "--pet",
        "p1",
        "--objective",
        "ganho-peso",
        "--activity",
        "baixa",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Diets {
            command: DietCommands::Generate {
                objective: ObjectiveArg::GanhoPeso,
                activity: ActivityArg::Baixa,
                feeding: FeedingArg::Racao,
                weight: None,
                ..
            }
        }
    ));

    let cli = Cli::try_parse_from(["vetech", "rewards", "stats"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Rewards {
            command: RewardCommands::Stats {
                pet: None,
                period: None,
                json: false
            }
        }
    ));

    assert!(Cli::try_parse_from([
        "vetech",
        "diets",
        "generate",
        "--pet",
        "p1",
        "--objective",
        "dieta"
    ])
    .is_err());
}

#[test]
fn render_completions_targets_vetech_binary() {
    let script = String::from_utf8(render_completions(CompletionShell::Fish)).unwrap();
    assert!(script.contains("vetech"));
    assert!(script.contains("rewards"));
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("vetech.bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_vetech"));
    assert!(script.contains("consultations"));
}
