use serde_json::{json, Value};
use vetech_core::models::{GoalFilter, PointsFilter, RewardFilter};
use vetech_core::util::normalize_text_option;

use crate::cli::RewardCommands;
use crate::commands::common::{
    format_goal_lines, format_point_lines, format_redeemed_lines, format_reward_lines,
    format_statistics_lines, print_json, print_lines, CliContext,
};
use crate::error::CliError;

pub async fn run_rewards(command: RewardCommands, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let gamification = context.client.gamification();

    match command {
        RewardCommands::Goals {
            kind,
            status,
            period,
            json,
        } => {
            let filter = GoalFilter {
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                period: period.map(Into::into),
            };
            let goals = gamification.goals(&filter).await;
            if json {
                return print_json(&goals);
            }
            print_lines(&format_goal_lines(&goals), "No goals found.");
        }
        RewardCommands::Points {
            pet,
            from,
            to,
            goal,
            json,
        } => {
            let filter = PointsFilter {
                start_date: normalize_text_option(from),
                end_date: normalize_text_option(to),
                goal_id: normalize_text_option(goal),
            };
            let entries = gamification.points(&pet, &filter).await;
            if json {
                return print_json(&entries);
            }
            print_lines(&format_point_lines(&entries), "No points recorded.");
        }
        RewardCommands::List {
            kind,
            min_points,
            max_points,
            json,
        } => {
            let filter = RewardFilter {
                kind: normalize_text_option(kind),
                min_points,
                max_points,
            };
            let rewards = gamification.rewards(&filter).await;
            if json {
                return print_json(&rewards);
            }
            print_lines(&format_reward_lines(&rewards), "No rewards available.");
        }
        RewardCommands::Redeem { pet, reward, notes } => {
            let notes = normalize_text_option(notes);
            let redeemed = gamification.redeem(&pet, &reward, notes.as_deref()).await?;
            println!(
                "Redeemed {} for {} pts. Verification code: {}",
                redeemed.reward_name.as_deref().unwrap_or(&redeemed.reward_id),
                redeemed.points_spent,
                redeemed.verification_code
            );
        }
        RewardCommands::Redeemed { pet, status, json } => {
            let redeemed = gamification.redeemed(&pet, status.map(Into::into)).await;
            if json {
                return print_json(&redeemed);
            }
            print_lines(&format_redeemed_lines(&redeemed), "No rewards redeemed yet.");
        }
        RewardCommands::Stats { pet, period, json } => {
            let period = period.map(Into::into);
            let pets = match pet {
                Some(id) => vec![context.client.pets().get(&id).await?],
                None => context.client.pets().list().await?,
            };
            let (entries, totals) = gamification.statistics_for_all(&pets, period).await;
            if json {
                return print_json(&json!({ "pets": entries, "totals": totals }));
            }
            if entries.is_empty() {
                println!("No pets registered.");
                return Ok(());
            }
            print_lines(&format_statistics_lines(&entries, totals), "");
        }
        RewardCommands::Ranking { period, json } => {
            let ranking = gamification.ranking(period.map(Into::into)).await;
            if json {
                return print_json(&ranking);
            }
            print_lines(&format_ranking_lines(&ranking), "Ranking is empty.");
        }
    }
    Ok(())
}

/// Ranking rows have no fixed shape; show the common fields when present.
pub fn format_ranking_lines(ranking: &[Value]) -> Vec<String> {
    ranking
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = ["nome", "animal_nome", "name"]
                .iter()
                .find_map(|key| entry.get(*key).and_then(Value::as_str))
                .unwrap_or("?");
            let points = ["pontos", "total_pontos", "points"]
                .iter()
                .find_map(|key| entry.get(*key).and_then(Value::as_i64));
            points.map_or_else(
                || format!("{:>3}. {name}", index + 1),
                |points| format!("{:>3}. {name}  {points} pts", index + 1),
            )
        })
        .collect()
}

