use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use gacha_engine::{BatchOutcome, DrawState, PlayerRecord, Rarity, RewardEngine};

/// Parameters for a single `gacha draw` batch.
pub struct DrawRequest {
    pub count: u32,
    pub pity: u32,
    pub up_rate: f64,
    pub tokens: Option<u64>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn run(engine: &RewardEngine, request: &DrawRequest) -> Result<(), String> {
    let mut player = PlayerRecord::with_tokens(request.tokens.unwrap_or(u64::from(request.count)));
    player.draw_state = DrawState {
        pity: request.pity,
        up_rate: request.up_rate,
    };

    let mut rng = super::make_rng(request.seed);
    let outcome = player
        .pull(engine, request.count, &mut rng)
        .map_err(|e| e.to_string())?;
    log::debug!("draw finished at {}", player.draw_state);

    if request.json {
        print_json(&player, &outcome)
    } else {
        print_table(&player, &outcome);
        Ok(())
    }
}

fn print_json(player: &PlayerRecord, outcome: &BatchOutcome) -> Result<(), String> {
    let body = serde_json::json!({
        "message": "Gacha pull completed",
        "results": outcome.tally,
        "state": player.draw_state,
        "tokens": player.tokens,
        "summary": outcome.summary,
    });
    let text = serde_json::to_string_pretty(&body)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{text}");
    Ok(())
}

fn print_table(player: &PlayerRecord, outcome: &BatchOutcome) {
    let summary = &outcome.summary;
    println!(
        "  {} {}",
        "Draw".bold(),
        format!(
            "({} draws, {} sub-draws, {} units)",
            summary.draws, summary.sub_draws, summary.unit_hits
        )
        .dimmed()
    );
    println!();

    if outcome.tally.is_empty() {
        println!("  {}", "(no rewards)".dimmed());
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Reward", "Count"]);
        for (key, count) in outcome.tally.iter() {
            table.add_row(vec![colorize_key(key).to_string(), count.to_string()]);
        }
        println!("{table}");
    }
    println!();

    println!("  {}", player.draw_state);
    println!("  {} tokens left", player.tokens);
}

fn colorize_key(key: &str) -> colored::ColoredString {
    let rarity = key
        .split_once('_')
        .and_then(|(prefix, _)| prefix.parse::<Rarity>().ok());
    match rarity {
        Some(Rarity::Legendary) => key.yellow().bold(),
        Some(Rarity::Rare) => key.magenta(),
        Some(Rarity::Uncommon) => key.green(),
        Some(Rarity::Common) => key.cyan(),
        None => key.normal(),
    }
}
