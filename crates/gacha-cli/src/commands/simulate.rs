use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use gacha_engine::{DrawState, Rarity, RewardEngine, RewardTally};

pub fn run(engine: &RewardEngine, draws: u32, batch: u32, seed: u64) -> Result<(), String> {
    if batch == 0 {
        return Err("batch size must be at least 1".into());
    }

    let mut rng = super::make_rng(Some(seed));
    let mut state = DrawState::default();
    let mut rewards = RewardTally::new();
    let mut sub_draws = 0_u64;
    let mut unit_draws = 0_u64;
    let mut peak_pity = 0_u32;

    let mut remaining = draws;
    while remaining > 0 {
        let count = remaining.min(batch);
        let outcome = engine
            .draw_batch(state, count, &mut rng)
            .map_err(|e| format!("simulation error: {e}"))?;
        log::debug!(
            "simulated batch of {count}: {} units, {}",
            outcome.summary.unit_hits,
            outcome.state
        );
        rewards.merge(&outcome.tally);
        sub_draws += outcome.summary.sub_draws;
        unit_draws += u64::from(outcome.summary.draws_with_unit);
        peak_pity = peak_pity.max(outcome.summary.peak_pity);
        state = outcome.state;
        remaining -= count;
    }

    let units = rewards.unit_count();
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({draws} draws, batch={batch}, seed={seed})").dimmed()
    );
    println!(
        "  {sub_draws} sub-draws, {units} units, {unit_draws} draws with a unit ({:.2}%)",
        super::percent(unit_draws, u64::from(draws))
    );
    if unit_draws > 0 {
        println!(
            "  {:.1} draws per unit draw on average",
            u64::from(draws) as f64 / unit_draws as f64
        );
    }
    println!(
        "  Peak pity: {peak_pity} (hard pity {})",
        engine.config().hard_pity
    );
    println!("  Final state: {state}");
    println!();

    println!("  {}", "Unit Rarities".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rarity", "Units", "Share"]);
    for rarity in Rarity::ALL {
        let count = rewards.rarity_count(rarity);
        table.add_row(vec![
            rarity.to_string(),
            count.to_string(),
            format!("{:.1}%", super::percent(count, units)),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Other Rewards".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Reward", "Total"]);
    let materials: u64 = rewards
        .iter()
        .filter(|(k, _)| k.starts_with("material_"))
        .map(|(_, v)| v)
        .sum();
    table.add_row(vec!["materials".to_string(), materials.to_string()]);
    for (key, count) in rewards.iter() {
        if key.starts_with("candy_") || key == "coins" || key == "tickets" {
            table.add_row(vec![key.to_string(), count.to_string()]);
        }
    }
    println!("{table}");

    Ok(())
}
