use gacha_engine::RewardEngine;

pub fn run(engine: &RewardEngine) -> Result<(), String> {
    let text = serde_json::to_string_pretty(engine.config())
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{text}");
    Ok(())
}
