use anyhow::Result;
use colored::Colorize;

use medinsight_core::modules::config as core_config;

pub fn show_config(json: bool) -> Result<()> {
    let mut config = core_config::load_config()?;
    config.gemini.api_key = mask_key(&config.gemini.api_key);

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Gemini:".cyan().bold());
        println!("  API Key: {}", config.gemini.api_key);
        println!("  Base URL: {}", config.gemini.base_url);
        println!("  Timeout: {}s", config.gemini.request_timeout_secs);
        println!("{}", "Invoker:".cyan().bold());
        println!("  Max Retries: {}", config.invoker.max_retries);
        println!("  Base Delay: {} ms", config.invoker.base_delay_ms);
        println!("  Jitter: up to {} ms", config.invoker.jitter_max_ms);
        println!("{}", "Server:".cyan().bold());
        println!("  Listen: {}", config.server.socket_addr());
        println!("{}", "Models:".cyan().bold());
        println!("  Vision Fallbacks: {}", config.models.vision_fallbacks.join(", "));
        println!("  Text Fallbacks: {}", config.models.text_fallbacks.join(", "));
        println!("{}", "Hospitals:".cyan().bold());
        println!("  Region: {}", config.hospitals.region().unwrap_or("(any)"));
        println!(
            "  Directory: {}",
            config
                .hospitals
                .directory()
                .map_or_else(|| "(none)".to_string(), |d| format!("{} lines", d.lines().count()))
        );
    }
    Ok(())
}

pub fn get_config_value(key: &str) -> Result<()> {
    let config = core_config::load_config()?;
    println!("{}", core_config::get_value(&config, key)?);
    Ok(())
}

pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    core_config::update_config(|config| core_config::set_value(config, key, value))?;

    let shown = if key == "gemini.api_key" { mask_key(value) } else { value.to_string() };
    println!("{} Config updated: {} = {}", "✓".green(), key, shown);
    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
