use std::env;
use std::sync::Arc;

use hookviral::server::{self, AppState};
use hookviral::{AppConfig, HookGenerator, HookRequest};

const USAGE: &str = "Usage:
  hookviral serve [bind-address]
  hookviral generate <topic> [niche] [style] [spice-level]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    let config = AppConfig::load_or_default();

    match args.get(1).map(String::as_str) {
        Some("serve") => {
            let bind = args.get(2).cloned().unwrap_or_else(|| config.server.bind.clone());
            let state = Arc::new(AppState {
                generator: HookGenerator::from_config(&config),
            });
            server::serve(&bind, state).await?;
        }
        Some("generate") => {
            let topic = args.get(2).ok_or(USAGE)?;
            let request = HookRequest {
                topic: Some(topic.clone()),
                niche: Some(args.get(3).cloned().unwrap_or_else(|| "lifestyle".to_string())),
                style: args.get(4).cloned(),
                spice_level: args.get(5).and_then(|s| s.parse().ok()),
            };

            let response = HookGenerator::from_config(&config)
                .generate_hooks(&request)
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Some("help") | Some("--help") | Some("-h") => println!("{}", USAGE),
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
