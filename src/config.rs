use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub data_file: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "user_data.json".to_string());
        let data_file = if data_file.trim().is_empty() {
            "user_data.json".to_string()
        } else {
            data_file
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "8080".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            data_file,
            http_port,
        })
    }
}
