// src/config.rs

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

/// Number of ranked entries shown on a leaderboard (one per medal).
pub const DEFAULT_LEADERBOARD_SIZE: usize = 3;

/// Question type drawn from the bank for quiz polls.
pub const QUIZ_QUESTION_TYPE: &str = "MCQ";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    /// How long an issued question stays answerable.
    pub question_ttl: Duration,
    /// Upper bound on in-flight questions held in memory.
    pub registry_capacity: usize,
    pub leaderboard_size: usize,
    /// Per-call bound on score store queries.
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bigbrain.db?mode=rwc".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            question_ttl: Duration::from_secs(600),
            registry_capacity: 1024,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            store_timeout: Duration::from_millis(3000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            question_ttl: Duration::from_secs(parse_var(
                "QUESTION_TTL_SECS",
                defaults.question_ttl.as_secs(),
            )),
            registry_capacity: parse_var("REGISTRY_CAPACITY", defaults.registry_capacity),
            leaderboard_size: parse_var("LEADERBOARD_SIZE", defaults.leaderboard_size),
            store_timeout: Duration::from_millis(parse_var(
                "STORE_TIMEOUT_MS",
                u64::try_from(defaults.store_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

/// Reads a numeric variable, keeping the default when it is unset or malformed.
fn parse_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            // The subscriber is not installed yet; stderr is the only sink.
            eprintln!("{name}={raw:?} is not a valid number, using the default");
            default
        }),
        Err(_) => default,
    }
}
