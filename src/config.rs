use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_COUNTDOWN_SECS: u32 = 3;

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Period of the background clock tick
    pub tick: Duration,
    /// Countdown before impostor play and before each taboo turn
    pub countdown_secs: u32,
    /// Fixed seed for reproducible games
    pub seed: Option<u64>,
    /// JSON content pack replacing the built-in word tables
    pub content_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            seed: None,
            content_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let tick_ms = parse_var::<u64>("MAFILIA_TICK_MS")
            .filter(|ms| {
                if *ms == 0 {
                    tracing::warn!("MAFILIA_TICK_MS must be positive, using {}", DEFAULT_TICK_MS);
                }
                *ms > 0
            })
            .unwrap_or(DEFAULT_TICK_MS);

        let countdown_secs =
            parse_var::<u32>("MAFILIA_COUNTDOWN_SECS").unwrap_or(DEFAULT_COUNTDOWN_SECS);
        let seed = parse_var::<u64>("MAFILIA_SEED");
        let content_path = std::env::var("MAFILIA_CONTENT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        tracing::info!(
            tick_ms,
            countdown_secs,
            seeded = seed.is_some(),
            content_pack = content_path.is_some(),
            "Config loaded"
        );

        Self {
            tick: Duration::from_millis(tick_ms),
            countdown_secs,
            seed,
            content_path,
        }
    }
}

/// Parse an env var, warning and returning None when it is set but invalid
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, value);
            None
        }
    }
}
