use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use registry::Address;
use trend::PropagationMode;

#[derive(Clone, Debug)]
pub struct KeeperConfig {
    // =========================
    // Engine
    // =========================
    /// Minimum time between two trend evaluations.
    pub interval: Duration,

    /// Whether tokens follow the latest trend or keep their mint-time trend.
    pub mode: PropagationMode,

    /// Identity allowed to mint.
    pub operator: Address,

    /// Owners that receive one token each at startup.
    pub mint_to: Vec<Address>,

    // =========================
    // Keeper loop
    // =========================
    /// How often the keeper probes eligibility.
    ///
    /// Should be well below `interval`; the probe is cheap and never blocks.
    pub poll: Duration,

    // =========================
    // Price feed
    // =========================
    /// HTTP price endpoint. `None` runs against a fixed in-memory feed.
    pub feed_url: Option<String>,

    pub feed_timeout: Duration,

    /// Rounds older than this are rejected as stale.
    pub feed_max_age: Duration,

    /// Answer served by the in-memory feed when no URL is set.
    pub initial_price: i128,

    pub price_decimals: u8,

    // =========================
    // Logging
    // =========================
    pub log_json: bool,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            mode: PropagationMode::Live,
            operator: Address::from("operator"),
            mint_to: Vec::new(),
            poll: Duration::from_millis(1_000),
            feed_url: None,
            feed_timeout: Duration::from_secs(5),
            feed_max_age: Duration::from_secs(3_600),
            initial_price: 120_000_000,
            price_decimals: 8,
            log_json: false,
        }
    }
}

impl KeeperConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();

        let mode = match lookup("KEEPER_MODE") {
            Some(v) => PropagationMode::from_str(&v).map_err(anyhow::Error::msg)?,
            None => d.mode,
        };

        let mint_to = lookup("KEEPER_MINT_TO")
            .map(|v| parse_addresses(&v))
            .unwrap_or(d.mint_to);

        Ok(Self {
            interval: Duration::from_secs(parse_or(&lookup, "KEEPER_INTERVAL_SECS", 60)?),
            mode,
            operator: lookup("KEEPER_OPERATOR").map(Address::from).unwrap_or(d.operator),
            mint_to,
            poll: Duration::from_millis(parse_or(&lookup, "KEEPER_POLL_MS", 1_000)?),
            feed_url: lookup("KEEPER_FEED_URL").filter(|v| !v.is_empty()),
            feed_timeout: Duration::from_secs(parse_or(&lookup, "KEEPER_FEED_TIMEOUT_SECS", 5)?),
            feed_max_age: Duration::from_secs(parse_or(
                &lookup,
                "KEEPER_FEED_MAX_AGE_SECS",
                3_600,
            )?),
            initial_price: parse_or(&lookup, "KEEPER_INITIAL_PRICE", d.initial_price)?,
            price_decimals: parse_or(&lookup, "KEEPER_PRICE_DECIMALS", d.price_decimals)?,
            log_json: parse_or(&lookup, "KEEPER_LOG_JSON", d.log_json)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

pub(crate) fn parse_addresses(raw: &str) -> Vec<Address> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Address::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = KeeperConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.interval, Duration::from_secs(60));
        assert_eq!(cfg.poll, Duration::from_secs(1));
        assert_eq!(cfg.mode, PropagationMode::Live);
        assert_eq!(cfg.initial_price, 120_000_000);
        assert_eq!(cfg.price_decimals, 8);
        assert!(cfg.feed_url.is_none());
        assert!(cfg.mint_to.is_empty());
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = KeeperConfig::from_lookup(lookup(&[
            ("KEEPER_INTERVAL_SECS", "1"),
            ("KEEPER_POLL_MS", "250"),
            ("KEEPER_MODE", "snapshot"),
            ("KEEPER_OPERATOR", "ops"),
            ("KEEPER_MINT_TO", "alice, bob,,"),
            ("KEEPER_FEED_URL", "http://localhost:9000/btc"),
            ("KEEPER_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(cfg.interval, Duration::from_secs(1));
        assert_eq!(cfg.poll, Duration::from_millis(250));
        assert_eq!(cfg.mode, PropagationMode::SnapshotAtMint);
        assert_eq!(cfg.operator, Address::from("ops"));
        assert_eq!(cfg.mint_to, vec![Address::from("alice"), Address::from("bob")]);
        assert_eq!(cfg.feed_url.as_deref(), Some("http://localhost:9000/btc"));
        assert!(cfg.log_json);
    }

    #[test]
    fn malformed_number_names_the_key() {
        let err = KeeperConfig::from_lookup(lookup(&[("KEEPER_POLL_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("KEEPER_POLL_MS"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(KeeperConfig::from_lookup(lookup(&[("KEEPER_MODE", "sometimes")])).is_err());
    }
}
