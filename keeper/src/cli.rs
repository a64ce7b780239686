use std::time::Duration;

use clap::{Parser, ValueEnum};
use registry::Address;
use trend::PropagationMode;

use crate::config::{KeeperConfig, parse_addresses};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeCli {
    Live,
    Snapshot,
}

impl From<ModeCli> for PropagationMode {
    fn from(m: ModeCli) -> Self {
        match m {
            ModeCli::Live => PropagationMode::Live,
            ModeCli::Snapshot => PropagationMode::SnapshotAtMint,
        }
    }
}

/// Command-line overrides. Anything left unset falls back to the
/// environment (see `KeeperConfig::from_env`).
#[derive(Debug, Default, Parser)]
#[clap(name = "keeper", version, about = "Bulls & Bears trend keeper")]
pub struct Cli {
    /// Seconds between trend evaluations
    #[clap(long)]
    pub interval_secs: Option<u64>,

    /// Milliseconds between eligibility probes
    #[clap(long)]
    pub poll_ms: Option<u64>,

    /// How tokens pick up the trend
    #[clap(long, value_enum)]
    pub mode: Option<ModeCli>,

    /// Operator identity allowed to mint
    #[clap(long)]
    pub operator: Option<String>,

    /// Comma-separated owners to mint one token each at startup
    #[clap(long)]
    pub mint_to: Option<String>,

    /// HTTP price feed endpoint
    #[clap(long)]
    pub feed_url: Option<String>,

    /// Emit JSON logs
    #[clap(long)]
    pub json: bool,
}

impl Cli {
    pub fn apply(&self, mut cfg: KeeperConfig) -> KeeperConfig {
        if let Some(secs) = self.interval_secs {
            cfg.interval = Duration::from_secs(secs);
        }
        if let Some(ms) = self.poll_ms {
            cfg.poll = Duration::from_millis(ms);
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode.into();
        }
        if let Some(op) = &self.operator {
            cfg.operator = Address::from(op.as_str());
        }
        if let Some(raw) = &self.mint_to {
            cfg.mint_to = parse_addresses(raw);
        }
        if let Some(url) = &self.feed_url {
            cfg.feed_url = Some(url.clone());
        }
        cfg.log_json |= self.json;
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "keeper",
            "--interval-secs",
            "5",
            "--mode",
            "snapshot",
            "--mint-to",
            "a,b",
            "--json",
        ]);

        let cfg = cli.apply(KeeperConfig::default());

        assert_eq!(cfg.interval, Duration::from_secs(5));
        assert_eq!(cfg.mode, PropagationMode::SnapshotAtMint);
        assert_eq!(cfg.mint_to.len(), 2);
        assert!(cfg.log_json);
        // untouched
        assert_eq!(cfg.poll, Duration::from_secs(1));
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::parse_from(["keeper"]);
        let cfg = cli.apply(KeeperConfig::default());
        assert_eq!(cfg.interval, Duration::from_secs(60));
        assert!(!cfg.log_json);
    }
}
