//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use paydesk_core::{Provider, TransactionStatus};

use crate::config::{CliConfig, MAX_POLL_INTERVAL_SECS, MAX_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(name = "paydesk")]
#[command(about = "Merchant payments dashboard")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Platform API base URL (overrides PAYDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Merchant bearer token (overrides PAYDESK_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Directory for the shared event record and caches (overrides PAYDESK_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (overrides PAYDESK_TIMEOUT_SECS)
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: Option<u64>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, config: &mut CliConfig) {
        if let Some(url) = &self.api_url {
            config.api_url.clone_from(url);
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Command::Watch { interval: Some(secs) } = self.command {
            config.poll_interval_secs = secs;
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the business the token belongs to
    Business,
    /// List customers
    Customers(CatalogArgs),
    /// List products
    Products(CatalogArgs),
    /// List transactions
    Transactions {
        /// Only this status (pending, succeeded, declined, failed, refunded, cancelled)
        #[arg(long)]
        status: Option<TransactionStatus>,
        /// Only this provider (stripe, paystack)
        #[arg(long)]
        provider: Option<Provider>,
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show balances per currency
    Balance,
    /// List payouts
    Payouts,
    /// List storefronts
    Storefronts,
    /// List payment links
    Links,
    /// Record a completed payment so watching dashboards refresh
    Notify,
    /// Refresh balances whenever a payment completes, until Ctrl-C
    Watch {
        /// Seconds between polls, 1 to 3600 (overrides PAYDESK_POLL_INTERVAL_SECS)
        #[arg(
            long,
            value_name = "SECS",
            value_parser = clap::value_parser!(u64).range(1..=MAX_POLL_INTERVAL_SECS)
        )]
        interval: Option<u64>,
    },
}

/// Options shared by catalog listings.
#[derive(Args, Debug, Clone, Copy)]
pub struct CatalogArgs {
    /// Fall back to the last successful load when the platform is unreachable
    #[arg(long)]
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transaction_filters() {
        let cli = Cli::try_parse_from([
            "paydesk",
            "transactions",
            "--status",
            "succeeded",
            "--provider",
            "paystack",
            "--page",
            "3",
        ])
        .unwrap();

        match cli.command {
            Command::Transactions {
                status,
                provider,
                page,
            } => {
                assert_eq!(status, Some(TransactionStatus::Succeeded));
                assert_eq!(provider, Some(Provider::Paystack));
                assert_eq!(page, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["paydesk", "transactions", "--status", "lost"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "paydesk",
            "watch",
            "--interval",
            "7",
            "--api-url",
            "https://api.example.com",
            "--data-dir",
            "/var/lib/paydesk",
        ])
        .unwrap();

        let mut config = CliConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/paydesk"));
        assert_eq!(config.poll_interval_secs, 7);
        assert!(config.token.is_none());
    }

    #[test]
    fn rejects_out_of_range_interval() {
        for secs in ["0", "3601", "18446744073709551615"] {
            let parsed = Cli::try_parse_from(["paydesk", "watch", "--interval", secs]);
            assert!(parsed.is_err(), "--interval {secs} should be rejected");
        }
        let cli = Cli::try_parse_from(["paydesk", "watch", "--interval", "3600"]).unwrap();
        assert!(matches!(cli.command, Command::Watch { interval: Some(3600) }));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["paydesk", "business", "--timeout", "0"]).is_err());

        let cli = Cli::try_parse_from(["paydesk", "business", "--timeout", "5"]).unwrap();
        let mut config = CliConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn cached_flag() {
        let cli = Cli::try_parse_from(["paydesk", "products", "--cached"]).unwrap();
        assert!(matches!(cli.command, Command::Products(CatalogArgs { cached: true })));
    }
}
