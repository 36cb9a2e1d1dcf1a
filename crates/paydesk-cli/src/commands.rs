//! Subcommand implementations.

use std::sync::Arc;

use tokio::sync::mpsc;

use paydesk_client::{CachedCatalog, ClientOptions, Loaded, PaydeskClient};
use paydesk_core::TransactionFilter;
use paydesk_events::{spawn_poller, PaymentNotifier};
use paydesk_store::FileStore;

use crate::cli::{CatalogArgs, Command};
use crate::config::CliConfig;
use crate::error::CliError;

/// Run `command` against the configured platform.
pub async fn run(command: Command, config: &CliConfig) -> Result<(), CliError> {
    match command {
        Command::Business => {
            let business = authed_client(config)?.current_business().await?;
            println!("{} ({})", business.name, business.id);
            println!("  email     {}", business.email);
            println!("  country   {}", business.country);
            println!("  currency  {}", business.currency);
            if let Some(prefix) = business.api_key_prefix {
                println!("  api key   {prefix}...");
            }
        }
        Command::Customers(args) => {
            let loaded = if args.cached {
                catalog(config)?.customers().await?
            } else {
                Loaded::Fresh(authed_client(config)?.list_customers().await?)
            };
            print_origin(&loaded, args);
            for customer in loaded.into_inner() {
                println!("{:<24} {:<28} {}", customer.id, customer.name, customer.email);
            }
        }
        Command::Products(args) => {
            let loaded = if args.cached {
                catalog(config)?.products().await?
            } else {
                Loaded::Fresh(authed_client(config)?.list_products().await?)
            };
            print_origin(&loaded, args);
            for product in loaded.into_inner() {
                let state = if product.is_purchasable() { "" } else { " (unavailable)" };
                println!("{:<24} {:<28} {}{state}", product.id, product.name, product.price);
            }
        }
        Command::Transactions {
            status,
            provider,
            page,
        } => {
            let filter = TransactionFilter {
                status,
                provider,
                page,
                ..TransactionFilter::default()
            };
            let result = authed_client(config)?.list_transactions(&filter).await?;
            for txn in &result.data {
                println!(
                    "{:<24} {:<10} {:<9} {:>18}  {}",
                    txn.id,
                    txn.status,
                    txn.provider,
                    txn.amount,
                    txn.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!(
                "page {} ({} of {} total){}",
                result.page,
                result.data.len(),
                result.total,
                if result.has_more() { ", more available" } else { "" }
            );
        }
        Command::Balance => print_balances(&authed_client(config)?).await?,
        Command::Payouts => {
            for payout in authed_client(config)?.payouts().await? {
                let arrival = payout
                    .arrival_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                println!("{:<24} {:>18}  {:?}  {arrival}", payout.id, payout.amount, payout.status);
            }
        }
        Command::Storefronts => {
            for storefront in authed_client(config)?.list_storefronts().await? {
                let state = if storefront.published { "published" } else { "draft" };
                println!("{:<24} {:<28} {state}", storefront.id, storefront.slug);
            }
        }
        Command::Links => {
            for link in authed_client(config)?.list_payment_links().await? {
                let state = if link.active { "active" } else { "inactive" };
                println!("{:<24} {:>18}  {state:<8}  {}", link.id, link.amount, link.url);
            }
        }
        Command::Notify => {
            let event = notifier(config)?.notify();
            println!("payment event recorded at {}", event.timestamp);
        }
        Command::Watch { .. } => watch(config).await?,
    }
    Ok(())
}

fn client(config: &CliConfig) -> Result<PaydeskClient, CliError> {
    let options = ClientOptions {
        timeout_seconds: config.timeout_secs,
        token: config.token.clone(),
        ..ClientOptions::default()
    };
    Ok(PaydeskClient::with_options(&config.api_url, options)?)
}

fn authed_client(config: &CliConfig) -> Result<PaydeskClient, CliError> {
    let client = client(config)?;
    if !client.is_authenticated() {
        return Err(CliError::MissingToken);
    }
    Ok(client)
}

fn catalog(config: &CliConfig) -> Result<CachedCatalog, CliError> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(CachedCatalog::new(authed_client(config)?, Arc::new(store)))
}

fn notifier(config: &CliConfig) -> Result<PaymentNotifier, CliError> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(PaymentNotifier::new(Arc::new(store)))
}

fn print_origin<T>(loaded: &Loaded<T>, args: CatalogArgs) {
    if args.cached && loaded.is_cached() {
        println!("(platform unreachable, showing last known data)");
    }
}

async fn print_balances(client: &PaydeskClient) -> Result<(), CliError> {
    for balance in client.balances().await? {
        println!(
            "{}  available {:>18}  pending {:>18}",
            balance.currency(),
            balance.available,
            balance.pending
        );
    }
    Ok(())
}

/// Print balances now and after every fresh payment event until Ctrl-C.
async fn watch(config: &CliConfig) -> Result<(), CliError> {
    let client = authed_client(config)?;
    let notifier = notifier(config)?;

    print_balances(&client).await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = spawn_poller(notifier, config.poll_interval(), move |event| {
        let _ = tx.send(event);
    });
    tracing::info!(
        data_dir = %config.data_dir.display(),
        interval_secs = config.poll_interval_secs,
        "Watching for completed payments"
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
            Some(event) = rx.recv() => {
                println!("payment completed at {}, refreshing balances", event.timestamp);
                if let Err(e) = print_balances(&client).await {
                    tracing::warn!(error = %e, "Balance refresh failed");
                }
            }
        }
    }

    poller.stop();
    tracing::info!("Stopped watching");
    Ok(())
}
