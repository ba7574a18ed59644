mod accounts_view;
mod args;
mod global_settings;
mod stats_view;
mod tree_view;

use crate::accounts_view::accounts_view;
use crate::args::build_cli;
use crate::global_settings::GlobalSettings;
use crate::stats_view::stats_view;
use crate::tree_view::tree_view;
use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use ledger_api::account_api::{AccountApi, AccountTreeData};
use ledger_api::statistics::TransactionType;
use std::future::Future;
use std::time::Duration;

/// Log through indicatif, so that messages do not break the spinner.
fn init_logging(multi: &MultiProgress, globals: &GlobalSettings) -> Result<()> {
    let logger = env_logger::Builder::new()
        .filter_level(globals.log_level())
        .parse_default_env()
        .build();
    let level = logger.filter();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(level);
    Ok(())
}

/// Show a spinner while waiting for the server
async fn with_spinner<T>(
    multi: &MultiProgress,
    message: &'static str,
    fut: impl Future<Output = T>,
) -> Result<T> {
    let progress = multi.add(
        ProgressBar::new_spinner()
            .with_style(ProgressStyle::with_template("{spinner} {msg} {elapsed}")?)
            .with_message(message),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    let result = fut.await;
    progress.finish_and_clear();
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let globals = GlobalSettings::new(&matches);
    let multi = MultiProgress::new();
    init_logging(&multi, &globals)?;

    let api = AccountApi::new(globals.client.clone())?;

    match matches.subcommand() {
        Some(("completions", sub)) => {
            if let Some(shell) = sub.get_one::<clap_complete_command::Shell>("shell") {
                shell.generate(&mut build_cli(), &mut std::io::stdout());
            }
        }
        Some(("tree", _)) => {
            let data = fetch_tree(&api, &multi).await?;
            println!(
                "{}",
                tree_view(&data.all_accounts, &tree_view::Settings::default())
            );
        }
        Some(("accounts", sub)) => {
            let data = fetch_tree(&api, &multi).await?;
            let settings = accounts_view::Settings::new(sub);
            println!("{}", accounts_view(&data, &settings));
        }
        Some(("stats", sub)) => {
            let settings = stats_view::Settings::new(sub, globals.today);
            let ids = if settings.account_ids.is_empty() {
                bucket_ids(&fetch_tree(&api, &multi).await?, settings.transaction_type)
            } else {
                settings.account_ids.clone()
            };
            let query = settings.query(ids);
            let rows = with_spinner(
                &multi,
                "fetching statistics",
                api.get_account_statistics(&query),
            )
            .await?;
            println!("{}", stats_view(&rows));
        }
        Some((name, _)) => anyhow::bail!("Unknown command {}", name),
        None => {}
    }

    Ok(())
}

async fn fetch_tree(
    api: &AccountApi,
    multi: &MultiProgress,
) -> Result<AccountTreeData> {
    with_spinner(multi, "fetching accounts", api.fetch_account_tree()).await
}

/// The ids of all accounts classified in the bucket matching the type of
/// transactions.
fn bucket_ids(data: &AccountTreeData, kind: TransactionType) -> Vec<String> {
    let bucket = match kind {
        TransactionType::Income => &data.income_accounts,
        TransactionType::Expense => &data.expense_accounts,
    };
    bucket.iter().map(|a| a.account.id.clone()).collect()
}
