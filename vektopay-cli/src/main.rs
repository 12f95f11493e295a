//! Vektopay CLI - operator tool for the Vektopay payments API
//!
//! Looks up and polls payments and manages customers from the shell. Results are
//! printed to stdout as pretty JSON; logs and errors go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! export VEKTOPAY_API_KEY=sk_live_xxx
//! export VEKTOPAY_BASE_URL=https://api.vektopay.com
//!
//! vektopay payment-status pay_123
//! vektopay poll pay_123 --interval-ms 500 --timeout-secs 30
//! vektopay --config vektopay.toml customer list --merchant-id m_1 --limit 20
//! ```

mod observability;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use serde::Serialize;
use vektopay::{
    Client, ClientConfig, VektopayError, models::CustomerListParams, poll::PollPolicy,
};

use crate::observability::{LogFormat, init_observability};

#[derive(Debug, Parser)]
#[command(name = "vektopay")]
#[command(about = "Inspect Vektopay payments and customers", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file; `VEKTOPAY_*` environment variables are used when absent
    #[arg(short, long, value_name = "PATH", env = "VEKTOPAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, env = "LOG_FORMAT", ignore_case = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the current status of a payment
    PaymentStatus {
        /// Payment identifier
        #[arg(value_name = "PAYMENT_ID")]
        payment_id: String,
    },

    /// Poll a payment until it reaches a terminal status
    Poll {
        /// Payment identifier
        #[arg(value_name = "PAYMENT_ID")]
        payment_id: String,

        /// Delay between status requests, in milliseconds
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,

        /// Give up after this many seconds
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,

        /// Use charge semantics: only PAID and FAILED are terminal
        #[arg(long)]
        legacy: bool,
    },

    /// Manage customers (requires a bearer token)
    Customer {
        #[command(subcommand)]
        command: CustomerCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CustomerCommand {
    /// Show one customer
    Get {
        /// Customer identifier
        #[arg(value_name = "CUSTOMER_ID")]
        customer_id: String,
    },

    /// List customers
    List {
        /// Only customers of this merchant
        #[arg(long)]
        merchant_id: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Number of customers to skip
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Delete a customer
    Delete {
        /// Customer identifier
        #[arg(value_name = "CUSTOMER_ID")]
        customer_id: String,
    },
}

#[derive(Debug, Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_observability(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            if let VektopayError::RequestFailed { payload: Some(payload), .. } = &e
                && let Ok(rendered) = serde_json::to_string_pretty(payload)
            {
                eprintln!("{rendered}");
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> vektopay::Result<ClientConfig> {
    match path {
        Some(path) => ClientConfig::from_file(path),
        None => ClientConfig::from_env(),
    }
}

async fn run(cli: Cli) -> vektopay::Result<()> {
    let client = Client::with_config(load_config(cli.config.as_ref())?)?;

    match cli.command {
        Command::PaymentStatus { payment_id } => {
            print_json(&client.get_payment_status(&payment_id).await?)
        }
        Command::Poll { payment_id, interval_ms, timeout_secs, legacy } => {
            let policy =
                PollPolicy::new(Duration::from_millis(interval_ms), Duration::from_secs(timeout_secs));
            if legacy {
                print_json(&client.poll_charge_status(&payment_id, &policy).await?)
            } else {
                print_json(&client.poll_payment_status(&payment_id, &policy).await?)
            }
        }
        Command::Customer { command } => match command {
            CustomerCommand::Get { customer_id } => {
                print_json(&client.get_customer(&customer_id).await?)
            }
            CustomerCommand::List { merchant_id, limit, offset } => {
                let params = CustomerListParams { merchant_id, limit, offset };
                print_json(&client.list_customers(&params).await?)
            }
            CustomerCommand::Delete { customer_id } => {
                client.delete_customer(&customer_id).await?;
                print_json(&Deleted { id: &customer_id, deleted: true })
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> vektopay::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(VektopayError::Encode)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_poll_defaults() {
        let cli = Cli::try_parse_from(["vektopay", "poll", "pay_1"]).unwrap();
        match cli.command {
            Command::Poll { payment_id, interval_ms, timeout_secs, legacy } => {
                assert_eq!(payment_id, "pay_1");
                assert_eq!(interval_ms, 2000);
                assert_eq!(timeout_secs, 60);
                assert!(!legacy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_customer_list_filters() {
        let cli = Cli::try_parse_from([
            "vektopay",
            "--log-format",
            "json",
            "customer",
            "list",
            "--merchant-id",
            "m1",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::Customer { command: CustomerCommand::List { merchant_id, limit, offset } } => {
                assert_eq!(merchant_id.as_deref(), Some("m1"));
                assert_eq!(limit, Some(5));
                assert_eq!(offset, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_id() {
        assert!(Cli::try_parse_from(["vektopay", "customer", "delete"]).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let path = PathBuf::from("/nonexistent/vektopay.toml");
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(VektopayError::Configuration(_))));
    }

    #[test]
    fn test_deleted_output_shape() {
        let rendered = serde_json::to_string(&Deleted { id: "cus_1", deleted: true }).unwrap();
        assert_eq!(rendered, r#"{"id":"cus_1","deleted":true}"#);
    }
}
