use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;

use crate::client::Layer1Client;
use crate::config::{Config, GlobalArgs};

mod addresses;
mod signing;
mod transactions;

pub use addresses::{CreateAddressArgs, CreateAddressByAssetArgs, ListAddressesArgs};
pub use signing::SignArgs;
pub use transactions::{CreateTransactionArgs, ListTransactionsArgs};

const ADDRESSES_PATH: &str = "/digital/v1/addresses";
const TRANSACTION_REQUESTS_PATH: &str = "/digital/v1/transaction-requests";
const TRANSACTIONS_PATH: &str = "/digital/v1/transactions";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new address for receiving assets
    CreateAddress(CreateAddressArgs),
    /// Create addresses on every supported network for an asset
    CreateAddressByAsset(CreateAddressByAssetArgs),
    /// List addresses by reference
    ListAddresses(ListAddressesArgs),
    /// Create a new blockchain transaction
    CreateTransaction(CreateTransactionArgs),
    /// List transactions by reference
    ListTransactions(ListTransactionsArgs),
    /// Print the signature headers for a request without sending it
    Sign(SignArgs),
    /// Print the public key matching the configured private key
    PublicKey,
}

impl Command {
    pub async fn execute(self, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
        match self {
            Command::CreateAddress(args) => addresses::create(&connect(global)?, args, out).await,
            Command::CreateAddressByAsset(args) => {
                addresses::create_by_asset(&connect(global)?, args, out).await
            }
            Command::ListAddresses(args) => addresses::list(&connect(global)?, args, out).await,
            Command::CreateTransaction(args) => {
                transactions::create(&connect(global)?, args, out).await
            }
            Command::ListTransactions(args) => {
                transactions::list(&connect(global)?, args, out).await
            }
            Command::Sign(args) => signing::sign(global, args, out),
            Command::PublicKey => signing::public_key(global, out),
        }
    }
}

fn connect(global: &GlobalArgs) -> Result<Layer1Client> {
    let config = Config::from_args(global)?;
    let signer = config.load_signer()?;
    Ok(Layer1Client::new(&config, Arc::new(signer))?)
}

fn or_pending(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("PENDING")
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parses_create_transaction() {
        let cli = TestCli::try_parse_from([
            "layer1",
            "--client-id",
            "client-123",
            "create-transaction",
            "--asset-pool-id",
            "pool-1",
            "--network",
            "ETHEREUM",
            "--asset",
            "USDC",
            "--to",
            "0xabc",
            "--amount",
            "1.5",
        ])
        .unwrap();
        assert_eq!(cli.global.client_id.as_deref(), Some("client-123"));
        match cli.command {
            Command::CreateTransaction(args) => {
                assert_eq!(args.to, "0xabc");
                assert_eq!(args.reference, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_options_accepted_after_subcommand() {
        let cli = TestCli::try_parse_from([
            "layer1",
            "public-key",
            "--key-file",
            "/tmp/key.pem",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::PublicKey));
        assert_eq!(
            cli.global.key_file.as_deref(),
            Some(std::path::Path::new("/tmp/key.pem"))
        );
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        let result = TestCli::try_parse_from([
            "layer1",
            "list-transactions",
            "--asset-pool-id",
            "pool-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(TestCli::try_parse_from(["layer1", "delete-everything"]).is_err());
    }

    #[test]
    fn placeholders() {
        assert_eq!(or_pending(&None), "PENDING");
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some("x".into())), "x");
    }
}
