use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use super::{TRANSACTION_REQUESTS_PATH, TRANSACTIONS_PATH, or_dash};
use crate::client::Layer1Client;
use crate::models::{
    CreateTransactionRequest, Destination, Transaction, TransactionPage, TransactionRequest,
};

#[derive(Debug, Args)]
pub struct CreateTransactionArgs {
    /// The ID of the asset pool
    #[arg(long)]
    pub asset_pool_id: String,
    /// The network (e.g. ETHEREUM, TRON, SOLANA)
    #[arg(long)]
    pub network: String,
    /// The asset (e.g. USDC, USDT)
    #[arg(long)]
    pub asset: String,
    /// The destination address
    #[arg(long)]
    pub to: String,
    /// The amount to transfer, as a decimal string
    #[arg(long)]
    pub amount: String,
    /// A reference for the transaction
    #[arg(long)]
    pub reference: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListTransactionsArgs {
    /// The ID of the asset pool
    #[arg(long)]
    pub asset_pool_id: String,
    /// The reference to search for
    #[arg(long)]
    pub reference: String,
}

pub(super) async fn create(
    client: &Layer1Client,
    args: CreateTransactionArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let request = CreateTransactionRequest {
        asset_pool_id: &args.asset_pool_id,
        network: &args.network,
        asset: &args.asset,
        destinations: vec![Destination {
            address: &args.to,
            amount: &args.amount,
        }],
        reference: args.reference.as_deref(),
    };
    let response: TransactionRequest = client
        .post(client.endpoint(TRANSACTION_REQUESTS_PATH, &[])?, &request)
        .await
        .context("failed to create transaction")?;

    writeln!(out, "Transaction created successfully:")?;
    writeln!(out, "  ID: {}", or_dash(&response.request_id))?;
    writeln!(out, "  Status: {}", or_dash(&response.status))?;
    writeln!(out, "  Network: {}", or_dash(&response.network))?;
    writeln!(out, "  Asset: {}", or_dash(&response.asset))?;
    writeln!(out, "  Reference: {}", or_dash(&response.reference))?;
    writeln!(out, "  Created At: {}", or_dash(&response.created_at))?;
    Ok(())
}

pub(super) async fn list(
    client: &Layer1Client,
    args: ListTransactionsArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let query = format!("reference:{} type:(deposit withdrawal)", args.reference);
    let url = client.endpoint(
        TRANSACTIONS_PATH,
        &[("assetPoolId", args.asset_pool_id.as_str()), ("q", query.as_str())],
    )?;
    let page: TransactionPage = client.get(url).await.context("failed to list transactions")?;

    if page.content.is_empty() {
        writeln!(out, "No transactions found.")?;
        return Ok(());
    }
    writeln!(out, "Transactions found:")?;
    for (index, transaction) in page.content.iter().enumerate() {
        write_transaction(index + 1, transaction, out)?;
    }
    Ok(())
}

fn write_transaction(number: usize, transaction: &Transaction, out: &mut dyn Write) -> Result<()> {
    let address = transaction.address.as_ref();
    let network = address.and_then(|a| a.network.as_deref()).unwrap_or("-");
    let reference = address.and_then(|a| a.reference.as_deref()).unwrap_or("-");

    writeln!(out, "\nTransaction {number}:")?;
    writeln!(out, "  ID: {}", or_dash(&transaction.id))?;
    writeln!(out, "  Status: {}", or_dash(&transaction.status))?;
    writeln!(out, "  Network: {network}")?;
    writeln!(out, "  Asset: {}", or_dash(&transaction.asset))?;
    writeln!(out, "  Reference: {reference}")?;
    writeln!(out, "  Created At: {}", or_dash(&transaction.created_at))?;
    writeln!(out, "  Amount: {}", or_dash(&transaction.amount))?;
    Ok(())
}
