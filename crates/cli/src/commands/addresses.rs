use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::{ADDRESSES_PATH, or_pending};
use crate::client::Layer1Client;
use crate::models::{Address, AddressPage, CreateAddressRequest};

#[derive(Debug, Args)]
pub struct CreateAddressArgs {
    /// The ID of the asset pool
    #[arg(long)]
    pub asset_pool_id: String,
    /// The network (e.g. ETHEREUM, TRON, SOLANA)
    #[arg(long)]
    pub network: String,
    /// The asset (e.g. USDC, USDT)
    #[arg(long)]
    pub asset: Option<String>,
    /// A reference for the address
    #[arg(long)]
    pub reference: String,
}

#[derive(Debug, Args)]
pub struct CreateAddressByAssetArgs {
    /// The ID of the asset pool
    #[arg(long)]
    pub asset_pool_id: String,
    /// The asset (e.g. USDC, USDT)
    #[arg(long)]
    pub asset: String,
    /// A reference for the addresses
    #[arg(long)]
    pub reference: String,
    /// How long to wait before listing the created addresses
    #[arg(long, default_value_t = 1000)]
    pub wait_ms: u64,
}

#[derive(Debug, Args)]
pub struct ListAddressesArgs {
    /// The ID of the asset pool
    #[arg(long)]
    pub asset_pool_id: String,
    /// The reference to search for
    #[arg(long)]
    pub reference: String,
}

pub(super) async fn create(
    client: &Layer1Client,
    args: CreateAddressArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let request = CreateAddressRequest {
        asset_pool_id: &args.asset_pool_id,
        network: Some(args.network.as_str()),
        asset: args.asset.as_deref(),
        reference: &args.reference,
    };
    let address: Address = client
        .post(client.endpoint(ADDRESSES_PATH, &[])?, &request)
        .await
        .context("failed to create address")?;

    writeln!(out, "Address created successfully:")?;
    writeln!(out, "  ID: {}", or_pending(&address.id))?;
    writeln!(out, "  Address: {}", or_pending(&address.address))?;
    writeln!(out, "  Network: {}", or_pending(&address.network))?;
    writeln!(out, "  Reference: {}", or_pending(&address.reference))?;
    writeln!(out, "  Asset Pool ID: {}", or_pending(&address.asset_pool_id))?;
    writeln!(out, "  Created At: {}", or_pending(&address.created_at))?;
    Ok(())
}

/// Addresses are provisioned asynchronously, so the list is read back
/// after a short wait.
pub(super) async fn create_by_asset(
    client: &Layer1Client,
    args: CreateAddressByAssetArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let request = CreateAddressRequest {
        asset_pool_id: &args.asset_pool_id,
        network: None,
        asset: Some(args.asset.as_str()),
        reference: &args.reference,
    };
    let _: serde_json::Value = client
        .post(client.endpoint(ADDRESSES_PATH, &[])?, &request)
        .await
        .context("failed to create address")?;
    writeln!(out, "Address creation initiated...")?;

    writeln!(out, "Waiting for addresses to be created...")?;
    info!(wait_ms = args.wait_ms, "waiting for address provisioning");
    tokio::time::sleep(Duration::from_millis(args.wait_ms)).await;

    let page = fetch(client, &args.asset_pool_id, &args.reference).await?;
    writeln!(out, "\nAddresses created:")?;
    write_addresses(&page, out)
}

pub(super) async fn list(
    client: &Layer1Client,
    args: ListAddressesArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let page = fetch(client, &args.asset_pool_id, &args.reference).await?;
    if page.content.is_empty() {
        writeln!(out, "No addresses found.")?;
        return Ok(());
    }
    writeln!(out, "Addresses found:")?;
    write_addresses(&page, out)
}

async fn fetch(client: &Layer1Client, asset_pool_id: &str, reference: &str) -> Result<AddressPage> {
    let query = format!("reference:{reference}");
    let url = client.endpoint(
        ADDRESSES_PATH,
        &[("assetPoolId", asset_pool_id), ("q", query.as_str())],
    )?;
    client.get(url).await.context("failed to list addresses")
}

fn write_addresses(page: &AddressPage, out: &mut dyn Write) -> Result<()> {
    for address in &page.content {
        writeln!(
            out,
            "Network: {:<10} Address: {}",
            or_pending(&address.network),
            or_pending(&address.address)
        )?;
    }
    Ok(())
}
