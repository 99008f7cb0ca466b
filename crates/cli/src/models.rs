//! Request and response bodies of the digital asset API.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest<'a> {
    pub asset_pool_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<&'a str>,
    pub reference: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest<'a> {
    pub asset_pool_id: &'a str,
    pub network: &'a str,
    pub asset: &'a str,
    pub destinations: Vec<Destination<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct Destination<'a> {
    pub address: &'a str,
    pub amount: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Option<String>,
    pub address: Option<String>,
    pub network: Option<String>,
    pub asset: Option<String>,
    pub reference: Option<String>,
    pub asset_pool_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPage {
    #[serde(default)]
    pub content: Vec<Address>,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
    pub total_elements: Option<u64>,
}

/// Response to a transaction request submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub request_id: Option<String>,
    pub status: Option<String>,
    pub network: Option<String>,
    pub asset: Option<String>,
    pub reference: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Option<String>,
    pub status: Option<String>,
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    pub created_at: Option<String>,
    pub address: Option<TransactionAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionAddress {
    pub reference: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub content: Vec<Transaction>,
}

// Amounts arrive as decimal strings, but some endpoints send bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Amount>::deserialize(deserializer)?.map(|amount| match amount {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
    }))
}
