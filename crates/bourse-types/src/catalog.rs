use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub stock_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub current_price: Decimal,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockExchange {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub stock_exchange_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub live_in_market: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockRequest {
    pub name: String,
    pub description: String,
    pub current_price: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPriceRequest {
    pub current_price: Decimal,
}

/// Body for both creating and updating an exchange; the backend accepts the
/// same two fields for each.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StockExchangeRequest {
    pub name: String,
    pub description: String,
}

/// Body of the bulk membership endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockIdsRequest {
    #[serde(serialize_with = "ids_as_numbers_when_numeric")]
    pub stock_ids: Vec<String>,
}

/// Backend identifiers are numeric on the wire but opaque to the console.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

fn ids_as_numbers_when_numeric<S>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(ids.len()))?;
    for id in ids {
        match id.parse::<i64>() {
            Ok(n) => seq.serialize_element(&n)?,
            Err(_) => seq.serialize_element(id)?,
        }
    }
    seq.end()
}
