//! Market data adapter (ZNN / QSR prices and supply).
//!
//! One-shot GETs against the hc1.tools price API and the zenonhub.io token
//! API. No retries, no caching; any failure surfaces as `Error::External`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use znnbot_core::{
    errors::Error,
    formatting::{card_header, format_grouped_decimal, group_thousands},
    Result,
};

/// Base units per whole ZNN / QSR token (8 decimals).
const TOKEN_DECIMALS_DIVISOR: u128 = 100_000_000;

pub const MARKET_UNAVAILABLE: &str = "⚠️ Market data is unavailable right now. Try again later.";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prices {
    pub znn: f64,
    pub qsr: f64,
    pub btc: f64,
    pub eth: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSupply {
    /// Whole tokens currently in circulation.
    pub total: u128,
    /// Whole-token supply cap.
    pub max: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Supplies {
    pub znn: TokenSupply,
    pub qsr: TokenSupply,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketCaps {
    pub znn: f64,
    pub qsr: f64,
}

impl MarketCaps {
    pub fn compute(prices: &Prices, supplies: &Supplies) -> Self {
        Self {
            znn: prices.znn * supplies.znn.total as f64,
            qsr: prices.qsr * supplies.qsr.total as f64,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MarketClient {
    price_url: String,
    supply_url: String,
    http: reqwest::Client,
}

impl MarketClient {
    pub fn new(
        price_url: impl Into<String>,
        supply_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("znnbot/0.1")
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self {
            price_url: price_url.into(),
            supply_url: supply_url.into(),
            http,
        })
    }

    pub async fn fetch_prices(&self) -> Result<Prices> {
        let v = self.get_json(&self.price_url).await?;
        parse_prices(v)
    }

    pub async fn fetch_supplies(&self) -> Result<Supplies> {
        let v = self.get_json(&self.supply_url).await?;
        parse_supplies(v)
    }

    pub async fn fetch_market_caps(&self) -> Result<MarketCaps> {
        let prices = self.fetch_prices().await?;
        let supplies = self.fetch_supplies().await?;
        Ok(MarketCaps::compute(&prices, &supplies))
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::External(format!("market request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "market request failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        resp.json()
            .await
            .map_err(|e| Error::External(format!("market json error: {e}")))
    }
}

// ============== Wire formats ==============

#[derive(Deserialize)]
struct PriceEnvelope {
    data: PriceData,
}

#[derive(Deserialize)]
struct PriceData {
    znn: UsdQuote,
    qsr: UsdQuote,
    btc: UsdQuote,
    eth: UsdQuote,
}

#[derive(Deserialize)]
struct UsdQuote {
    #[serde(deserialize_with = "lenient_f64")]
    usd: f64,
}

#[derive(Deserialize)]
struct SupplyEnvelope {
    data: SupplyData,
}

#[derive(Deserialize)]
struct SupplyData {
    list: Vec<TokenEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEntry {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(deserialize_with = "lenient_u128")]
    total_supply: u128,
    #[serde(deserialize_with = "lenient_u128")]
    max_supply: u128,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    use serde::de::Error as _;
    match NumberOrString::deserialize(d)? {
        NumberOrString::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("not a float: {n}"))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("bad price {s:?}: {e}"))),
    }
}

fn lenient_u128<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u128, D::Error> {
    use serde::de::Error as _;
    match NumberOrString::deserialize(d)? {
        NumberOrString::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| D::Error::custom(format!("not an unsigned integer: {n}"))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u128>()
            .map_err(|e| D::Error::custom(format!("bad supply {s:?}: {e}"))),
    }
}

fn wire_error(e: serde_json::Error) -> Error {
    Error::External(format!("market json error: {e}"))
}

pub fn parse_prices(v: serde_json::Value) -> Result<Prices> {
    let env: PriceEnvelope = serde_json::from_value(v).map_err(wire_error)?;
    let d = env.data;
    Ok(Prices {
        znn: d.znn.usd,
        qsr: d.qsr.usd,
        btc: d.btc.usd,
        eth: d.eth.usd,
    })
}

/// Pick ZNN and QSR by symbol, falling back to the API's usual order
/// (`list[0]` = QSR, `list[1]` = ZNN).
pub fn parse_supplies(v: serde_json::Value) -> Result<Supplies> {
    let env: SupplyEnvelope = serde_json::from_value(v).map_err(wire_error)?;
    let list = env.data.list;

    let pick = |symbol: &str, fallback: usize| -> Result<TokenSupply> {
        let entry = list
            .iter()
            .find(|t| {
                t.symbol
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
            })
            .or_else(|| list.get(fallback))
            .ok_or_else(|| Error::External(format!("supply for {symbol} missing")))?;
        Ok(TokenSupply {
            total: entry.total_supply / TOKEN_DECIMALS_DIVISOR,
            max: entry.max_supply / TOKEN_DECIMALS_DIVISOR,
        })
    };

    Ok(Supplies {
        znn: pick("ZNN", 1)?,
        qsr: pick("QSR", 0)?,
    })
}

// ============== Replies ==============

pub fn format_prices(p: &Prices) -> String {
    let mut out = card_header("ZNN & QSR Price");
    out.push_str(&format!(
        "ZNN: ${}\nQSR: ${}\nBTC: ${}\nETH: ${}",
        p.znn, p.qsr, p.btc, p.eth
    ));
    out
}

pub fn format_supplies(s: &Supplies) -> String {
    let mut out = card_header("ZNN & QSR Supply");
    out.push_str(&format!(
        "ZNN Current Supply: {}\nZNN Max Supply: {}\nQSR Current Supply: {}\nQSR Max Supply: {}",
        group_thousands(s.znn.total),
        group_thousands(s.znn.max),
        group_thousands(s.qsr.total),
        group_thousands(s.qsr.max),
    ));
    out
}

pub fn format_market_caps(m: &MarketCaps) -> String {
    let mut out = card_header("ZNN & QSR Market Cap");
    out.push_str(&format!(
        "ZNN: ${}\nQSR: ${}",
        format_grouped_decimal(m.znn, 2),
        format_grouped_decimal(m.qsr, 2),
    ));
    out
}
