use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct MarketPricesResponse {
    #[serde(rename = "marketPrices")]
    pub market_prices: Option<MarketPrices>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerMarketPricesResponse {
    #[serde(rename = "customerMarketPrices")]
    pub customer_market_prices: Option<MarketPrices>,
}

/// Electricity and gas prices for one or more days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPrices {
    #[serde(rename = "averageElectricityPrices", default)]
    pub average_electricity_prices: Option<AveragePrice>,
    #[serde(rename = "electricityPrices", default)]
    pub electricity_prices: Vec<Price>,
    #[serde(rename = "gasPrices", default)]
    pub gas_prices: Vec<Price>,
}

impl MarketPrices {
    /// Append another day's prices. Averages only describe a single day,
    /// so they are dropped once days are combined.
    pub fn merge(&mut self, other: MarketPrices) {
        self.average_electricity_prices = None;
        self.electricity_prices.extend(other.electricity_prices);
        self.gas_prices.extend(other.gas_prices);
    }
}

/// A single price slot. Amounts are in euro per unit (kWh or m³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(rename = "marketPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub market_price: f64,
    #[serde(rename = "marketPriceTax", default, deserialize_with = "deserialize_null_as_zero")]
    pub market_price_tax: f64,
    #[serde(rename = "sourcingMarkupPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub sourcing_markup_price: f64,
    #[serde(rename = "energyTaxPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub energy_tax_price: f64,
    #[serde(rename = "marketPricePlus", default, deserialize_with = "deserialize_null_as_zero")]
    pub market_price_plus: f64,
    #[serde(rename = "allInPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub all_in_price: f64,
    #[serde(rename = "perUnit", default)]
    pub per_unit: Option<String>,
}

impl Price {
    /// Market price plus tax, sourcing markup and energy tax
    pub fn total_price(&self) -> f64 {
        self.market_price + self.market_price_tax + self.sourcing_markup_price + self.energy_tax_price
    }

    /// All-in price, falling back to the computed total where the API
    /// leaves it at zero (Belgian prices)
    pub fn display_all_in(&self) -> f64 {
        if self.all_in_price == 0.0 {
            self.total_price()
        } else {
            self.all_in_price
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePrice {
    #[serde(rename = "averageMarketPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub average_market_price: f64,
    #[serde(rename = "averageMarketPricePlus", default, deserialize_with = "deserialize_null_as_zero")]
    pub average_market_price_plus: f64,
    #[serde(rename = "averageAllInPrice", default, deserialize_with = "deserialize_null_as_zero")]
    pub average_all_in_price: f64,
    #[serde(rename = "perUnit", default)]
    pub per_unit: Option<String>,
    #[serde(rename = "isWeighted", default)]
    pub is_weighted: bool,
}

// Helper to deserialize a nullable amount, treating null as zero
fn deserialize_null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
