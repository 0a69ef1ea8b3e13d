use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use clap::Args;
use serde_json::json;
use tracing::debug;

use frankie_core::api::queries::{
    BELGIUM_MARKET_PRICES_QUERY, CUSTOMER_MARKET_PRICES_QUERY, MARKET_PRICES_QUERY,
};
use frankie_core::models::{CustomerMarketPricesResponse, MarketPrices, MarketPricesResponse, Price};
use frankie_core::{ApiClient, Country, Settings};

use super::{authenticated_client, new_client, sites};
use crate::output;

/// Day-ahead prices are published around 12:55 CET
const TOMORROW_PRICES_HOUR: u32 = 13;

const HEADERS: [&str; 5] = ["Date", "Time", "Market", "Total", "All-In"];

#[derive(Debug, Args)]
pub struct PricesArgs {
    /// Date to show prices for (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    date: Option<String>,

    /// Show Belgium prices instead of Netherlands
    #[arg(long)]
    be: bool,

    /// Site reference for customer-specific prices (requires login)
    #[arg(short, long)]
    site: Option<String>,

    /// Show gas prices instead of electricity
    #[arg(long)]
    gas: bool,

    /// Price resolution in minutes: 15 or 60 (15 requires login)
    #[arg(short, long, default_value_t = 60)]
    resolution: u32,
}

/// Where prices come from, and which transport that needs
#[derive(Debug, PartialEq)]
enum PriceSource {
    /// Public Dutch prices at the given `PriceResolution`
    Public(&'static str),
    /// Public Belgian prices, sent with the `x-country` header
    Belgium,
    /// Prices for one of the customer's own sites
    Customer(String),
}

fn resolution_code(minutes: u32) -> Result<&'static str> {
    match minutes {
        15 => Ok("PT15M"),
        60 => Ok("PT60M"),
        other => bail!("invalid resolution: {} (must be 15 or 60)", other),
    }
}

/// Dates to fetch: the requested date, or today plus tomorrow once the
/// next day's prices have been published.
fn price_dates(requested: Option<&str>, now: NaiveDateTime) -> Result<Vec<String>> {
    if let Some(date) = requested {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}' (expected YYYY-MM-DD)", date))?;
        return Ok(vec![date.to_string()]);
    }

    let today = now.date();
    let mut dates = vec![today.to_string()];
    if now.hour() >= TOMORROW_PRICES_HOUR {
        if let Some(tomorrow) = today.succ_opt() {
            dates.push(tomorrow.to_string());
        }
    }
    Ok(dates)
}

async fn fetch_prices(client: &ApiClient, source: &PriceSource, date: &str) -> Result<Option<MarketPrices>> {
    debug!(date, ?source, "Fetching prices");
    match source {
        PriceSource::Public(resolution) => {
            let variables = json!({ "date": date, "resolution": resolution });
            let response: MarketPricesResponse = client
                .query(MARKET_PRICES_QUERY, "MarketPrices", Some(variables))
                .await
                .context("failed to fetch prices")?;
            Ok(response.market_prices)
        }
        PriceSource::Belgium => {
            let variables = json!({ "date": date });
            let response: MarketPricesResponse = client
                .query(BELGIUM_MARKET_PRICES_QUERY, "MarketPrices", Some(variables))
                .await
                .context("failed to fetch Belgium prices")?;
            Ok(response.market_prices)
        }
        PriceSource::Customer(site) => {
            let variables = json!({ "date": date, "siteReference": site });
            let response: CustomerMarketPricesResponse = client
                .query(CUSTOMER_MARKET_PRICES_QUERY, "MarketPrices", Some(variables))
                .await
                .context("failed to fetch customer prices")?;
            Ok(response.customer_market_prices)
        }
    }
}

/// Pick the price source and build a client with the matching credentials
async fn prepare(settings: &Settings, args: &PricesArgs) -> Result<(ApiClient, PriceSource)> {
    if let Some(partial) = &args.site {
        let client = authenticated_client(settings).await?;
        let site = sites::resolve_site_reference(&client, partial).await?;
        return Ok((client, PriceSource::Customer(site)));
    }

    if args.be || settings.country == Country::Belgium {
        let mut client = new_client(settings)?;
        client.set_country(Country::Belgium);
        return Ok((client, PriceSource::Belgium));
    }

    let resolution = resolution_code(args.resolution)?;
    let client = if resolution == "PT15M" {
        authenticated_client(settings)
            .await
            .context("15-minute resolution requires login")?
    } else {
        new_client(settings)?
    };
    Ok((client, PriceSource::Public(resolution)))
}

pub async fn run(settings: &Settings, args: PricesArgs) -> Result<()> {
    let dates = price_dates(args.date.as_deref(), Local::now().naive_local())?;
    let (client, source) = prepare(settings, &args).await?;

    let mut merged: Option<MarketPrices> = None;
    for date in &dates {
        let Some(day) = fetch_prices(&client, &source, date).await? else {
            debug!(date = date.as_str(), "No prices published");
            continue;
        };
        match merged.as_mut() {
            Some(all) => all.merge(day),
            None => merged = Some(day),
        }
    }
    let prices = merged.context("no prices available")?;

    if settings.is_json() {
        return output::print_json(&prices);
    }

    let (label, slots) = if args.gas {
        ("Gas", &prices.gas_prices)
    } else {
        ("Electricity", &prices.electricity_prices)
    };
    if slots.is_empty() {
        println!("No {} prices available", label.to_lowercase());
        return Ok(());
    }

    println!("{} prices", label);
    println!();
    let rows: Vec<Vec<String>> = slots.iter().map(price_row).collect();
    output::print_table(&HEADERS, &rows);
    Ok(())
}

fn format_euro(amount: f64) -> String {
    format!("€{:.4}", amount)
}

fn price_row(price: &Price) -> Vec<String> {
    let from = price.from.with_timezone(&Local);
    vec![
        from.format("%Y-%m-%d").to_string(),
        from.format("%H:%M").to_string(),
        format_euro(price.market_price),
        format_euro(price.total_price()),
        format_euro(price.display_all_in()),
    ]
}
