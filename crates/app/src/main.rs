//! Demo entry point: seed a marketplace session, run the configured search,
//! print one page of results.

mod config;

use std::rc::Rc;

use anyhow::Context;

use estatehub_core::{Clock, Entity, SystemClock, UserId};
use estatehub_listings::Property;
use estatehub_query::Pagination;
use estatehub_session::{Identity, Marketplace, Role};

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    estatehub_observability::tracing::init(config.log_format);

    let identity = Identity::new(UserId::new(), config.user_name.as_str(), config.user_email.as_str(), Role::Buyer)
        .context("invalid demo identity")?;
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut market = Marketplace::from_fixtures(identity, clock).context("failed to seed marketplace")?;

    market
        .properties_mut()
        .set_sort(config.sort.clone())
        .context("invalid sort key")?;
    let matches = market.search_properties(&config.query)?;
    market
        .properties_mut()
        .set_pagination(Pagination::new(Some(config.page_size), None));

    tracing::info!(query = %config.query, matches, page_size = config.page_size, "search complete");

    let page = market.properties().page();
    println!("{} of {} properties", page.items.len(), page.total);
    for property in &page.items {
        println!("{}", render_row(property));
    }
    if page.has_more {
        println!("...");
    }

    let dashboard = market.dashboard();
    println!();
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

fn render_row(p: &Property) -> String {
    format!(
        "#{:<3} {:<28} {:>10} {:<5} {}bd/{}ba {:>5} sqft  {}",
        p.id(),
        p.title(),
        p.price(),
        p.listing_type().as_str(),
        p.bedrooms(),
        p.bathrooms(),
        p.area(),
        p.location()
    )
}
