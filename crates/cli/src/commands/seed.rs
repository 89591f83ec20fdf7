//! Seeding commands: default discount codes and the demo catalog.

use rust_decimal::Decimal;
use tracing::info;

use golazo_storefront::services::discounts::DiscountService;

/// Demo jerseys inserted by `seed catalog`.
const DEMO_JERSEYS: &[(&str, &str, &str, &str, bool)] = &[
    (
        "Real Madrid Home 23/24",
        "Real Madrid",
        "La Liga",
        "89.95",
        false,
    ),
    (
        "FC Barcelona Home 23/24",
        "FC Barcelona",
        "La Liga",
        "89.95",
        false,
    ),
    (
        "Atlético de Madrid Away 23/24",
        "Atlético de Madrid",
        "La Liga",
        "84.95",
        false,
    ),
    (
        "Manchester City Home 23/24",
        "Manchester City",
        "Premier League",
        "89.95",
        false,
    ),
    ("AC Milan Retro 88/89", "AC Milan", "Serie A", "59.95", true),
];

/// Demo packs inserted by `seed catalog`.
const DEMO_PACKS: &[(&str, &str, i32, &str)] = &[
    (
        "Pack Liga x3",
        "Three La Liga jerseys of your choice",
        3,
        "199.95",
    ),
    (
        "Pack Europa x5",
        "Five jerseys from any European league",
        5,
        "299.95",
    ),
];

/// Ensure the default discount codes exist.
///
/// Reuses the service's idempotent seeding, so re-running never resets
/// redemption statistics.
///
/// # Errors
///
/// Returns an error when the database is unreachable.
pub async fn discounts() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to storefront database");

    DiscountService::new(pool).setup_defaults().await;

    info!("Default discount codes ensured");
    Ok(())
}

/// Insert the demo catalog. Existing rows with the same name are skipped.
///
/// # Errors
///
/// Returns an error when the database is unreachable or an insert fails.
pub async fn catalog() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to storefront database");

    let mut inserted = 0_u32;
    for &(name, team, league, price, is_retro) in DEMO_JERSEYS {
        let price: Decimal = price.parse()?;
        let result = sqlx::query(
            r"
            INSERT INTO storefront.jerseys (name, team, league, price, sizes, is_retro)
            SELECT $1, $2, $3, $4, '{S,M,L,XL}', $5
            WHERE NOT EXISTS (SELECT 1 FROM storefront.jerseys WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(team)
        .bind(league)
        .bind(price)
        .bind(is_retro)
        .execute(&pool)
        .await?;
        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    for &(name, description, jersey_count, price) in DEMO_PACKS {
        let price: Decimal = price.parse()?;
        let result = sqlx::query(
            r"
            INSERT INTO storefront.packs (name, description, jersey_count, price)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM storefront.packs WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(jersey_count)
        .bind(price)
        .execute(&pool)
        .await?;
        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    info!("Catalog seeded ({inserted} new rows)");
    Ok(())
}

/// Deactivate a discount code.
///
/// # Errors
///
/// Returns an error when the database is unreachable or the code does not
/// exist.
pub async fn deactivate_discount(code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    if DiscountService::new(pool).deactivate(code).await {
        info!("Discount code deactivated: {code}");
        Ok(())
    } else {
        Err(format!("could not deactivate discount code: {code}").into())
    }
}

/// Print per-code redemption statistics.
///
/// # Errors
///
/// Returns an error when the database is unreachable or the query fails.
pub async fn discount_stats() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let codes = DiscountService::new(pool).list().await?;
    if codes.is_empty() {
        info!("No discount codes found");
        return Ok(());
    }

    info!("Discount Code Statistics");
    info!("========================");
    for code in codes {
        let state = if code.is_active { "active" } else { "inactive" };
        info!(
            "  {}: {}% - {} uses by {} redeemers ({state})",
            code.code,
            code.percentage,
            code.current_uses,
            code.used_by.len()
        );
    }

    Ok(())
}
