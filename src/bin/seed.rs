use coffee_trade_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;
    seed_retail(&pool).await?;
    seed_export(&pool).await?;
    seed_events(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_retail(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // (name, description, roast, price in KSh cents, stock)
    let coffees = vec![
        (
            "Kenya AA Medium Roast",
            "Bright blackcurrant acidity with a syrupy body",
            "Medium",
            95_000_i64,
            40,
        ),
        (
            "Nyeri Hills Dark Roast",
            "Heavy bodied with cocoa and molasses notes",
            "Dark",
            88_000_i64,
            25,
        ),
        (
            "Kirinyaga Light Roast",
            "Floral cup with stone fruit sweetness",
            "Light",
            102_000_i64,
            8,
        ),
    ];

    for (name, desc, roast, price, stock) in coffees {
        sqlx::query(
            r#"
            INSERT INTO products (id, kind, name, description, roast_level, price_kes, retail_stock)
            VALUES ($1, 'roasted_retail', $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(roast)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded retail catalog");
    Ok(())
}

async fn seed_export(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // (name, region, grade, process, cupping score, bags)
    let lots = vec![
        ("Gatomboya AA Lot 14", "Nyeri", "AA", "Washed", 87.5_f32, 120),
        ("Karimikui AB Lot 3", "Kirinyaga", "AB", "Washed", 85.0_f32, 80),
        ("Mbeya Peaberry", "Mbeya", "PB", "Natural", 84.25_f32, 60),
    ];

    for (name, region, grade, process, score, bags) in lots {
        sqlx::query(
            r#"
            INSERT INTO products (id, kind, name, species, region, grade, process, cupping_score, available_bags)
            VALUES ($1, 'green_export', $2, 'Arabica', $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(region)
        .bind(grade)
        .bind(process)
        .bind(score)
        .bind(bags)
        .execute(pool)
        .await?;
    }

    println!("Seeded export catalog");
    Ok(())
}

async fn seed_events(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO events (id, title, event_date, tag, location, description, status)
        SELECT $1, 'Nairobi Cupping Session', '2026-09-12', 'Cupping', 'Nairobi Roastery', 'Open table cupping of the new auction lots', 'upcoming'
        WHERE NOT EXISTS (SELECT 1 FROM events WHERE title = 'Nairobi Cupping Session')
        "#,
    )
    .bind(Uuid::new_v4())
    .execute(pool)
    .await?;

    println!("Seeded events");
    Ok(())
}
