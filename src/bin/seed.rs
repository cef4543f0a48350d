use restaurant_registry::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    models::{Cuisine, RestaurantStatus},
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let amina = ensure_user(&pool, "amina", "amina@example.com", "amina123").await?;
    let marco = ensure_user(&pool, "marco", "marco@example.com", "marco123").await?;
    seed_restaurants(&pool, amina, marco).await?;

    println!("Seed completed. amina={amina}, marco={marco}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET username = EXCLUDED.username
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_restaurants(pool: &DbPool, amina: i64, marco: i64) -> anyhow::Result<()> {
    let restaurants = vec![
        (amina, "Dar Tajine", Cuisine::Moroccan, "12 Rue des Oliviers, Marrakech", Some(150.0), 4.6, RestaurantStatus::Partner),
        (amina, "Le Riad Bleu", Cuisine::Moroccan, "3 Derb Sidi Ahmed, Fes", Some(220.0), 4.2, RestaurantStatus::Prospect),
        (amina, "Sakura Garden", Cuisine::Asian, "88 Boulevard Zerktouni, Casablanca", None, 0.0, RestaurantStatus::Prospect),
        (marco, "Trattoria Nonna", Cuisine::Italian, "21 Avenue Hassan II, Rabat", Some(180.0), 4.8, RestaurantStatus::Partner),
        (marco, "Pasta Vera", Cuisine::Italian, "5 Rue de Tanger, Tangier", Some(95.0), 3.9, RestaurantStatus::Inactive),
    ];

    for (owner, name, cuisine, address, average_price, rating, status) in restaurants {
        sqlx::query(
            r#"
            INSERT INTO restaurants (user_id, name, cuisine, address, average_price, rating, status)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM restaurants WHERE user_id = $1 AND name = $2)
            "#,
        )
        .bind(owner)
        .bind(name)
        .bind(cuisine.as_str())
        .bind(address)
        .bind(average_price)
        .bind(rating)
        .bind(status.as_str())
        .execute(pool)
        .await?;
    }

    println!("Seeded restaurants");
    Ok(())
}
