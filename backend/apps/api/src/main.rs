//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use account::{AccountConfig, PgAccountRepository, account_router};
use auth::{AuthConfig, PgAuthRepository, RateLimitPolicy, RateLimiter, auth_router, rate_limit};
use axum::{
    Extension, Router, http,
    http::{Method, header},
    middleware,
};
use catalog::{CatalogConfig, PgCatalogRepository, catalog_router};
use commerce::domain::entity::order::ShippingPolicy;
use commerce::{
    CartMergeService, CommerceConfig, HttpPaymentGateway, PaymentGatewayConfig,
    PgCommerceRepository, ResellerReferralProgram, cart_router, order_router, payment_router,
};
use platform::jwt::{TokenConfig, TokenService};
use platform::rate_limit::RedisRateLimitStore;
use reseller::{PgResellerRepository, ResellerConfig, reseller_router, withdraw_router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,account=info,catalog=info,commerce=info,reseller=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Rate limit store
    let rate_limit_store = RedisRateLimitStore::connect(&settings.redis_url, "ratelimit").await?;
    tracing::info!("Connected to Redis");

    // Tokens and cookies
    let token_config = match &settings.jwt_secret {
        Some(secret) => TokenConfig::with_secret(secret.clone())?,
        None => {
            tracing::warn!("JWT_SECRET not set, using a random secret for this process");
            TokenConfig::with_random_secret()
        }
    };
    let auth_config = AuthConfig {
        password_pepper: settings.password_pepper.clone(),
        ..AuthConfig::for_tokens(&token_config, settings.cookie_secure)
    };
    let tokens = Arc::new(TokenService::new(token_config));

    // Repositories and services
    let auth_repo = PgAuthRepository::new(pool.clone());
    let account_repo = PgAccountRepository::new(pool.clone());
    let catalog_repo = PgCatalogRepository::new(pool.clone());
    let commerce_repo = PgCommerceRepository::new(pool.clone());
    let reseller_repo = PgResellerRepository::new(pool.clone());

    let gateway = Arc::new(HttpPaymentGateway::new(PaymentGatewayConfig {
        api_url: settings.payment_api_url.clone(),
        secret_key: settings.payment_secret_key.clone(),
        ..PaymentGatewayConfig::default()
    })?);
    let referrals = Arc::new(ResellerReferralProgram::new(Arc::new(
        reseller_repo.clone(),
    )));

    let commerce_config = CommerceConfig {
        shipping: ShippingPolicy {
            flat_fee: settings.shipping_flat_fee,
            free_threshold: settings.free_shipping_threshold,
        },
        ..CommerceConfig::default()
    }
    .with_callback_token(settings.payment_callback_token.clone());

    let reseller_config = ResellerConfig {
        default_commission_rate: settings.default_commission_rate,
        min_withdrawal: settings.min_withdrawal,
        ..ResellerConfig::default()
    }
    .with_auth_cookie(auth_config.auth_cookie());

    let merger = CartMergeService::new(Arc::new(commerce_repo.clone()), &commerce_config);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let limiter = RateLimiter::new(rate_limit_store, RateLimitPolicy::default());

    // Build router
    let api = Router::new()
        .nest(
            "/auth",
            auth_router(auth_repo, merger, tokens.clone(), auth_config.clone()),
        )
        .nest(
            "/user",
            account_router(
                account_repo,
                AccountConfig::with_pepper(auth_config.password_pepper.clone()),
            ),
        )
        .nest(
            "/product",
            catalog_router(catalog_repo, CatalogConfig::default()),
        )
        .nest(
            "/cart",
            cart_router(commerce_repo.clone(), commerce_config.clone()),
        )
        .nest(
            "/order",
            order_router(
                commerce_repo.clone(),
                gateway.clone(),
                referrals.clone(),
                commerce_config.clone(),
            ),
        )
        .nest(
            "/payment",
            payment_router(commerce_repo, gateway, referrals, commerce_config),
        )
        .nest(
            "/reseller",
            reseller_router(reseller_repo.clone(), reseller_config.clone()),
        )
        .nest("/withdraw", withdraw_router(reseller_repo, reseller_config));

    // The rate limiter reads the token service, so the extension wraps it
    let app = Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::<RedisRateLimitStore>,
        ))
        .layer(Extension(tokens))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", settings.bind_addr);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
