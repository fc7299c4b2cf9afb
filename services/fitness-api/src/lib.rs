//! FitnessDev API
//!
//! REST service for the fitness club: accounts, course bookings,
//! subscriptions and the shop.
//!
//! ## Public Endpoints
//!
//! - `POST /auth/signup` - Create an account (reCAPTCHA)
//! - `POST /auth/login` - Log in (reCAPTCHA)
//! - `GET /type_abonnement` - Subscription formulas, `?nom=` filter
//! - `GET /produit` - Product catalogue, `?nom=` filter
//! - `POST /produit/add` - Add one or several products
//!
//! ## Authenticated Endpoints
//!
//! - `GET|PUT /user/profil` - Read or update the caller's profile
//! - `GET /user/previous-courses` - Caller's enrollments
//! - `DELETE /user/course/{id_cours}` - Cancel an enrollment
//! - `POST /bookings` - Book a course slot
//! - `GET /user/abonnement/check` - Active subscription
//! - `POST /user/abonnement/subscribe` - Subscribe and pay
//! - `PUT /user/abonnement/cancel` - Cancel the active subscription
//! - `POST /user/achat` - Buy products
//! - `GET /user/orders` - Past purchases
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use state::{AppState, Stores};

/// Build the HTTP router with its middleware stack
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let auth_routes = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login));

    let user_routes = Router::new()
        // Profile
        .route(
            "/user/profil",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        // Courses
        .route("/user/previous-courses", get(handlers::previous_courses))
        .route("/user/course/{id_cours}", delete(handlers::cancel_course))
        .route("/bookings", post(handlers::book_course))
        // Subscriptions
        .route("/user/abonnement/check", get(handlers::check_subscription))
        .route("/user/abonnement/subscribe", post(handlers::subscribe))
        .route("/user/abonnement/cancel", put(handlers::cancel_subscription))
        // Purchases
        .route("/user/achat", post(handlers::create_purchase))
        .route("/user/orders", get(handlers::list_orders));

    let catalogue_routes = Router::new()
        .route("/type_abonnement", get(handlers::list_subscription_types))
        .route("/produit", get(handlers::list_products))
        .route("/produit/add", post(handlers::add_products));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The browser front end is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(catalogue_routes)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

/// Install the Prometheus recorder and describe the service metrics
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Most requests are one or two queries; bcrypt dominates auth routes
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("fitness_operation_duration_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_counter!("fitness_signups_total", "Total accounts created");
    metrics::describe_counter!("fitness_logins_total", "Login attempts by result");
    metrics::describe_counter!("fitness_bookings_total", "Course bookings by course");
    metrics::describe_counter!(
        "fitness_subscriptions_created_total",
        "Total subscriptions created"
    );
    metrics::describe_counter!(
        "fitness_subscriptions_cancelled_total",
        "Total subscriptions cancelled"
    );
    metrics::describe_counter!("fitness_purchases_total", "Total purchases recorded");
    metrics::describe_counter!("fitness_products_added_total", "Total products added");
    metrics::describe_histogram!(
        "fitness_operation_duration_seconds",
        "Operation latency in seconds by operation type"
    );

    Ok(handle)
}
