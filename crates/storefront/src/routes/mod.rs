//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                        - Home content (featured / hot deals / latest)
//! GET    /health                  - Health check
//! GET    /ready                   - Readiness check (database ping)
//!
//! # Catalog
//! GET    /products                - Product listing (?category= filter)
//! GET    /products/{id}           - Product detail
//! GET    /categories              - Category listing
//!
//! # Search
//! GET    /search?q=               - Multi-category search (AI-normalized when enabled)
//! GET    /search/voice            - Voice search WebSocket relay
//!
//! # Cart (session-backed)
//! GET    /cart                    - Current cart
//! POST   /cart/items/{id}         - Add product (repeat adds bump quantity)
//! POST   /cart/items/{id}/increase - Bump line quantity
//! POST   /cart/items/{id}/decrease - Drop line quantity (removes at one)
//! DELETE /cart/items/{id}         - Remove line
//! DELETE /cart                    - Empty cart
//!
//! # Checkout / Orders (requires auth)
//! POST   /checkout                - Place order from cart (mock payment)
//! GET    /account/orders          - Order history
//! GET    /account/orders/{id}     - Order detail (owner-scoped)
//!
//! # Auth
//! POST   /auth/register           - Register (gated on signups setting)
//! POST   /auth/login              - Login
//! POST   /auth/logout             - Logout (cart survives)
//! GET    /auth/me                 - Current identity
//!
//! # Admin (requires admin)
//! POST   /admin/products                    - Create product
//! PUT    /admin/products/{id}               - Update product
//! PUT    /admin/products/{id}/hot-deal      - Toggle hot-deal flag
//! PUT    /admin/products/{id}/featured      - Toggle featured flag
//! DELETE /admin/products/{id}               - Delete product
//! POST   /admin/categories                  - Create category
//! PUT    /admin/categories/{id}             - Rename (relinks products)
//! DELETE /admin/categories/{id}             - Delete (cascades to products)
//! GET    /admin/settings                    - Current settings
//! PATCH  /admin/settings                    - Partial settings update
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod products;
pub mod search;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items/{id}", post(cart::add).delete(cart::remove))
        .route("/items/{id}/increase", post(cart::increase))
        .route("/items/{id}/decrease", post(cart::decrease))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(admin::products::create))
        .route(
            "/products/{id}",
            put(admin::products::update).delete(admin::products::delete),
        )
        .route("/products/{id}/hot-deal", put(admin::products::set_hot_deal))
        .route("/products/{id}/featured", put(admin::products::set_featured))
        .route("/categories", post(admin::categories::create))
        .route(
            "/categories/{id}",
            put(admin::categories::rename).delete(admin::categories::delete),
        )
        .route(
            "/settings",
            get(admin::settings::show).patch(admin::settings::update),
        )
}

/// Create the complete application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::content))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/search", get(search::search))
        .route("/search/voice", get(search::voice))
        .route("/checkout", post(checkout::place_order))
        .route("/account/orders", get(orders::list))
        .route("/account/orders/{id}", get(orders::show))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe; fails when the database is unreachable.
async fn ready(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
