#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Once,
};
use tokio::sync::{Mutex, MutexGuard};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
// Tests share one database and reseed it from scratch, so they must not
// overlap within a test binary.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        // The whole suite hammers from one address; keep the governor out
        // of the way.
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    _db_guard: MutexGuard<'static, ()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let db_guard = DB_LOCK.lock().await;

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        meeple::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    reset_and_seed(&db).await;

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(meeple::routes::create_routes())
        .layer(axum::extract::Extension(db.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let addr_str = format!("http://{}", addr);
    let client = Client::new();

    TestApp {
        addr: addr_str,
        db,
        client,
        _db_guard: db_guard,
    }
}

async fn reset_and_seed(db: &DatabaseConnection) {
    // Reverse dependency order; restarting identities keeps the fixture
    // ids stable from test to test.
    db.execute(Statement::from_string(
        sea_orm::DatabaseBackend::Postgres,
        "TRUNCATE TABLE comments, reviews, categories, users RESTART IDENTITY CASCADE".to_string(),
    ))
    .await
    .expect("Failed to reset tables");

    meeple::services::seed::seed_database(db)
        .await
        .expect("Failed to seed test data");
}

/// Column values extracted from a JSON list response.
pub fn column_values(rows: &serde_json::Value, column: &str) -> Vec<serde_json::Value> {
    rows.as_array()
        .expect("expected an array of rows")
        .iter()
        .map(|row| row[column].clone())
        .collect()
}

pub fn is_sorted_asc<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

pub fn is_sorted_desc<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] >= pair[1])
}
