use std::env;

pub mod cors;

pub use cors::create_cors_layer;

/// Which persistence backend to run. Both expose identical HTTP semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Typed row mapping through `query_as` (the ORM-flavored variant).
    Mapped,
    /// Hand-written SQL with manual column extraction.
    Raw,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mapped" => Some(StoreBackend::Mapped),
            "raw" => Some(StoreBackend::Raw),
            _ => None,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> Self {
        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value, "Unknown STORE_BACKEND, falling back to mapped");
                StoreBackend::Mapped
            }),
            Err(_) => StoreBackend::Mapped,
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/events".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            backend,
        }
    }
}
