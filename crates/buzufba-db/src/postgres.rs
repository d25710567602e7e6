//! PostgreSQL route store using sqlx

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info, instrument};

use crate::error::DbError;
use crate::seed::seed_records;
use crate::traits::RouteRepository;
use crate::types::{DepartureRow, RouteNameRow, RouteRecord, RouteRow};

const ROUTE_COLUMNS: &str = "route_id, route_name, trip_length, departure_location, \
     arrival_location, status_cd, created_at, updated_at";

/// Connection pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgPoolConfig {
    /// Connection URL, `postgres://[user[:password]@]host[:port]/database`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Maximum time to wait for a connection from the pool
    pub connect_timeout: Duration,
    /// Idle connections are closed after this long; `None` keeps them open
    pub idle_timeout: Option<Duration>,
}

impl Default for PgPoolConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

impl PgPoolConfig {
    /// Default settings for the given URL
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub const fn with_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub const fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Check the settings before opening a pool
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if the URL is empty or the bounds are inconsistent
    pub fn validate(&self) -> Result<(), DbError> {
        if self.url.trim().is_empty() {
            return Err(DbError::ConfigError("database url is empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(DbError::ConfigError(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(DbError::ConfigError(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

/// Route repository backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    /// Wrap an existing pool
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool with the given settings
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the first connection fails
    #[instrument(skip(config), fields(max = config.max_connections))]
    pub async fn connect(config: &PgPoolConfig) -> Result<Self, DbError> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(&config.url)
            .await?;

        info!("connected to postgres");
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations
    ///
    /// # Errors
    /// Returns error if a migration fails
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database migrations applied");
        Ok(())
    }

    /// Load the UFBA timetable into an empty store
    ///
    /// Does nothing when `routes` already has rows. Returns the number of
    /// routes inserted.
    ///
    /// # Errors
    /// Returns error if a query fails; nothing is written in that case
    pub async fn seed(&self) -> Result<usize, DbError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM routes")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            debug!(existing, "route store already populated, skipping seed");
            return Ok(0);
        }

        let records = seed_records(Utc::now());
        for record in &records {
            let route = &record.route;
            let route_id: i32 = sqlx::query_scalar(
                "INSERT INTO routes (route_name, trip_length, departure_location, \
                 arrival_location, status_cd, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING route_id",
            )
            .bind(&route.route_name)
            .bind(route.trip_length)
            .bind(&route.departure_location)
            .bind(&route.arrival_location)
            .bind(&route.status_cd)
            .bind(route.created_at)
            .bind(route.updated_at)
            .fetch_one(&mut *tx)
            .await?;

            for departure in &record.departures {
                sqlx::query(
                    "INSERT INTO departures (route_id, departure_time, obs, status_cd) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(route_id)
                .bind(&departure.departure_time)
                .bind(&departure.obs)
                .bind(&departure.status_cd)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        info!(routes = records.len(), "route timetable seeded");
        Ok(records.len())
    }

    async fn departures_for(&self, route_ids: &[i32]) -> Result<Vec<DepartureRow>, DbError> {
        let departures = sqlx::query_as::<_, DepartureRow>(
            "SELECT route_id, departure_time, obs, status_cd \
             FROM departures \
             WHERE route_id = ANY($1) \
             ORDER BY route_id, departure_id",
        )
        .bind(route_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(departures)
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    #[instrument(skip(self), level = "debug")]
    async fn list_routes(&self) -> Result<Vec<RouteRecord>, DbError> {
        let routes = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY route_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        if routes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = routes.iter().map(|r| r.route_id).collect();
        let departures = self.departures_for(&ids).await?;

        debug!(
            routes = routes.len(),
            departures = departures.len(),
            "loaded routes"
        );
        Ok(RouteRecord::group(routes, departures))
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRecord>, DbError> {
        let route = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE route_id = $1"
        ))
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(route) = route else {
            return Ok(None);
        };

        let departures = self.departures_for(&[route_id]).await?;
        Ok(Some(RouteRecord::new(route, departures)))
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_route_names(&self) -> Result<Vec<RouteNameRow>, DbError> {
        let names = sqlx::query_as::<_, RouteNameRow>(
            "SELECT route_id, route_name FROM routes ORDER BY route_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn ping(&self) -> Result<(), DbError> {
        if self.pool.is_closed() {
            return Err(DbError::Unavailable("pool is closed".to_string()));
        }
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
