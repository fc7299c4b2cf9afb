//! FitnessDev DB - Database abstractions
//!
//! SQLx-based persistence layer: schema migrations, row models, async
//! repository traits and their PostgreSQL implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitness_db::{create_pool, PgConnectOptions, Repositories, RegistrantRepository};
//!
//! let options: PgConnectOptions = "postgres://localhost/fitness_dev".parse()?;
//! let pool = create_pool(options).await?;
//! fitness_db::migrate(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let registrant = repos.registrants.find_by_email("jean.dupont@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, migrate, DbPool};
pub use sqlx::postgres::PgConnectOptions;
pub use repo::*;
