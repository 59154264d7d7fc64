use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use utils::assets::db_path;

pub mod entities;
pub mod models;
pub mod types;

pub use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

pub type DbPool = DatabaseConnection;

#[derive(Clone)]
pub struct DBService {
    pub pool: DbPool,
}

impl DBService {
    pub async fn new() -> Result<DBService, DbErr> {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!("sqlite://{}?mode=rwc", db_path().to_string_lossy())
        });

        let mut options = ConnectOptions::new(database_url);
        options.max_connections(5).sqlx_logging(false);

        let pool = Database::connect(options).await?;
        db_migration::Migrator::up(&pool, None).await?;
        tracing::debug!("Database connected and migrations applied");
        Ok(DBService { pool })
    }
}
