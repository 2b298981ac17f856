use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

/// Round-trip `SELECT 1` through the pool.
///
/// Used by the readiness probe; any error means the store is unusable.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.query_one_raw(Statement::from_string(backend, "SELECT 1".to_owned()))
        .await?;
    Ok(())
}
