//! Transaction helper that keeps the service error type intact.

use crate::errors::ServiceError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};
use std::future::Future;
use std::pin::Pin;

/// Type alias for boxed future used in transactions
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Runs `f` inside a database transaction.
///
/// Commits when `f` returns `Ok`, rolls back otherwise. The `ServiceError`
/// returned by `f` is passed through unchanged so a `NotFound` raised halfway
/// through an aggregate write still surfaces as a 404.
///
/// ```rust,ignore
/// let sheet = with_transaction(&db, move |txn| {
///     Box::pin(async move {
///         let header = spec_sheet_repository::insert(txn, header).await?;
///         spec_sheet_repository::insert_supplies(txn, lines).await?;
///         Ok(header)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T>(db: &DatabaseConnection, f: F) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, ServiceError>> + Send,
    T: Send,
{
    db.transaction::<F, T, ServiceError>(f)
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::from(db_err),
            TransactionError::Transaction(err) => err,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Statement};

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        db.execute_unprepared("CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
            .await
            .unwrap();
        db
    }

    async fn count(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM items".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    #[tokio::test]
    async fn commits_on_success() {
        let db = memory_db().await;
        let value = with_transaction(&db, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO items (name) VALUES ('flour')")
                    .await?;
                Ok(7)
            })
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn rolls_back_and_preserves_error_variant() {
        let db = memory_db().await;
        let result: Result<(), ServiceError> = with_transaction(&db, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO items (name) VALUES ('sugar')")
                    .await?;
                Err(ServiceError::not_found("Supply", 99))
            })
        })
        .await;

        assert_matches!(result, Err(ServiceError::NotFound(msg)) if msg.contains("99"));
        assert_eq!(count(&db).await, 0);
    }
}
