mod book;
mod borrower;
mod ledger;

use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::{ConflictReason, KernelError};

use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, borrower::*, ledger::*};

static POSTGRES_URL: &str = "POSTGRES_URL";

const UNIQUE_VIOLATION: &str = "23505";
const LEDGER_OPEN_COPY_INDEX: &str = "ledger_entries_open_copy_idx";
const BORROWER_NAME_EMAIL_KEY: &str = "borrowers_name_email_key";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to apply migrations")?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(con))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    let constraint = db.constraint();
                    tracing::warn!("Unique constraint {constraint:?} rejected a write");
                    unique_violation(constraint)
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

/// Maps a lost race on a uniqueness constraint to the error the losing request
/// would have seen had it run second.
fn unique_violation(constraint: Option<&str>) -> KernelError {
    match constraint {
        Some(LEDGER_OPEN_COPY_INDEX) => KernelError::from(ConflictReason::AlreadyBorrowed),
        Some(BORROWER_NAME_EMAIL_KEY) => KernelError::from(ConflictReason::BorrowerExists),
        _ => KernelError::Concurrency,
    }
}
