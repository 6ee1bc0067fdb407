use sea_orm::DatabaseConnection;

use crate::{AllocationPolicy, EngineError, ResultEngine};

mod access;
mod balances;
mod expenses;
mod groups;
mod members;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// Rollback happens when the transaction handle is dropped, which covers both
/// an `Err` result and an early `?` return from the block.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Repository operations over the shared-expense store.
///
/// The engine owns the connection pool handle; every operation acquires a
/// connection for the length of one transaction and releases it on all paths.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    policy: AllocationPolicy,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    policy: AllocationPolicy,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the default allocation policy.
    pub fn policy(mut self, policy: AllocationPolicy) -> EngineBuilder {
        self.policy = policy;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            policy: self.policy,
        })
    }
}
