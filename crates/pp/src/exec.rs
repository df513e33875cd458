//! Pass-through execution of built statements.
//!
//! The builder never talks to a database itself. A dataset bound to a
//! [`Driver`] (see `with_driver`) can hand its build output to that driver
//! through a [`QueryExecutor`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{PpError, PpResult};
use crate::value::Value;

/// A database handle able to run rendered SQL.
#[async_trait::async_trait]
pub trait Driver: Send + Sync {
    /// Execute a statement and return the number of affected rows.
    async fn exec_context(&self, sql: &str, args: &[Value]) -> PpResult<u64>;

    /// Execute a query and return the driver's row set.
    async fn query_context(&self, sql: &str, args: &[Value]) -> PpResult<Rows>;
}

/// Row set returned by a [`Driver`]; downcast it to the driver's own type.
pub struct Rows(Box<dyn Any + Send>);

impl Rows {
    pub fn new<T: Any + Send>(rows: T) -> Self {
        Self(Box::new(rows))
    }

    /// Take the driver's row type back out, or return `self` on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.0.downcast::<T>() {
            Ok(rows) => Ok(*rows),
            Err(rows) => Err(Self(rows)),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rows").finish_non_exhaustive()
    }
}

/// Shared handle to a bound [`Driver`].
#[derive(Clone)]
pub struct DriverHandle(Arc<dyn Driver>);

impl DriverHandle {
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self(Arc::new(driver))
    }

    pub fn from_arc(driver: Arc<dyn Driver>) -> Self {
        Self(driver)
    }

    pub fn driver(&self) -> &dyn Driver {
        self.0.as_ref()
    }
}

impl fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DriverHandle")
    }
}

impl<D: Driver + 'static> From<Arc<D>> for DriverHandle {
    fn from(driver: Arc<D>) -> Self {
        Self(driver)
    }
}

impl From<Arc<dyn Driver>> for DriverHandle {
    fn from(driver: Arc<dyn Driver>) -> Self {
        Self(driver)
    }
}

/// A built statement paired with the driver that will run it.
#[derive(Debug)]
pub struct QueryExecutor {
    built: PpResult<(String, Vec<Value>)>,
    driver: Option<DriverHandle>,
}

impl QueryExecutor {
    pub fn new(built: PpResult<(String, Vec<Value>)>, driver: Option<DriverHandle>) -> Self {
        Self { built, driver }
    }

    /// The build output this executor forwards.
    pub fn to_sql(&self) -> PpResult<(&str, &[Value])> {
        match &self.built {
            Ok((sql, args)) => Ok((sql.as_str(), args.as_slice())),
            Err(err) => Err(err.clone()),
        }
    }

    fn prepare(&self) -> PpResult<(&DriverHandle, &str, &[Value])> {
        let (sql, args) = self.to_sql()?;
        let driver = self.driver.as_ref().ok_or(PpError::ExecutorMissing)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pp.exec", sql = %sql, args = ?args, "forwarding statement");
        Ok((driver, sql, args))
    }

    /// Run the statement, returning the affected row count.
    pub async fn exec(&self) -> PpResult<u64> {
        let (driver, sql, args) = self.prepare()?;
        driver.driver().exec_context(sql, args).await
    }

    /// Run the query, returning the driver's rows.
    pub async fn query(&self) -> PpResult<Rows> {
        let (driver, sql, args) = self.prepare()?;
        driver.driver().query_context(sql, args).await
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::{Driver, Rows};
    use crate::error::PpResult;
    use crate::value::Value;
    use tokio_postgres::types::ToSql;

    fn params(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
        args.iter().map(|arg| arg as &(dyn ToSql + Sync)).collect()
    }

    /// Rows come back as `Vec<tokio_postgres::Row>`.
    #[async_trait::async_trait]
    impl Driver for tokio_postgres::Client {
        async fn exec_context(&self, sql: &str, args: &[Value]) -> PpResult<u64> {
            Ok(self.execute(sql, &params(args)).await?)
        }

        async fn query_context(&self, sql: &str, args: &[Value]) -> PpResult<Rows> {
            Ok(Rows::new(self.query(sql, &params(args)).await?))
        }
    }

    #[async_trait::async_trait]
    impl Driver for tokio_postgres::Transaction<'_> {
        async fn exec_context(&self, sql: &str, args: &[Value]) -> PpResult<u64> {
            Ok(self.execute(sql, &params(args)).await?)
        }

        async fn query_context(&self, sql: &str, args: &[Value]) -> PpResult<Rows> {
            Ok(Rows::new(self.query(sql, &params(args)).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder;

    #[async_trait::async_trait]
    impl Driver for Recorder {
        async fn exec_context(&self, _sql: &str, args: &[Value]) -> PpResult<u64> {
            Ok(args.len() as u64)
        }

        async fn query_context(&self, sql: &str, _args: &[Value]) -> PpResult<Rows> {
            Ok(Rows::new(sql.to_string()))
        }
    }

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(f)
    }

    #[test]
    fn missing_driver_is_reported() {
        let executor = QueryExecutor::new(Ok(("SELECT 1".into(), Vec::new())), None);
        assert_eq!(block_on(executor.exec()), Err(PpError::ExecutorMissing));
    }

    #[test]
    fn build_errors_win_over_missing_driver() {
        let executor = QueryExecutor::new(Err(PpError::NoSetValues), None);
        assert_eq!(block_on(executor.exec()), Err(PpError::NoSetValues));
    }

    #[test]
    fn forwards_to_the_driver() {
        let executor = QueryExecutor::new(
            Ok(("SELECT ?".into(), vec![Value::Int(1)])),
            Some(DriverHandle::new(Recorder)),
        );
        assert_eq!(block_on(executor.exec()), Ok(1));
        let rows = block_on(executor.query()).unwrap();
        assert_eq!(rows.downcast::<String>().unwrap(), "SELECT ?");
    }
}
