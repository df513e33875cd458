use crate::dataset::{DeleteDataset, InsertDataset, SelectDataset, TruncateDataset, UpdateDataset};
use crate::dialect::{Dialect, get_dialect};
use crate::exec::DriverHandle;
use crate::exp::{IntoExprs, IntoTable};

/// Dataset constructors bound to one dialect and, optionally, one driver.
///
/// ```ignore
/// let pg = pp::dialect("postgres");
/// let (sql, args) = pg.from("users").where_(pp::c("id").eq(1)).build()?;
/// ```
#[derive(Debug, Clone)]
pub struct DialectWrapper {
    dialect: Dialect,
    driver: Option<DriverHandle>,
}

impl DialectWrapper {
    /// Wrapper for the dialect registered under `name`, or the default one.
    pub fn new(name: &str) -> Self {
        Self {
            dialect: get_dialect(name),
            driver: None,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Copy that binds `driver` to every dataset it creates.
    pub fn db(&self, driver: impl Into<DriverHandle>) -> Self {
        Self {
            dialect: self.dialect.clone(),
            driver: Some(driver.into()),
        }
    }

    fn select_dataset(&self) -> SelectDataset {
        let ds = SelectDataset::new(self.dialect.clone());
        match &self.driver {
            Some(driver) => ds.with_driver(driver.clone()),
            None => ds,
        }
    }

    /// `SELECT * FROM tables`
    pub fn from(&self, tables: impl IntoExprs) -> SelectDataset {
        self.select_dataset().from(tables)
    }

    /// `SELECT cols` without a FROM clause.
    pub fn select(&self, cols: impl IntoExprs) -> SelectDataset {
        self.select_dataset().select(cols)
    }

    pub fn insert(&self, table: impl IntoTable) -> InsertDataset {
        let ds = InsertDataset::new(self.dialect.clone()).into_(table);
        match &self.driver {
            Some(driver) => ds.with_driver(driver.clone()),
            None => ds,
        }
    }

    pub fn update(&self, table: impl IntoTable) -> UpdateDataset {
        let ds = UpdateDataset::new(self.dialect.clone()).table(table);
        match &self.driver {
            Some(driver) => ds.with_driver(driver.clone()),
            None => ds,
        }
    }

    pub fn delete(&self, table: impl IntoTable) -> DeleteDataset {
        let ds = DeleteDataset::new(self.dialect.clone()).from(table);
        match &self.driver {
            Some(driver) => ds.with_driver(driver.clone()),
            None => ds,
        }
    }

    pub fn truncate(&self, tables: impl IntoExprs) -> TruncateDataset {
        let ds = TruncateDataset::new(self.dialect.clone()).table(tables);
        match &self.driver {
            Some(driver) => ds.with_driver(driver.clone()),
            None => ds,
        }
    }
}
