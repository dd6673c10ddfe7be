use crate::libs::db::Db;
use crate::libs::error::VerifyResult;
use async_trait::async_trait;
use serde::Deserialize;

/// One row of a `DESCRIBE <table>` result.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    #[serde(rename = "Field")]
    pub name: String,
    #[serde(rename = "Type")]
    pub column_type: String,
    #[serde(rename = "Null")]
    pub null: String,
    #[serde(rename = "Key")]
    pub key: Option<String>,
}

impl ColumnInfo {
    /// The describe output reports nullability as `YES` / `NO`.
    pub fn is_nullable(&self) -> bool {
        self.null == "YES"
    }
}

/// One row of `INFORMATION_SCHEMA.KEY_COLUMN_USAGE`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyUsage {
    #[serde(rename = "TABLE_NAME")]
    pub table: String,
    #[serde(rename = "COLUMN_NAME")]
    pub column: String,
    #[serde(rename = "CONSTRAINT_NAME")]
    pub constraint: String,
    #[serde(rename = "REFERENCED_TABLE_NAME")]
    pub referenced_table: Option<String>,
    #[serde(rename = "REFERENCED_COLUMN_NAME")]
    pub referenced_column: Option<String>,
}

/// Narrowing applied to a key-usage lookup, always scoped to one column.
#[derive(Debug, Clone, Copy)]
pub enum KeyFilter<'a> {
    /// Rows belonging to the named constraint (`PRIMARY` for primary keys).
    Constraint(&'a str),
    /// Rows whose foreign key references exactly this table.
    ReferencedTable(&'a str),
    /// Rows referencing any table at all.
    AnyReference,
}

/// Metadata access for one database engine. The validator only talks to this
/// interface, so another engine (or a fake, in tests) can slot in behind it.
#[async_trait]
pub trait Introspect {
    async fn list_databases(&self) -> VerifyResult<Vec<String>>;

    /// Tables visible in the currently scoped database.
    async fn list_tables(&self) -> VerifyResult<Vec<String>>;

    async fn describe_columns(&self, table: &str) -> VerifyResult<Vec<ColumnInfo>>;

    /// Key-usage rows for a single column of `database.table`, narrowed by
    /// `filter`.
    async fn key_constraints_for(
        &self,
        database: &str,
        table: &str,
        column: &str,
        filter: KeyFilter<'_>,
    ) -> VerifyResult<Vec<KeyUsage>>;
}

#[async_trait]
impl<T: Introspect + Sync> Introspect for &T {
    async fn list_databases(&self) -> VerifyResult<Vec<String>> {
        (**self).list_databases().await
    }

    async fn list_tables(&self) -> VerifyResult<Vec<String>> {
        (**self).list_tables().await
    }

    async fn describe_columns(&self, table: &str) -> VerifyResult<Vec<ColumnInfo>> {
        (**self).describe_columns(table).await
    }

    async fn key_constraints_for(
        &self,
        database: &str,
        table: &str,
        column: &str,
        filter: KeyFilter<'_>,
    ) -> VerifyResult<Vec<KeyUsage>> {
        (**self)
            .key_constraints_for(database, table, column, filter)
            .await
    }
}

fn key_usage_sql(filter: KeyFilter<'_>) -> String {
    let mut sql = String::from(
        "SELECT TABLE_NAME, COLUMN_NAME, CONSTRAINT_NAME, \
         REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME \
         FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND COLUMN_NAME = ?",
    );
    match filter {
        KeyFilter::Constraint(_) => sql.push_str(" AND CONSTRAINT_NAME = ?"),
        KeyFilter::ReferencedTable(_) => sql.push_str(" AND REFERENCED_TABLE_NAME = ?"),
        KeyFilter::AnyReference => sql.push_str(" AND REFERENCED_TABLE_NAME IS NOT NULL"),
    }
    sql
}

#[async_trait]
impl Introspect for Db {
    async fn list_databases(&self) -> VerifyResult<Vec<String>> {
        self.fetch_first_column("SHOW DATABASES").await
    }

    async fn list_tables(&self) -> VerifyResult<Vec<String>> {
        self.fetch_first_column("SHOW TABLES").await
    }

    async fn describe_columns(&self, table: &str) -> VerifyResult<Vec<ColumnInfo>> {
        self.fetch_as(&format!("DESCRIBE `{table}`"), &[]).await
    }

    async fn key_constraints_for(
        &self,
        database: &str,
        table: &str,
        column: &str,
        filter: KeyFilter<'_>,
    ) -> VerifyResult<Vec<KeyUsage>> {
        let sql = key_usage_sql(filter);
        let mut binds = vec![database, table, column];
        match filter {
            KeyFilter::Constraint(name) => binds.push(name),
            KeyFilter::ReferencedTable(name) => binds.push(name),
            KeyFilter::AnyReference => {}
        }
        self.fetch_as(&sql, &binds).await
    }
}
