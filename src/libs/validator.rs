use crate::libs::db::Db;
use crate::libs::error::{VerifyError, VerifyResult};
use crate::libs::expect::{Check, FieldExpectation, RelationExpectation, TableExpectation};
use crate::libs::introspect::{Introspect, KeyFilter};
use serde_json::Value;

/// Checks a live database against declarative expectations, reading only
/// through the [`Introspect`] interface.
pub struct SchemaValidator<I> {
    source: I,
    database: String,
}

impl<I: Introspect> SchemaValidator<I> {
    pub fn new(source: I, database: impl Into<String>) -> Self {
        Self {
            source,
            database: database.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Assert the configured database shows up in the server's listing.
    pub async fn database_exists(&self) -> VerifyResult<()> {
        let databases = self.source.list_databases().await?;
        if databases.iter().any(|d| d == &self.database) {
            Ok(())
        } else {
            Err(VerifyError::MissingDatabase(self.database.clone()))
        }
    }

    /// Assert the table shows up in the scoped database's listing.
    pub async fn table_exists(&self, table: &str) -> VerifyResult<()> {
        let tables = self.source.list_tables().await?;
        if tables.iter().any(|t| t == table) {
            Ok(())
        } else {
            Err(VerifyError::MissingTable(table.to_string()))
        }
    }

    /// Check each descriptor against the live column metadata. Only the
    /// properties set on a descriptor are compared; the first mismatch
    /// aborts the remaining checks.
    pub async fn validate_fields(
        &self,
        table: &str,
        expected: &[FieldExpectation],
    ) -> VerifyResult<()> {
        let columns = self.source.describe_columns(table).await?;

        for descriptor in expected {
            let column = columns
                .iter()
                .find(|c| c.name == descriptor.name)
                .ok_or_else(|| VerifyError::MissingColumn {
                    table: table.to_string(),
                    column: descriptor.name.to_string(),
                })?;

            for check in descriptor.checks() {
                match check {
                    Check::Type => {
                        if let Some(fragment) = descriptor.type_contains {
                            if !type_matches(&column.column_type, fragment) {
                                return Err(VerifyError::TypeMismatch {
                                    table: table.to_string(),
                                    column: descriptor.name.to_string(),
                                    expected: fragment.to_string(),
                                    actual: column.column_type.clone(),
                                });
                            }
                        }
                    }
                    Check::PrimaryKey => {
                        if let Some(expected_pk) = descriptor.primary_key {
                            let rows = self
                                .source
                                .key_constraints_for(
                                    &self.database,
                                    table,
                                    descriptor.name,
                                    KeyFilter::Constraint("PRIMARY"),
                                )
                                .await?;
                            let actual = !rows.is_empty();
                            if actual != expected_pk {
                                return Err(VerifyError::PrimaryKeyMismatch {
                                    table: table.to_string(),
                                    column: descriptor.name.to_string(),
                                    expected: expected_pk,
                                    actual,
                                });
                            }
                        }
                    }
                    Check::ForeignKey => {
                        if let Some(expected_fk) = descriptor.foreign_key {
                            self.check_foreign_key(table, descriptor, expected_fk)
                                .await?;
                        }
                    }
                    Check::Nullability => {
                        if let Some(expected_null) = descriptor.nullable {
                            let actual = column.is_nullable();
                            if actual != expected_null {
                                return Err(VerifyError::NullabilityMismatch {
                                    table: table.to_string(),
                                    column: descriptor.name.to_string(),
                                    expected: expected_null,
                                    actual,
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Expecting a foreign key narrows the lookup to the declared target, so
    /// a key to some other table does not satisfy it. Expecting none means no
    /// referencing row at all, whatever table it would point to.
    async fn check_foreign_key(
        &self,
        table: &str,
        descriptor: &FieldExpectation,
        expected_fk: bool,
    ) -> VerifyResult<()> {
        let filter = match (expected_fk, descriptor.references) {
            (true, Some(target)) => KeyFilter::ReferencedTable(target),
            _ => KeyFilter::AnyReference,
        };
        let rows = self
            .source
            .key_constraints_for(&self.database, table, descriptor.name, filter)
            .await?;

        if expected_fk && rows.is_empty() {
            return Err(VerifyError::ForeignKeyMismatch {
                table: table.to_string(),
                column: descriptor.name.to_string(),
                detail: match descriptor.references {
                    Some(target) => format!("no foreign key referencing `{target}`"),
                    None => "no foreign key found".to_string(),
                },
            });
        }
        if !expected_fk && !rows.is_empty() {
            return Err(VerifyError::ForeignKeyMismatch {
                table: table.to_string(),
                column: descriptor.name.to_string(),
                detail: format!(
                    "unexpected foreign key referencing `{}`",
                    rows[0].referenced_table.as_deref().unwrap_or("?")
                ),
            });
        }
        Ok(())
    }

    /// Existence plus full field validation in one call.
    pub async fn validate_table(&self, expectation: &TableExpectation) -> VerifyResult<()> {
        self.table_exists(expectation.name).await?;
        self.validate_fields(expectation.name, &expectation.fields)
            .await
    }
}

/// The live type string just has to contain the expected fragment, so
/// `smallint` accepts a column reported as `smallint(6)`.
pub fn type_matches(actual: &str, fragment: &str) -> bool {
    actual.contains(fragment)
}

// -------- Seed-data relations --------

/// Run a join query bound on the expectation's natural key and assert the
/// result names match exactly. The query must select one column aliased
/// `name`, already lowercased.
pub async fn validate_relation(
    db: &Db,
    sql: &str,
    expectation: &RelationExpectation,
) -> VerifyResult<()> {
    let rows = db.fetch_json(sql, &[expectation.key]).await?;
    let actual: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    assert_names(expectation.key, expectation.related, actual)
}

/// Fetch every `name` a query produces and assert the full expected set is
/// there, nothing more.
pub async fn validate_name_list(db: &Db, sql: &str, expected: &[&str]) -> VerifyResult<()> {
    let rows = db.fetch_json(sql, &[]).await?;
    let actual: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    assert_names("name list", expected, actual)
}

fn assert_names(key: &str, expected: &[&str], actual: Vec<String>) -> VerifyResult<()> {
    let complete =
        actual.len() == expected.len() && expected.iter().all(|e| actual.iter().any(|a| a == e));
    if complete {
        Ok(())
    } else {
        Err(VerifyError::RelationMismatch {
            key: key.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::expect::field;
    use crate::libs::introspect::{ColumnInfo, KeyUsage};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory stand-in for a live server, with a counter on key-usage
    /// lookups so tests can assert which metadata queries were issued.
    #[derive(Default)]
    struct FakeServer {
        databases: Vec<String>,
        tables: Vec<String>,
        columns: HashMap<String, Vec<ColumnInfo>>,
        keys: Vec<KeyUsage>,
        key_queries: AtomicUsize,
    }

    impl FakeServer {
        fn with_column(mut self, table: &str, name: &str, ty: &str, null: &str) -> Self {
            self.columns.entry(table.to_string()).or_default().push(ColumnInfo {
                name: name.to_string(),
                column_type: ty.to_string(),
                null: null.to_string(),
                key: Some(String::new()),
            });
            self
        }

        fn with_primary_key(mut self, table: &str, column: &str) -> Self {
            self.keys.push(KeyUsage {
                table: table.to_string(),
                column: column.to_string(),
                constraint: "PRIMARY".to_string(),
                referenced_table: None,
                referenced_column: None,
            });
            self
        }

        fn with_foreign_key(mut self, table: &str, column: &str, target: &str) -> Self {
            self.keys.push(KeyUsage {
                table: table.to_string(),
                column: column.to_string(),
                constraint: format!("{table}_ibfk_{column}"),
                referenced_table: Some(target.to_string()),
                referenced_column: Some("id".to_string()),
            });
            self
        }
    }

    #[async_trait]
    impl Introspect for FakeServer {
        async fn list_databases(&self) -> VerifyResult<Vec<String>> {
            Ok(self.databases.clone())
        }

        async fn list_tables(&self) -> VerifyResult<Vec<String>> {
            Ok(self.tables.clone())
        }

        async fn describe_columns(&self, table: &str) -> VerifyResult<Vec<ColumnInfo>> {
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        }

        async fn key_constraints_for(
            &self,
            _database: &str,
            table: &str,
            column: &str,
            filter: KeyFilter<'_>,
        ) -> VerifyResult<Vec<KeyUsage>> {
            self.key_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .keys
                .iter()
                .filter(|k| k.table == table && k.column == column)
                .filter(|k| match filter {
                    KeyFilter::Constraint(name) => k.constraint == name,
                    KeyFilter::ReferencedTable(name) => {
                        k.referenced_table.as_deref() == Some(name)
                    }
                    KeyFilter::AnyReference => k.referenced_table.is_some(),
                })
                .cloned()
                .collect())
        }
    }

    fn validator(server: FakeServer) -> SchemaValidator<FakeServer> {
        SchemaValidator::new(server, "music_store")
    }

    #[tokio::test]
    async fn database_exists_checks_the_listing() {
        let mut server = FakeServer::default();
        server.databases = vec!["mysql".into(), "information_schema".into()];
        let v = validator(server);
        assert!(matches!(
            v.database_exists().await,
            Err(VerifyError::MissingDatabase(_))
        ));

        let mut server = FakeServer::default();
        server.databases = vec!["mysql".into(), "music_store".into()];
        let v = validator(server);
        assert!(v.database_exists().await.is_ok());
    }

    #[tokio::test]
    async fn table_exists_checks_the_listing() {
        let mut server = FakeServer::default();
        server.tables = vec!["artist".into(), "album".into()];
        let v = validator(server);
        assert!(v.table_exists("artist").await.is_ok());
        assert!(matches!(
            v.table_exists("payment").await,
            Err(VerifyError::MissingTable(_))
        ));
    }

    #[tokio::test]
    async fn type_fragment_matches_by_containment() {
        let server = FakeServer::default().with_column("album", "release_year", "smallint(6)", "YES");
        let v = validator(server);

        let ok = v
            .validate_fields("album", &[field("release_year").of_type("smallint")])
            .await;
        assert!(ok.is_ok());

        let err = v
            .validate_fields("album", &[field("release_year").of_type("bigint")])
            .await;
        assert!(matches!(err, Err(VerifyError::TypeMismatch { .. })));
    }

    #[tokio::test]
    async fn missing_column_fails_before_any_property_check() {
        let server = FakeServer::default().with_column("artist", "id", "bigint(20)", "NO");
        let v = validator(server);
        let err = v.validate_fields("artist", &[field("nope")]).await;
        assert!(matches!(err, Err(VerifyError::MissingColumn { .. })));
    }

    #[tokio::test]
    async fn omitted_properties_issue_no_key_metadata_queries() {
        let server = FakeServer::default().with_column("artist", "id", "bigint(20)", "NO");
        let v = validator(server);
        v.validate_fields("artist", &[field("id").of_type("bigint").nullable(false)])
            .await
            .unwrap();
        assert_eq!(v.source.key_queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn composite_primary_key_validates_per_column() {
        let server = FakeServer::default()
            .with_column("song_artist", "id_song", "bigint(20)", "NO")
            .with_column("song_artist", "id_artist", "bigint(20)", "NO")
            .with_primary_key("song_artist", "id_song")
            .with_primary_key("song_artist", "id_artist");
        let v = validator(server);
        v.validate_fields(
            "song_artist",
            &[
                field("id_song").primary_key(true),
                field("id_artist").primary_key(true),
            ],
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn primary_key_flag_false_rejects_a_keyed_column() {
        let server = FakeServer::default()
            .with_column("artist", "id", "bigint(20)", "NO")
            .with_primary_key("artist", "id");
        let v = validator(server);
        let err = v
            .validate_fields("artist", &[field("id").primary_key(false)])
            .await;
        assert!(matches!(err, Err(VerifyError::PrimaryKeyMismatch { .. })));
    }

    #[tokio::test]
    async fn foreign_key_to_wrong_target_fails_even_with_another_key_present() {
        let server = FakeServer::default()
            .with_column("playlist", "id_user", "bigint(20)", "NO")
            .with_foreign_key("playlist", "id_user", "user");
        let v = validator(server);

        let ok = v
            .validate_fields("playlist", &[field("id_user").foreign_key_to("user")])
            .await;
        assert!(ok.is_ok());

        let err = v
            .validate_fields("playlist", &[field("id_user").foreign_key_to("artist")])
            .await;
        assert!(matches!(err, Err(VerifyError::ForeignKeyMismatch { .. })));
    }

    #[tokio::test]
    async fn no_foreign_key_rejects_any_reference() {
        let server = FakeServer::default()
            .with_column("playlist", "id_user", "bigint(20)", "NO")
            .with_foreign_key("playlist", "id_user", "user");
        let v = validator(server);
        let err = v
            .validate_fields("playlist", &[field("id_user").no_foreign_key()])
            .await;
        assert!(matches!(err, Err(VerifyError::ForeignKeyMismatch { .. })));

        let server = FakeServer::default().with_column("artist", "name", "varchar(255)", "NO");
        let v = validator(server);
        v.validate_fields("artist", &[field("name").no_foreign_key()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn nullability_compares_the_describe_flag() {
        let server = FakeServer::default()
            .with_column("album", "title", "varchar(255)", "NO")
            .with_column("album", "release_year", "smallint(6)", "YES");
        let v = validator(server);
        v.validate_fields(
            "album",
            &[
                field("title").nullable(false),
                field("release_year").nullable(true),
            ],
        )
        .await
        .unwrap();

        let err = v
            .validate_fields("album", &[field("title").nullable(true)])
            .await;
        assert!(matches!(err, Err(VerifyError::NullabilityMismatch { .. })));
    }

    #[test]
    fn assert_names_requires_exact_cardinality() {
        let err = assert_names("queen", &["jazz"], vec!["jazz".into(), "jazz".into()]);
        assert!(matches!(err, Err(VerifyError::RelationMismatch { .. })));

        assert_names("queen", &["jazz", "sheer heart attack"], vec![
            "sheer heart attack".into(),
            "jazz".into(),
        ])
        .unwrap();
    }
}
