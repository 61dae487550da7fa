//! Catalog queries for the supported engines

use super::{Column, ForeignKey, TableInfo};
use crate::error::{DbWebFormError, Result};
use crate::scaffold::field_type::SqlType;
use sqlx::{Connection, PgConnection, Row, SqliteConnection};

/// Database engine selected from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// `sqlite:` URLs
    Sqlite,
    /// `postgres:` and `postgresql:` URLs
    Postgres,
}

impl DatabaseKind {
    /// Pick the engine for a connection URL
    ///
    /// # Errors
    ///
    /// Returns [`DbWebFormError::UnsupportedDatabase`] for any other scheme.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase());

        match scheme.as_deref() {
            Some("sqlite") => Ok(Self::Sqlite),
            Some("postgres" | "postgresql") => Ok(Self::Postgres),
            _ => Err(DbWebFormError::UnsupportedDatabase(url.to_string())),
        }
    }
}

/// Reflect one table through a fresh connection
///
/// The connection is closed before returning, whether or not reflection
/// succeeded.
///
/// # Errors
///
/// - [`DbWebFormError::UnsupportedDatabase`] for unknown URL schemes
/// - [`DbWebFormError::Reflection`] when the connection or a catalog query fails
/// - [`DbWebFormError::TableNotFound`] when the catalog has no columns for `table`
pub async fn reflect_table(url: &str, table: &str) -> Result<TableInfo> {
    let kind = DatabaseKind::from_url(url)?;
    tracing::debug!(?kind, table, "Reflecting table");

    let info = match kind {
        DatabaseKind::Sqlite => {
            let mut conn = SqliteConnection::connect(url).await?;
            let result = reflect_sqlite(&mut conn, table).await;
            if let Err(err) = conn.close().await {
                tracing::warn!(%err, "Failed to close SQLite connection");
            }
            result?
        }
        DatabaseKind::Postgres => {
            let mut conn = PgConnection::connect(url).await?;
            let result = reflect_postgres(&mut conn, table).await;
            if let Err(err) = conn.close().await {
                tracing::warn!(%err, "Failed to close PostgreSQL connection");
            }
            result?
        }
    };

    tracing::debug!(
        table,
        columns = info.columns().len(),
        foreign_keys = info.foreign_keys().len(),
        "Reflection complete"
    );
    Ok(info)
}

async fn reflect_sqlite(conn: &mut SqliteConnection, table: &str) -> Result<TableInfo> {
    let rows = sqlx::query(
        r#"SELECT name, type, "notnull", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid"#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    if rows.is_empty() {
        return Err(DbWebFormError::TableNotFound(table.to_string()));
    }

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let declared_type: String = row.try_get("type")?;
        let not_null: i64 = row.try_get("notnull")?;
        let pk: i64 = row.try_get("pk")?;

        columns.push(Column {
            name: row.try_get("name")?,
            max_length: SqlType::character_length(&declared_type),
            declared_type,
            nullable: not_null == 0,
            default: row.try_get("dflt_value")?,
            primary_key: pk > 0,
        });
    }

    let fk_rows = sqlx::query(
        r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    let mut foreign_keys = Vec::with_capacity(fk_rows.len());
    for row in fk_rows {
        let referenced_table: String = row.try_get("table")?;
        let to: Option<String> = row.try_get("to")?;

        // A NULL target means the referenced table's primary key
        let referenced_column = match to {
            Some(column) => column,
            None => sqlite_primary_key(conn, &referenced_table)
                .await?
                .unwrap_or_else(|| "id".to_string()),
        };

        foreign_keys.push(ForeignKey {
            column: row.try_get("from")?,
            referenced_table,
            referenced_column,
        });
    }

    Ok(TableInfo::new(table, columns, foreign_keys))
}

async fn sqlite_primary_key(conn: &mut SqliteConnection, table: &str) -> Result<Option<String>> {
    let name = sqlx::query_scalar::<_, String>(
        "SELECT name FROM pragma_table_info(?1) WHERE pk = 1",
    )
    .bind(table)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(name)
}

const PG_COLUMNS: &str = r"
SELECT column_name::text,
       data_type::text,
       is_nullable::text,
       column_default::text,
       character_maximum_length::int4
FROM information_schema.columns
WHERE table_schema = current_schema() AND table_name = $1
ORDER BY ordinal_position";

const PG_PRIMARY_KEYS: &str = r"
SELECT kcu.column_name::text
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON tc.constraint_name = kcu.constraint_name
 AND tc.table_schema = kcu.table_schema
 AND tc.table_name = kcu.table_name
WHERE tc.constraint_type = 'PRIMARY KEY'
  AND tc.table_schema = current_schema()
  AND tc.table_name = $1";

const PG_FOREIGN_KEYS: &str = r"
SELECT kcu.column_name::text,
       ccu.table_name::text,
       ccu.column_name::text
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON tc.constraint_name = kcu.constraint_name
 AND tc.table_schema = kcu.table_schema
 AND tc.table_name = kcu.table_name
JOIN information_schema.constraint_column_usage ccu
  ON ccu.constraint_name = tc.constraint_name
 AND ccu.table_schema = tc.table_schema
WHERE tc.constraint_type = 'FOREIGN KEY'
  AND tc.table_schema = current_schema()
  AND tc.table_name = $1
ORDER BY kcu.ordinal_position";

type PgColumnRow = (String, String, String, Option<String>, Option<i32>);

async fn reflect_postgres(conn: &mut PgConnection, table: &str) -> Result<TableInfo> {
    let rows: Vec<PgColumnRow> = sqlx::query_as(PG_COLUMNS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;

    if rows.is_empty() {
        return Err(DbWebFormError::TableNotFound(table.to_string()));
    }

    let primary_keys: Vec<String> = sqlx::query_scalar(PG_PRIMARY_KEYS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;

    let columns = rows
        .into_iter()
        .map(|(name, data_type, is_nullable, default, max_length)| Column {
            primary_key: primary_keys.contains(&name),
            name,
            declared_type: data_type,
            nullable: is_nullable.eq_ignore_ascii_case("YES"),
            default,
            max_length: max_length.and_then(|len| u32::try_from(len).ok()),
        })
        .collect();

    let fk_rows: Vec<(String, String, String)> = sqlx::query_as(PG_FOREIGN_KEYS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;

    let foreign_keys = fk_rows
        .into_iter()
        .map(|(column, referenced_table, referenced_column)| ForeignKey {
            column,
            referenced_table,
            referenced_column,
        })
        .collect();

    Ok(TableInfo::new(table, columns, foreign_keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_kind_from_url() {
        assert_eq!(DatabaseKind::from_url("sqlite://app.db").unwrap(), DatabaseKind::Sqlite);
        assert_eq!(DatabaseKind::from_url("sqlite::memory:").unwrap(), DatabaseKind::Sqlite);
        assert_eq!(
            DatabaseKind::from_url("postgres://localhost/app").unwrap(),
            DatabaseKind::Postgres
        );
        assert_eq!(
            DatabaseKind::from_url("PostgreSQL://localhost/app").unwrap(),
            DatabaseKind::Postgres
        );
    }

    #[test]
    fn test_key_queries_join_on_table() {
        for sql in [PG_PRIMARY_KEYS, PG_FOREIGN_KEYS] {
            assert!(sql.contains("AND tc.table_name = kcu.table_name"));
        }
    }

    #[test]
    fn test_unsupported_url() {
        assert!(matches!(
            DatabaseKind::from_url("mysql://localhost/app"),
            Err(DbWebFormError::UnsupportedDatabase(_))
        ));
        assert!(matches!(
            DatabaseKind::from_url("app.db"),
            Err(DbWebFormError::UnsupportedDatabase(_))
        ));
    }

    #[tokio::test]
    async fn test_reflect_memory_table_not_found() {
        let result = reflect_table("sqlite::memory:", "missing").await;
        assert!(matches!(result, Err(DbWebFormError::TableNotFound(t)) if t == "missing"));
    }

    #[tokio::test]
    async fn test_reflect_unopenable_file() {
        let result = reflect_table("sqlite:///definitely/not/here.db", "users").await;
        assert!(matches!(result, Err(DbWebFormError::Reflection(_))));
    }
}
