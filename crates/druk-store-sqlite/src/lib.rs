use druk_core::{async_trait, Error, FieldMap, Filter, Record, Registry, Result, Store, Value};

use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::Arc,
};
use tokio::sync::Mutex;

/// SQLite store driver.
///
/// Each registered entity gets its own table holding the record id plus the
/// field map as a JSON document. `INTEGER PRIMARY KEY AUTOINCREMENT` gives
/// the id guarantee the store contract requires: monotonic, never reused,
/// even across deletes and process restarts.
///
/// rusqlite connections are `Send` but not `Sync`, so the single connection
/// lives behind an async mutex.
#[derive(Debug)]
pub struct SqliteStore {
    registry: Arc<Registry>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and initialize) a database file.
    pub fn open<P: AsRef<Path>>(path: P, registry: Arc<Registry>) -> Result<Self> {
        let conn = Connection::open(path).map_err(wrap)?;
        Self::init(conn, registry)
    }

    /// An in-memory database, mostly for tests.
    pub fn in_memory(registry: Arc<Registry>) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(wrap)?;
        Self::init(conn, registry)
    }

    fn init(conn: Connection, registry: Arc<Registry>) -> Result<Self> {
        for entity in registry.entity_names() {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (\
                     id INTEGER PRIMARY KEY AUTOINCREMENT, \
                     doc TEXT NOT NULL)",
                    table(entity)
                ),
                [],
            )
            .map_err(wrap)?;
        }
        Ok(Self {
            registry,
            conn: Mutex::new(conn),
        })
    }

    fn title(&self, entity: &str) -> String {
        self.registry
            .schema(entity)
            .map(|s| s.title.clone())
            .unwrap_or_else(|_| entity.to_string())
    }

    fn check_entity(&self, entity: &str) -> Result<()> {
        if self.registry.contains(entity) {
            Ok(())
        } else {
            Err(Error::UnknownEntityType(entity.to_string()))
        }
    }
}

/// Quoted table identifier. Entity names come from the registry, never from
/// the request path directly, but quoting keeps hyphenated names valid.
fn table(entity: &str) -> String {
    format!("\"{entity}\"")
}

fn wrap(err: rusqlite::Error) -> Error {
    Error::Store(anyhow::Error::new(err))
}

fn encode(fields: &FieldMap) -> Result<String> {
    serde_json::to_string(fields).map_err(|e| Error::Store(anyhow::Error::new(e)))
}

fn decode(doc: &str) -> Result<FieldMap> {
    serde_json::from_str(doc).map_err(|e| Error::Store(anyhow::Error::new(e)))
}

#[async_trait]
impl Store for SqliteStore {
    async fn list(&self, entity: &str, filter: Option<&Filter>) -> Result<Vec<Record>> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT id, doc FROM {} ORDER BY id", table(entity)))
            .map_err(wrap)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(wrap)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, doc) = row.map_err(wrap)?;
            let fields = decode(&doc)?;
            if filter.map_or(true, |f| f.matches(&fields)) {
                records.push(Record::new(id, fields));
            }
        }
        Ok(records)
    }

    async fn get(&self, entity: &str, id: i64) -> Result<Record> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE id = ?1", table(entity)),
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(wrap)?;
        match doc {
            Some(doc) => Ok(Record::new(id, decode(&doc)?)),
            None => Err(Error::not_found(self.title(entity))),
        }
    }

    async fn insert(&self, entity: &str, fields: FieldMap) -> Result<Record> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        conn.execute(
            &format!("INSERT INTO {} (doc) VALUES (?1)", table(entity)),
            params![encode(&fields)?],
        )
        .map_err(wrap)?;
        Ok(Record::new(conn.last_insert_rowid(), fields))
    }

    async fn insert_many(&self, entity: &str, rows: Vec<FieldMap>) -> Result<usize> {
        self.check_entity(entity)?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(wrap)?;
        let count = rows.len();
        {
            let mut stmt = tx
                .prepare(&format!("INSERT INTO {} (doc) VALUES (?1)", table(entity)))
                .map_err(wrap)?;
            for fields in &rows {
                stmt.execute(params![encode(fields)?]).map_err(wrap)?;
            }
        }
        tx.commit().map_err(wrap)?;
        Ok(count)
    }

    async fn update(&self, entity: &str, id: i64, fields: FieldMap) -> Result<Record> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE id = ?1", table(entity)),
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(wrap)?;
        let Some(doc) = doc else {
            return Err(Error::not_found(self.title(entity)));
        };

        let mut stored = decode(&doc)?;
        for (name, value) in fields {
            stored.insert(name, value);
        }
        conn.execute(
            &format!("UPDATE {} SET doc = ?1 WHERE id = ?2", table(entity)),
            params![encode(&stored)?, id],
        )
        .map_err(wrap)?;
        Ok(Record::new(id, stored))
    }

    async fn delete(&self, entity: &str, id: i64) -> Result<()> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1", table(entity)),
                params![id],
            )
            .map_err(wrap)?;
        if changed == 0 {
            return Err(Error::not_found(self.title(entity)));
        }

        // Reference cleanup: null out fields in other entities that pointed
        // at the deleted record.
        for (ref_entity, ref_field) in self.registry.referencing(entity) {
            let mut dangling = Vec::new();
            {
                let mut stmt = conn
                    .prepare(&format!("SELECT id, doc FROM {}", table(&ref_entity)))
                    .map_err(wrap)?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                    })
                    .map_err(wrap)?;
                for row in rows {
                    let (ref_id, doc) = row.map_err(wrap)?;
                    let mut fields = decode(&doc)?;
                    if fields.get(&ref_field).and_then(Value::as_i64) == Some(id) {
                        fields.insert(ref_field.clone(), Value::Null);
                        dangling.push((ref_id, encode(&fields)?));
                    }
                }
            }
            for (ref_id, doc) in dangling {
                conn.execute(
                    &format!("UPDATE {} SET doc = ?1 WHERE id = ?2", table(&ref_entity)),
                    params![doc, ref_id],
                )
                .map_err(wrap)?;
            }
        }
        Ok(())
    }

    async fn count(&self, entity: &str) -> Result<usize> {
        self.check_entity(entity)?;
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", table(entity)),
                [],
                |row| row.get(0),
            )
            .map_err(wrap)?;
        Ok(count as usize)
    }

    async fn clear_all(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        for entity in self.registry.entity_names() {
            conn.execute(&format!("DELETE FROM {}", table(entity)), [])
                .map_err(wrap)?;
        }
        Ok(())
    }
}
