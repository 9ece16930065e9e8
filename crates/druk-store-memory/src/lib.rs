use druk_core::{async_trait, Error, FieldMap, Filter, Record, Registry, Result, Store, Value};

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store driver. Each registered entity gets its own table with a
/// monotonic id counter; the counter survives deletes so ids are never
/// reused within a process.
#[derive(Debug)]
pub struct MemoryStore {
    registry: Arc<Registry>,
    tables: RwLock<IndexMap<String, Table>>,
}

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: IndexMap<i64, FieldMap>,
}

impl Table {
    fn insert(&mut self, fields: FieldMap) -> Record {
        self.next_id += 1;
        let id = self.next_id;
        self.rows.insert(id, fields.clone());
        Record::new(id, fields)
    }
}

impl MemoryStore {
    pub fn new(registry: Arc<Registry>) -> Self {
        let tables = registry
            .entity_names()
            .map(|name| (name.to_string(), Table::default()))
            .collect();
        Self {
            registry,
            tables: RwLock::new(tables),
        }
    }

    fn title(&self, entity: &str) -> String {
        self.registry
            .schema(entity)
            .map(|s| s.title.clone())
            .unwrap_or_else(|_| entity.to_string())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list(&self, entity: &str, filter: Option<&Filter>) -> Result<Vec<Record>> {
        let tables = self.tables.read().await;
        let table = lookup(&tables, entity)?;
        Ok(table
            .rows
            .iter()
            .filter(|(_, fields)| filter.map_or(true, |f| f.matches(fields)))
            .map(|(id, fields)| Record::new(*id, fields.clone()))
            .collect())
    }

    async fn get(&self, entity: &str, id: i64) -> Result<Record> {
        let tables = self.tables.read().await;
        let table = lookup(&tables, entity)?;
        table
            .rows
            .get(&id)
            .map(|fields| Record::new(id, fields.clone()))
            .ok_or_else(|| Error::not_found(self.title(entity)))
    }

    async fn insert(&self, entity: &str, fields: FieldMap) -> Result<Record> {
        let mut tables = self.tables.write().await;
        let table = lookup_mut(&mut tables, entity)?;
        Ok(table.insert(fields))
    }

    async fn insert_many(&self, entity: &str, rows: Vec<FieldMap>) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let table = lookup_mut(&mut tables, entity)?;
        let count = rows.len();
        for fields in rows {
            table.insert(fields);
        }
        Ok(count)
    }

    async fn update(&self, entity: &str, id: i64, fields: FieldMap) -> Result<Record> {
        let mut tables = self.tables.write().await;
        let table = lookup_mut(&mut tables, entity)?;
        let Some(stored) = table.rows.get_mut(&id) else {
            return Err(Error::not_found(self.title(entity)));
        };
        for (name, value) in fields {
            stored.insert(name, value);
        }
        let fields = stored.clone();
        Ok(Record::new(id, fields))
    }

    async fn delete(&self, entity: &str, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        {
            let table = lookup_mut(&mut tables, entity)?;
            if table.rows.shift_remove(&id).is_none() {
                return Err(Error::not_found(self.title(entity)));
            }
        }

        // Reference cleanup: null out fields in other entities that pointed
        // at the deleted record.
        for (ref_entity, ref_field) in self.registry.referencing(entity) {
            if let Some(table) = tables.get_mut(&ref_entity) {
                for fields in table.rows.values_mut() {
                    if fields.get(&ref_field).and_then(Value::as_i64) == Some(id) {
                        fields.insert(ref_field.clone(), Value::Null);
                    }
                }
            }
        }
        Ok(())
    }

    async fn count(&self, entity: &str) -> Result<usize> {
        let tables = self.tables.read().await;
        Ok(lookup(&tables, entity)?.rows.len())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        for table in tables.values_mut() {
            table.rows.clear();
        }
        Ok(())
    }
}

fn lookup<'a>(tables: &'a IndexMap<String, Table>, entity: &str) -> Result<&'a Table> {
    tables
        .get(entity)
        .ok_or_else(|| Error::UnknownEntityType(entity.to_string()))
}

fn lookup_mut<'a>(tables: &'a mut IndexMap<String, Table>, entity: &str) -> Result<&'a mut Table> {
    tables
        .get_mut(entity)
        .ok_or_else(|| Error::UnknownEntityType(entity.to_string()))
}
