use crate::{
    db::{
        filter::OrderDirection,
        memory::MemoryStore,
        session::{Query, Session, Tuple},
    },
    error::InternalError,
    expr::{FieldPath, eval},
    model::{FieldKind, MetadataProvider},
    value::{EntityRef, Key, Value, canonical_cmp},
};
use std::{cmp::Ordering, collections::BTreeMap};
use tracing::trace;

///
/// MemorySession
///
/// Request-scoped view over a `MemoryStore`. Every instance it returns is a
/// tracked copy registered in an identity map, so one row is materialized
/// at most once per session. Associations outside the query's fetch joins
/// come back as lazy proxies; collections come back unset.
///

pub struct MemorySession<'a> {
    store: &'a MemoryStore,
    identity: BTreeMap<(&'static str, Key), EntityRef>,
    executed: Vec<Query>,
}

impl<'a> MemorySession<'a> {
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self {
            store,
            identity: BTreeMap::new(),
            executed: Vec::new(),
        }
    }

    /// Queries executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> &[Query] {
        &self.executed
    }

    #[must_use]
    pub fn query_count(&self) -> usize {
        self.executed.len()
    }

    /// Tracked instance for `(entity, key)`, if this session handed one out.
    #[must_use]
    pub fn tracked(&self, entity: &'static str, key: &Key) -> Option<&EntityRef> {
        self.identity.get(&(entity, key.clone()))
    }

    // Stored rows matching the query, ordered and windowed.
    fn select(&mut self, query: &Query) -> Result<Vec<EntityRef>, InternalError> {
        self.executed.push(query.clone());
        trace!(
            entity = query.entity.entity_name,
            predicate = ?query.predicate,
            "executing query"
        );

        let mut matched = self.filter_rows(query)?;
        sort_rows(&mut matched, query)?;

        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);

        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    fn filter_rows(&self, query: &Query) -> Result<Vec<EntityRef>, InternalError> {
        let name = query.entity.entity_name;
        if self.store.models().model(name).is_none() {
            return Err(InternalError::store_not_found(name));
        }

        let mut matched = Vec::new();
        for row in self.store.rows(name) {
            let keep = eval(row, &query.predicate, &query.bindings)
                .map_err(|err| InternalError::session_internal(err.to_string()))?;
            if keep {
                matched.push(row.clone());
            }
        }

        Ok(matched)
    }

    // Tracked copy of a stored row; `joins` are paths relative to the row.
    fn materialize(
        &mut self,
        stored: &EntityRef,
        joins: &[FieldPath],
        prefix: Option<&FieldPath>,
    ) -> Result<EntityRef, InternalError> {
        let model = stored.model();
        let key = stored.key().ok_or_else(|| {
            InternalError::store_invariant(format!(
                "stored '{}' row has no key",
                model.entity_name
            ))
        })?;

        let instance = self
            .identity
            .entry((model.entity_name, key))
            .or_insert_with(|| {
                let instance = EntityRef::new(model);
                instance.set_tracked(true);
                instance
            })
            .clone();

        stored.copy_scalars_into(&instance)?;
        instance.mark_loaded();

        for field in model.fields {
            if !matches!(field.kind, FieldKind::Relation { .. }) {
                continue;
            }

            let field_path =
                prefix.map_or_else(|| FieldPath::new(field.name), |p| p.child(field.name));
            let value = match stored.value(field.name) {
                Value::Entity(target) => {
                    let joined = joins.iter().any(|join| join == &field_path);
                    let attached = if joined {
                        self.materialize(&target, joins, Some(&field_path))?
                    } else {
                        self.proxy_for(&target)?
                    };
                    Value::Entity(attached)
                }
                _ => Value::Null,
            };
            instance.set(field.name, value)?;
        }

        Ok(instance)
    }

    // Tracked instance for a stored row, creating a lazy proxy if needed.
    fn proxy_for(&mut self, stored: &EntityRef) -> Result<EntityRef, InternalError> {
        let model = stored.model();
        let key = stored.key().ok_or_else(|| {
            InternalError::store_invariant(format!(
                "stored '{}' row has no key",
                model.entity_name
            ))
        })?;

        if let Some(existing) = self.identity.get(&(model.entity_name, key.clone())) {
            return Ok(existing.clone());
        }

        let proxy = EntityRef::proxy(model, stored.key_value())?;
        proxy.set_tracked(true);
        self.identity.insert((model.entity_name, key), proxy.clone());

        Ok(proxy)
    }

    // Projection values: entities are handed out as tracked instances.
    fn attach(&mut self, value: Value) -> Result<Value, InternalError> {
        match value {
            Value::Entity(stored) => Ok(Value::Entity(self.proxy_for(&stored)?)),
            other => Ok(other),
        }
    }
}

impl Session for MemorySession<'_> {
    fn metadata(&self) -> &dyn MetadataProvider {
        self.store.models()
    }

    fn fetch(&mut self, query: &Query) -> Result<Vec<EntityRef>, InternalError> {
        let rows = self.select(query)?;

        rows.iter()
            .map(|row| self.materialize(row, &query.fetch_joins, None))
            .collect()
    }

    fn fetch_tuples(
        &mut self,
        query: &Query,
        columns: &[FieldPath],
    ) -> Result<Vec<Tuple>, InternalError> {
        let rows = self.select(query)?;

        let mut tuples = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = Vec::with_capacity(columns.len());
            for column in columns {
                let value = row.value_at(column.as_str())?;
                values.push(self.attach(value)?);
            }
            tuples.push(Tuple::new(values));
        }

        Ok(tuples)
    }

    fn count(&mut self, query: &Query) -> Result<u64, InternalError> {
        self.executed.push(query.clone());
        let matched = self.filter_rows(query)?;

        Ok(u64::try_from(matched.len()).unwrap_or(u64::MAX))
    }

    fn detach(&mut self, entity: &EntityRef) {
        entity.set_tracked(false);
        self.identity.retain(|_, tracked| !tracked.ptr_eq(entity));
    }

    fn write_field(
        &mut self,
        entity: &EntityRef,
        field: &str,
        value: Value,
    ) -> Result<(), InternalError> {
        let model = entity.model();
        if entity.is_tracked()
            && model.is_orphan_removal(field)
            && !entity.value(field).is_null()
        {
            return Err(InternalError::session_conflict(format!(
                "orphan-removal collection '{}.{field}' cannot be replaced on a tracked instance",
                model.entity_name
            )));
        }

        entity.set(field, value)
    }
}

// Stable sort by the query's order specs.
fn sort_rows(rows: &mut [EntityRef], query: &Query) -> Result<(), InternalError> {
    if query.order.is_empty() {
        return Ok(());
    }

    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        let mut sort_values = Vec::with_capacity(query.order.len());
        for spec in &query.order {
            sort_values.push(row.value_at(spec.path.as_str())?);
        }
        keyed.push((sort_values, row.clone()));
    }

    keyed.sort_by(|(left, _), (right, _)| {
        for ((l, r), spec) in left.iter().zip(right).zip(&query.order) {
            let ordering = match spec.direction {
                OrderDirection::Asc => canonical_cmp(l, r),
                OrderDirection::Desc => canonical_cmp(r, l),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }

    Ok(())
}
