use contracts::domain::a001_extra_field::{EntityType, ExtraField};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type FieldMap = BTreeMap<(EntityType, String), ExtraField>;

/// In-memory field store keyed by `(entity_type, key)`
#[derive(Clone, Default)]
pub struct ExtraFieldRepository {
    fields: Arc<RwLock<FieldMap>>,
}

impl ExtraFieldRepository {
    /// Fields of one entity category ordered by `(order, key)`
    pub async fn list(&self, entity_type: EntityType) -> Vec<ExtraField> {
        let fields = self.fields.read().await;
        let mut items: Vec<ExtraField> = fields
            .values()
            .filter(|f| f.entity_type == entity_type)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
        items
    }

    pub async fn get(&self, entity_type: EntityType, key: &str) -> Option<ExtraField> {
        self.fields
            .read()
            .await
            .get(&(entity_type, key.to_string()))
            .cloned()
    }

    /// Insert or replace; returns the previous value
    pub async fn upsert(&self, field: ExtraField) -> Option<ExtraField> {
        self.fields
            .write()
            .await
            .insert((field.entity_type, field.key.clone()), field)
    }

    pub async fn delete(&self, entity_type: EntityType, key: &str) -> bool {
        self.fields
            .write()
            .await
            .remove(&(entity_type, key.to_string()))
            .is_some()
    }
}
