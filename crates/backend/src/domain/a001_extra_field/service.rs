use super::repository::ExtraFieldRepository;
use contracts::domain::a001_extra_field::validation::is_reserved_key;
use contracts::domain::a001_extra_field::{
    EntityType, ExtraField, ExtraFieldParameters, ExtraFieldType,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Field not found")]
    NotFound,
    #[error("Key '{0}' is reserved")]
    ReservedKey(String),
}

/// Список полей категории
pub async fn list(repo: &ExtraFieldRepository, entity_type: EntityType) -> Vec<ExtraField> {
    repo.list(entity_type).await
}

/// Создание или обновление поля
pub async fn upsert(
    repo: &ExtraFieldRepository,
    entity_type: EntityType,
    key: String,
    params: ExtraFieldParameters,
) -> Result<ExtraField, ServiceError> {
    if is_reserved_key(&key) {
        return Err(ServiceError::ReservedKey(key));
    }

    let mut field = ExtraField::from_parameters(entity_type, key, params);
    field.normalize();

    // Валидация
    field.validate().map_err(ServiceError::Validation)?;

    if let Some(existing) = repo.get(entity_type, &field.key).await {
        if existing.field_type != field.field_type {
            return Err(ServiceError::Validation(format!(
                "Field type cannot be changed (is {}, got {})",
                existing.field_type, field.field_type
            )));
        }
    }

    let previous = repo.upsert(field.clone()).await;
    tracing::info!(
        "{} extra field {}.{} ({})",
        if previous.is_some() { "Updated" } else { "Created" },
        entity_type,
        field.key,
        field.field_type
    );
    Ok(field)
}

/// Удаление поля; возвращает оставшиеся поля категории
pub async fn delete(
    repo: &ExtraFieldRepository,
    entity_type: EntityType,
    key: &str,
) -> Result<Vec<ExtraField>, ServiceError> {
    if !repo.delete(entity_type, key).await {
        return Err(ServiceError::NotFound);
    }
    tracing::info!("Deleted extra field {}.{}", entity_type, key);
    Ok(repo.list(entity_type).await)
}

/// Вставка демонстрационных полей
pub async fn insert_seed_data(repo: &ExtraFieldRepository) -> anyhow::Result<()> {
    let data = vec![
        (
            EntityType::Filament,
            "nozzle_temp",
            ExtraFieldParameters {
                name: "Nozzle temperature".into(),
                order: 0,
                unit: Some("°C".into()),
                field_type: ExtraFieldType::IntegerRange,
                default_value: Some("[190,220]".into()),
                ..Default::default()
            },
        ),
        (
            EntityType::Filament,
            "finish",
            ExtraFieldParameters {
                name: "Finish".into(),
                order: 1,
                field_type: ExtraFieldType::Choice,
                default_value: Some("\"matte\"".into()),
                choices: Some(vec!["matte".into(), "glossy".into(), "silk".into()]),
                multi_choice: Some(false),
                ..Default::default()
            },
        ),
        (
            EntityType::Spool,
            "dried",
            ExtraFieldParameters {
                name: "Dried".into(),
                order: 0,
                field_type: ExtraFieldType::Boolean,
                default_value: Some("false".into()),
                ..Default::default()
            },
        ),
        (
            EntityType::Spool,
            "opened_at",
            ExtraFieldParameters {
                name: "Opened at".into(),
                order: 1,
                field_type: ExtraFieldType::DateTime,
                ..Default::default()
            },
        ),
        (
            EntityType::Vendor,
            "website",
            ExtraFieldParameters {
                name: "Website".into(),
                order: 0,
                field_type: ExtraFieldType::Text,
                ..Default::default()
            },
        ),
    ];

    for (entity_type, key, params) in data {
        upsert(repo, entity_type, key.to_string(), params)
            .await
            .map_err(|e| anyhow::anyhow!("Seed field {}.{} rejected: {}", entity_type, key, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(field_type: ExtraFieldType) -> ExtraFieldParameters {
        ExtraFieldParameters {
            name: "Test".into(),
            field_type,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_and_updates() {
        let repo = ExtraFieldRepository::default();
        let created = upsert(&repo, EntityType::Spool, "weight".into(), params(ExtraFieldType::Float))
            .await
            .unwrap();
        assert_eq!(created.key, "weight");

        let mut update = params(ExtraFieldType::Float);
        update.name = "Weight".into();
        update.unit = Some("g".into());
        upsert(&repo, EntityType::Spool, "weight".into(), update).await.unwrap();

        let fields = list(&repo, EntityType::Spool).await;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "Weight");
        assert_eq!(fields[0].unit.as_deref(), Some("g"));
    }

    #[tokio::test]
    async fn test_field_type_is_immutable() {
        let repo = ExtraFieldRepository::default();
        upsert(&repo, EntityType::Spool, "batch".into(), params(ExtraFieldType::Text))
            .await
            .unwrap();
        let result =
            upsert(&repo, EntityType::Spool, "batch".into(), params(ExtraFieldType::Integer)).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reserved_key_rejected() {
        let repo = ExtraFieldRepository::default();
        let result =
            upsert(&repo, EntityType::Spool, "new_field".into(), params(ExtraFieldType::Text)).await;
        assert_eq!(result, Err(ServiceError::ReservedKey("new_field".into())));
        assert!(list(&repo, EntityType::Spool).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_unit_stored_as_absent() {
        let repo = ExtraFieldRepository::default();
        let mut p = params(ExtraFieldType::Integer);
        p.unit = Some(String::new());
        let field = upsert(&repo, EntityType::Filament, "count".into(), p).await.unwrap();
        assert_eq!(field.unit, None);
    }

    #[tokio::test]
    async fn test_unordered_range_default_rejected() {
        let repo = ExtraFieldRepository::default();
        let mut p = params(ExtraFieldType::IntegerRange);
        p.default_value = Some("[210,180]".into());
        let result = upsert(&repo, EntityType::Filament, "bed_temp".into(), p).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_ordered() {
        let repo = ExtraFieldRepository::default();
        let mut b = params(ExtraFieldType::Text);
        b.order = 1;
        upsert(&repo, EntityType::Vendor, "b_field".into(), b).await.unwrap();
        upsert(&repo, EntityType::Vendor, "z_field".into(), params(ExtraFieldType::Text))
            .await
            .unwrap();
        upsert(&repo, EntityType::Spool, "a_field".into(), params(ExtraFieldType::Text))
            .await
            .unwrap();

        let keys: Vec<String> = list(&repo, EntityType::Vendor)
            .await
            .into_iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(keys, vec!["z_field", "b_field"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = ExtraFieldRepository::default();
        upsert(&repo, EntityType::Spool, "a".into(), params(ExtraFieldType::Text))
            .await
            .unwrap();
        upsert(&repo, EntityType::Spool, "b".into(), params(ExtraFieldType::Text))
            .await
            .unwrap();

        let remaining = delete(&repo, EntityType::Spool, "a").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(delete(&repo, EntityType::Spool, "a").await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_seed_data_is_valid() {
        let repo = ExtraFieldRepository::default();
        insert_seed_data(&repo).await.unwrap();
        assert_eq!(list(&repo, EntityType::Filament).await.len(), 2);
        assert_eq!(list(&repo, EntityType::Spool).await.len(), 2);
    }
}
