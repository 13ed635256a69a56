use crate::entities::*;
use crate::error::CatalogError;
use crate::validation::{Validate, ValidationErrors};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Payload accepted when creating or replacing a good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GoodIn {
    /// Title, at most 32 characters
    pub title: String,
    /// Description, at most 256 characters
    pub description: String,
    /// Price, at least 1
    pub price: f64,
}

impl Validate for GoodIn {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check_max_len("title", &self.title, 32)
            .check_max_len("description", &self.description, 256)
            .check_min("price", self.price, 1.0);
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Good {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl Good {
    pub fn new(id: i32, input: GoodIn) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            price: input.price,
        }
    }
}

impl From<good::Model> for Good {
    fn from(model: good::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
        }
    }
}

impl From<GoodIn> for good::ActiveModel {
    fn from(input: GoodIn) -> Self {
        good::ActiveModel {
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            price: ActiveValue::Set(input.price),
            ..Default::default()
        }
    }
}

pub struct GoodService<'a> {
    db: &'a DatabaseConnection,
}

impl GoodService<'_> {
    pub fn new(db: &DatabaseConnection) -> GoodService<'_> {
        GoodService { db }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Good>, CatalogError> {
        let goods = good::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Good::from)
            .collect();
        Ok(goods)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Good, CatalogError> {
        let model = good::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                resource: "good",
                id,
            })?;
        Ok(Good::from(model))
    }

    /// Creates a new good after validating the input.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: GoodIn) -> Result<Good, CatalogError> {
        input.validate()?;
        let created_model = good::ActiveModel::from(input).insert(self.db).await?;
        Ok(Good::from(created_model))
    }

    /// Replaces every field of the good with the given ID and echoes the input back.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, input: GoodIn) -> Result<Good, CatalogError> {
        input.validate()?;
        let result = good::Entity::update_many()
            .set(good::ActiveModel::from(input.clone()))
            .filter(good::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!("Update of good {} matched no rows", id);
        }
        Ok(Good::new(id, input))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        good::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
