use crate::entities::*;
use crate::error::CatalogError;
use crate::validation::{Validate, ValidationErrors};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Payload accepted when creating or replacing an order.
///
/// `date` must be an ISO 8601 timestamp, with or without an offset, and
/// `status` a JSON boolean; both are enforced while deserializing the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderIn {
    /// Timestamp of the order; values without an offset are read as UTC
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<FixedOffset>,
    pub status: bool,
    /// ID of the ordering user
    pub user_id: i32,
    /// ID of the ordered good
    pub goods_id: i32,
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp, falling back to a zone-less one taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date);
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp `{value}`"))
    })
}

impl Validate for OrderIn {
    fn validate(&self) -> Result<(), ValidationErrors> {
        // Every constraint on an order is a type constraint.
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub date: DateTime<FixedOffset>,
    pub status: bool,
    pub user_id: i32,
    pub goods_id: i32,
}

impl Order {
    pub fn new(id: i32, input: OrderIn) -> Self {
        Self {
            id,
            date: input.date,
            status: input.status,
            user_id: input.user_id,
            goods_id: input.goods_id,
        }
    }
}

impl From<order::Model> for Order {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            status: model.status,
            user_id: model.user_id,
            goods_id: model.goods_id,
        }
    }
}

impl From<OrderIn> for order::ActiveModel {
    fn from(input: OrderIn) -> Self {
        order::ActiveModel {
            date: ActiveValue::Set(input.date),
            status: ActiveValue::Set(input.status),
            user_id: ActiveValue::Set(input.user_id),
            goods_id: ActiveValue::Set(input.goods_id),
            ..Default::default()
        }
    }
}

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl OrderService<'_> {
    pub fn new(db: &DatabaseConnection) -> OrderService<'_> {
        OrderService { db }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Order>, CatalogError> {
        let orders = order::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Order::from)
            .collect();
        Ok(orders)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Order, CatalogError> {
        let model = order::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                resource: "order",
                id,
            })?;
        Ok(Order::from(model))
    }

    /// Creates a new order and echoes the input under the assigned ID, the same
    /// way `update` does, so the caller's offset is preserved.
    ///
    /// Unknown `user_id` or `goods_id` values surface as
    /// `CatalogError::ForeignKeyViolation` when the database enforces foreign keys.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: OrderIn) -> Result<Order, CatalogError> {
        input.validate()?;
        let created_model = order::ActiveModel::from(input.clone())
            .insert(self.db)
            .await?;
        Ok(Order::new(created_model.id, input))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, input: OrderIn) -> Result<Order, CatalogError> {
        input.validate()?;
        let result = order::Entity::update_many()
            .set(order::ActiveModel::from(input.clone()))
            .filter(order::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!("Update of order {} matched no rows", id);
        }
        Ok(Order::new(id, input))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        order::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
