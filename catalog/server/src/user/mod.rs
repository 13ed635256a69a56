use crate::entities::*;
use crate::error::CatalogError;
use crate::validation::{Validate, ValidationErrors};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Payload accepted when creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserIn {
    /// First name, at most 32 characters
    pub first_name: String,
    /// Second name, at most 32 characters
    pub second_name: String,
    /// Email address, at most 128 characters
    pub email: String,
    /// Password, at most 128 characters, stored as given
    pub password: String,
}

impl Validate for UserIn {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check_max_len("first_name", &self.first_name, 32)
            .check_max_len("second_name", &self.second_name, 32)
            .check_email("email", &self.email)
            .check_max_len("email", &self.email, 128)
            .check_max_len("password", &self.password, 128);
        errors.finish()
    }
}

/// A stored user together with its database-assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier assigned by the database
    pub id: i32,
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(id: i32, input: UserIn) -> Self {
        Self {
            id,
            first_name: input.first_name,
            second_name: input.second_name,
            email: input.email,
            password: input.password,
        }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            second_name: model.second_name,
            email: model.email,
            password: model.password,
        }
    }
}

impl From<UserIn> for user::ActiveModel {
    fn from(input: UserIn) -> Self {
        user::ActiveModel {
            first_name: ActiveValue::Set(input.first_name),
            second_name: ActiveValue::Set(input.second_name),
            email: ActiveValue::Set(input.email),
            password: ActiveValue::Set(input.password),
            ..Default::default()
        }
    }
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl UserService<'_> {
    pub fn new(db: &DatabaseConnection) -> UserService<'_> {
        UserService { db }
    }

    /// Retrieves all users from the database.
    ///
    /// # Returns
    ///
    /// A `Result` containing every stored `User`, in whatever order the database yields them.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, CatalogError> {
        let users = user::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(users)
    }

    /// Retrieves a user by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the user to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `User`, or `CatalogError::NotFound` if no row has that ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<User, CatalogError> {
        let model = user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                resource: "user",
                id,
            })?;
        Ok(User::from(model))
    }

    /// Creates a new user after validating the input.
    ///
    /// # Arguments
    ///
    /// * `input` - The user fields; the ID is assigned by the database.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `User` if successful, or an error otherwise.
    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: UserIn) -> Result<User, CatalogError> {
        input.validate()?;
        let created_model = user::ActiveModel::from(input).insert(self.db).await?;
        Ok(User::from(created_model))
    }

    /// Replaces every field of the user with the given ID.
    ///
    /// The row is not re-read: the returned `User` echoes the input under `id`,
    /// even when no row carried that ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the user to replace.
    /// * `input` - The new user fields.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UserIn) -> Result<User, CatalogError> {
        input.validate()?;
        let result = user::Entity::update_many()
            .set(user::ActiveModel::from(input.clone()))
            .filter(user::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!("Update of user {} matched no rows", id);
        }
        Ok(User::new(id, input))
    }

    /// Deletes the user with the given ID. Deleting a missing ID is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        user::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
