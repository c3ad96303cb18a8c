//! Dimension repository for forests, product grades and cost activities.
//!
//! Dimensions are seeded or managed out of band; the application only reads
//! them, apart from the create helpers used by the seeder.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use timberline_core::grid::DimensionMember;
use timberline_shared::types::ForestId;

use crate::entities::{dim_cost_activities, dim_forests, dim_products};

/// Error types for dimension operations.
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    /// Forest not found.
    #[error("Forest not found: {0}")]
    ForestNotFound(ForestId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Dimension repository.
#[derive(Debug, Clone)]
pub struct DimensionRepository {
    db: DatabaseConnection,
}

impl DimensionRepository {
    /// Creates a new dimension repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all forests ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_forests(&self) -> Result<Vec<DimensionMember>, DimensionError> {
        let forests = dim_forests::Entity::find()
            .order_by_asc(dim_forests::Column::Name)
            .all(&self.db)
            .await?;

        Ok(forests.into_iter().map(forest_member).collect())
    }

    /// Finds a forest by id.
    ///
    /// # Errors
    ///
    /// Returns `ForestNotFound` if no forest has the id.
    pub async fn get_forest(&self, id: ForestId) -> Result<DimensionMember, DimensionError> {
        dim_forests::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(forest_member)
            .ok_or(DimensionError::ForestNotFound(id))
    }

    /// Lists all product grades in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_grades(&self) -> Result<Vec<DimensionMember>, DbErr> {
        let grades = dim_products::Entity::find()
            .order_by_asc(dim_products::Column::Id)
            .all(&self.db)
            .await?;

        Ok(grades.into_iter().map(grade_member).collect())
    }

    /// Lists all cost activities in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_activities(&self) -> Result<Vec<DimensionMember>, DbErr> {
        let activities = dim_cost_activities::Entity::find()
            .order_by_asc(dim_cost_activities::Column::Id)
            .all(&self.db)
            .await?;

        Ok(activities.into_iter().map(activity_member).collect())
    }

    /// Creates a forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_forest(&self, name: &str) -> Result<DimensionMember, DbErr> {
        let model = dim_forests::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(forest_member(model))
    }

    /// Creates a product grade.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the grade code already exists.
    pub async fn create_grade(
        &self,
        grade_code: &str,
        name: Option<&str>,
    ) -> Result<DimensionMember, DbErr> {
        let model = dim_products::ActiveModel {
            grade_code: Set(grade_code.to_string()),
            name: Set(name.map(str::to_string)),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(grade_member(model))
    }

    /// Creates a cost activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_activity(
        &self,
        activity_name: &str,
        category: Option<&str>,
    ) -> Result<DimensionMember, DbErr> {
        let model = dim_cost_activities::ActiveModel {
            activity_name: Set(activity_name.to_string()),
            category: Set(category.map(str::to_string)),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(activity_member(model))
    }
}

fn forest_member(model: dim_forests::Model) -> DimensionMember {
    DimensionMember {
        id: model.id,
        name: Some(model.name),
        ..DimensionMember::default()
    }
}

pub(crate) fn grade_member(model: dim_products::Model) -> DimensionMember {
    DimensionMember {
        id: model.id,
        name: model.name,
        grade_code: Some(model.grade_code),
        ..DimensionMember::default()
    }
}

pub(crate) fn activity_member(model: dim_cost_activities::Model) -> DimensionMember {
    DimensionMember {
        id: model.id,
        activity_name: Some(model.activity_name),
        category: model.category,
        ..DimensionMember::default()
    }
}
