//! # Expense Repository
//!
//! Property running costs, grouped into a fixed set of categories.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};
use std::sync::Arc;

use crate::error::RepositoryError;
use crate::models::expense::{self, Entity as Expense, ExpenseCategory};
use crate::models::money;

/// Request data for recording an expense
#[derive(Debug, Clone)]
pub struct CreateExpenseRequest {
    pub property_id: i32,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub description: String,
    /// User recording the expense
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseRequest {
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Decimal>,
    pub expense_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Repository for Expense database operations
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ExpenseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a new expense
    ///
    /// A category string from user input should be parsed with
    /// `ExpenseCategory::from_str` first; unknown values such as "rent" fail
    /// there with `InvalidEnumValue`.
    pub async fn create(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<expense::Model, RepositoryError> {
        if request.description.trim().is_empty() {
            return Err(RepositoryError::MissingField {
                field: "description",
            });
        }
        let amount = money::non_negative("amount", request.amount)?;

        let expense = expense::ActiveModel {
            property_id: Set(request.property_id),
            category: Set(request.category),
            amount: Set(amount),
            expense_date: Set(request.expense_date),
            description: Set(request.description),
            created_by: Set(request.created_by),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(
            expense_id = expense.id,
            property_id = expense.property_id,
            category = %expense.category,
            "expense recorded"
        );
        Ok(with_currency_scale(expense))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<expense::Model>, RepositoryError> {
        let expense = Expense::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(expense.map(with_currency_scale))
    }

    /// All expenses, most recent first
    pub async fn list(&self) -> Result<Vec<expense::Model>, RepositoryError> {
        self.fetch(Expense::find()).await
    }

    pub async fn list_by_property(
        &self,
        property_id: i32,
    ) -> Result<Vec<expense::Model>, RepositoryError> {
        self.fetch(Expense::find().filter(expense::Column::PropertyId.eq(property_id)))
            .await
    }

    pub async fn list_by_category(
        &self,
        category: ExpenseCategory,
    ) -> Result<Vec<expense::Model>, RepositoryError> {
        self.fetch(Expense::find().filter(expense::Column::Category.eq(category)))
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateExpenseRequest,
    ) -> Result<expense::Model, RepositoryError> {
        let expense = Expense::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("expense", id))?;
        let mut active = expense.into_active_model();

        if let Some(category) = request.category {
            active.category = Set(category);
        }
        if let Some(amount) = request.amount {
            active.amount = Set(money::non_negative("amount", amount)?);
        }
        if let Some(expense_date) = request.expense_date {
            active.expense_date = Set(expense_date);
        }
        if let Some(description) = request.description {
            if description.trim().is_empty() {
                return Err(RepositoryError::MissingField {
                    field: "description",
                });
            }
            active.description = Set(description);
        }

        let expense = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(expense_id = expense.id, "expense updated");
        Ok(with_currency_scale(expense))
    }

    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Expense::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("expense", id));
        }

        tracing::info!(expense_id = id, "expense deleted");
        Ok(())
    }

    async fn fetch(&self, query: Select<Expense>) -> Result<Vec<expense::Model>, RepositoryError> {
        let expenses = query
            .order_by_desc(expense::Column::ExpenseDate)
            .order_by_desc(expense::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(expenses.into_iter().map(with_currency_scale).collect())
    }
}

fn with_currency_scale(mut expense: expense::Model) -> expense::Model {
    expense.amount = money::rescaled(expense.amount);
    expense
}
