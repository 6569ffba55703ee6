//! # Payment Repository
//!
//! Rent payments received from tenants. A payment can be flagged as
//! corrected once; the replacement, if any, is recorded as a new payment.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set, sea_query::Expr,
};
use std::sync::Arc;

use super::required_text;
use crate::error::RepositoryError;
use crate::models::money;
use crate::models::payment::{self, Entity as Payment};

const PAYMENT_METHOD_MAX: usize = 50;

/// Request data for recording a payment
#[derive(Debug, Clone)]
pub struct CreatePaymentRequest {
    pub tenant_id: i32,
    pub unit_id: i32,
    /// Amount received, rounded to two places on write
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    /// e.g. "cash", "bank transfer"
    pub payment_method: String,
    /// User recording the payment
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

/// Repository for Payment database operations
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl PaymentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a new payment
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the tenant, unit or creating user does
    /// not exist and `Validation` for a non-positive amount.
    pub async fn create(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<payment::Model, RepositoryError> {
        required_text("payment_method", &request.payment_method, PAYMENT_METHOD_MAX)?;
        let amount = money::positive("amount", request.amount)?;

        let payment = payment::ActiveModel {
            tenant_id: Set(request.tenant_id),
            unit_id: Set(request.unit_id),
            amount: Set(amount),
            payment_date: Set(request.payment_date),
            payment_method: Set(request.payment_method),
            is_corrected: Set(false),
            created_by: Set(request.created_by),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(
            payment_id = payment.id,
            tenant_id = payment.tenant_id,
            unit_id = payment.unit_id,
            created_by = payment.created_by,
            "payment recorded"
        );
        Ok(with_currency_scale(payment))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<payment::Model>, RepositoryError> {
        let payment = Payment::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(payment.map(with_currency_scale))
    }

    /// All payments, most recent payment date first
    pub async fn list(&self) -> Result<Vec<payment::Model>, RepositoryError> {
        self.fetch(Payment::find()).await
    }

    pub async fn list_by_tenant(
        &self,
        tenant_id: i32,
    ) -> Result<Vec<payment::Model>, RepositoryError> {
        self.fetch(Payment::find().filter(payment::Column::TenantId.eq(tenant_id)))
            .await
    }

    pub async fn list_by_unit(&self, unit_id: i32) -> Result<Vec<payment::Model>, RepositoryError> {
        self.fetch(Payment::find().filter(payment::Column::UnitId.eq(unit_id)))
            .await
    }

    /// Payments recorded by one user
    pub async fn list_by_creator(
        &self,
        user_id: i32,
    ) -> Result<Vec<payment::Model>, RepositoryError> {
        self.fetch(Payment::find().filter(payment::Column::CreatedBy.eq(user_id)))
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdatePaymentRequest,
    ) -> Result<payment::Model, RepositoryError> {
        let payment = self.require(id).await?;
        let mut active = payment.into_active_model();

        if let Some(amount) = request.amount {
            active.amount = Set(money::positive("amount", amount)?);
        }
        if let Some(payment_date) = request.payment_date {
            active.payment_date = Set(payment_date);
        }
        if let Some(payment_method) = request.payment_method {
            required_text("payment_method", &payment_method, PAYMENT_METHOD_MAX)?;
            active.payment_method = Set(payment_method);
        }

        let payment = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(payment_id = payment.id, "payment updated");
        Ok(with_currency_scale(payment))
    }

    /// Flag a payment as corrected
    ///
    /// The flag is set with a single conditional update, so of two concurrent
    /// calls only one succeeds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the payment is already corrected.
    pub async fn mark_corrected(&self, id: i32) -> Result<payment::Model, RepositoryError> {
        let result = Payment::update_many()
            .col_expr(payment::Column::IsCorrected, Expr::value(true))
            .filter(payment::Column::Id.eq(id))
            .filter(payment::Column::IsCorrected.eq(false))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let payment = self.require(id).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::InvalidTransition {
                entity: "payment",
                from: "corrected".to_string(),
                to: "corrected".to_string(),
            });
        }

        tracing::info!(payment_id = payment.id, "payment marked corrected");
        Ok(with_currency_scale(payment))
    }

    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Payment::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("payment", id));
        }

        tracing::info!(payment_id = id, "payment deleted");
        Ok(())
    }

    async fn fetch(&self, query: Select<Payment>) -> Result<Vec<payment::Model>, RepositoryError> {
        let payments = query
            .order_by_desc(payment::Column::PaymentDate)
            .order_by_desc(payment::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(payments.into_iter().map(with_currency_scale).collect())
    }

    async fn require(&self, id: i32) -> Result<payment::Model, RepositoryError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("payment", id))
    }
}

fn with_currency_scale(mut payment: payment::Model) -> payment::Model {
    payment.amount = money::rescaled(payment.amount);
    payment
}
