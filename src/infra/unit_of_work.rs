//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-statement work
//! inside a single database transaction (begin, commit, rollback).

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, IsolationLevel, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::listing::{self, Entity as ListingEntity};
use super::repositories::{
    InquiryRepository, InquiryStore, ListingRepository, ListingStore, UserRepository, UserStore,
};
use crate::domain::ImageEncoding;
use crate::errors::{AppError, AppResult};

/// Boxed closure run inside a transaction.
pub type TransactionFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction method;
/// tests provide a small hand-written implementation instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn listings(&self) -> Arc<dyn ListingRepository>;

    fn inquiries(&self) -> Arc<dyn InquiryRepository>;

    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Commits when the closure succeeds, rolls back when it fails.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
    encoding: ImageEncoding,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction, encoding: ImageEncoding) -> Self {
        Self { txn, encoding }
    }

    /// Listing operations for this transaction
    pub fn listings(&self) -> TxListingRepository<'_> {
        TxListingRepository {
            txn: self.txn,
            encoding: self.encoding,
        }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    encoding: ImageEncoding,
    user_repo: Arc<UserStore>,
    listing_repo: Arc<ListingStore>,
    inquiry_repo: Arc<InquiryStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection, encoding: ImageEncoding) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            listing_repo: Arc::new(ListingStore::new(db.clone(), encoding)),
            inquiry_repo: Arc::new(InquiryStore::new(db.clone())),
            db,
            encoding,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn listings(&self) -> Arc<dyn ListingRepository> {
        self.listing_repo.clone()
    }

    fn inquiries(&self) -> Arc<dyn InquiryRepository> {
        self.inquiry_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let ctx = TransactionContext::new(&txn, self.encoding);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-bound listing operations used by maintenance commands.
pub struct TxListingRepository<'a> {
    txn: &'a DatabaseTransaction,
    encoding: ImageEncoding,
}

impl<'a> TxListingRepository<'a> {
    /// Rewrite every listing's `images` into the active encoding.
    ///
    /// Rows already in canonical form are left untouched. Returns the
    /// number of rows rewritten.
    pub async fn normalize_images(&self) -> AppResult<usize> {
        let rows = ListingEntity::find()
            .order_by_asc(listing::Column::Id)
            .all(self.txn)
            .await?;

        let mut rewritten = 0;
        for row in rows {
            let Some(canonical) = self.encoding.rewrite(row.images.as_ref()) else {
                continue;
            };

            tracing::debug!(
                listing_id = row.id,
                encoding = %self.encoding,
                "Rewriting listing images"
            );

            let mut active = row.into_active_model();
            active.images = Set(Some(canonical));
            active.update(self.txn).await.map_err(AppError::from)?;
            rewritten += 1;
        }

        Ok(rewritten)
    }
}

/// Run a block inside a Unit of Work transaction.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
