use crate::domain::error::DomainError;
use crate::domain::sweet::Sweet;
use crate::presentation::dto::UpdateSweetRequest;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait SweetRepository: Send + Sync {
    async fn create(&self, sweet: Sweet) -> Result<Sweet, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>, DomainError>;
    async fn list(&self) -> Result<Vec<Sweet>, DomainError>;
    async fn search(&self, query: &str) -> Result<Vec<Sweet>, DomainError>;
    async fn update(
        &self,
        id: Uuid,
        changes: UpdateSweetRequest,
    ) -> Result<Option<Sweet>, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn purchase_one(&self, id: Uuid) -> Result<Sweet, DomainError>;
}

#[derive(Clone)]
pub struct PostgresSweetRepository {
    pool: PgPool,
}

impl PostgresSweetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SweetRepository for PostgresSweetRepository {
    async fn create(&self, sweet: Sweet) -> Result<Sweet, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sweets (id, name, category, price, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(sweet.id)
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .bind(sweet.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create sweet: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(sweet_id = %sweet.id, name = %sweet.name, "sweet created");
        Ok(sweet)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>, DomainError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity, created_at
            FROM sweets WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn list(&self) -> Result<Vec<Sweet>, DomainError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity, created_at
            FROM sweets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing sweets: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Sweet>, DomainError> {
        // position() is plain substring containment; an empty needle matches
        // every row, so an empty query returns the unfiltered set.
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity, created_at
            FROM sweets
            WHERE position($1 in name) > 0 OR position($1 in category) > 0
            ORDER BY created_at DESC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while searching sweets: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateSweetRequest,
    ) -> Result<Option<Sweet>, DomainError> {
        let sweet = sqlx::query_as::<_, Sweet>(
            r#"
            UPDATE sweets
            SET
                name = COALESCE($1, name),
                category = COALESCE($2, category),
                price = COALESCE($3, price),
                quantity = COALESCE($4, quantity)
            WHERE id = $5
            RETURNING id, name, category, price, quantity, created_at
            "#,
        )
        .bind(changes.name)
        .bind(changes.category)
        .bind(changes.price)
        .bind(changes.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update sweet {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if sweet.is_some() {
            info!(sweet_id = %id, "sweet updated");
        }

        Ok(sweet)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM sweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }

        info!(sweet_id = %id, "sweet deleted");
        Ok(())
    }

    async fn purchase_one(&self, id: Uuid) -> Result<Sweet, DomainError> {
        // The stock check and the decrement are one conditional write, so two
        // concurrent purchases of the last unit serialize inside the database.
        let sweet = sqlx::query_as::<_, Sweet>(
            r#"
            UPDATE sweets
            SET quantity = quantity - 1
            WHERE id = $1 AND quantity > 0
            RETURNING id, name, category, price, quantity, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to purchase sweet {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        match sweet {
            Some(sweet) => {
                info!(sweet_id = %id, remaining = sweet.quantity, "sweet purchased");
                Ok(sweet)
            }
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sweets WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| DomainError::Internal(e.to_string()))?;

                if exists {
                    Err(DomainError::OutOfStock)
                } else {
                    Err(DomainError::NotFound)
                }
            }
        }
    }
}
