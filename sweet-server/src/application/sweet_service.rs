use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::sweet_repository::SweetRepository;
use crate::domain::{error::DomainError, sweet::Sweet};
use crate::presentation::dto::{CreateSweetRequest, UpdateSweetRequest};

#[derive(Clone)]
pub struct SweetService {
    repo: Arc<dyn SweetRepository>,
}

impl SweetService {
    pub fn new(repo: Arc<dyn SweetRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn create_sweet(&self, request: CreateSweetRequest) -> Result<Sweet, DomainError> {
        if request.name.is_empty() {
            return Err(DomainError::Validation("Name and Price are required".into()));
        }
        if request.price < 0.0 {
            return Err(DomainError::Validation("price must be non-negative".into()));
        }
        let quantity = request.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(DomainError::Validation(
                "quantity must be non-negative".into(),
            ));
        }

        let sweet = Sweet::new(request.name, request.category, request.price, quantity);
        self.repo.create(sweet).await
    }

    pub async fn list_sweets(&self) -> Result<Vec<Sweet>, DomainError> {
        self.repo.list().await
    }

    pub async fn search_sweets(&self, query: &str) -> Result<Vec<Sweet>, DomainError> {
        self.repo.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn update_sweet(
        &self,
        id: Uuid,
        changes: UpdateSweetRequest,
    ) -> Result<Sweet, DomainError> {
        if changes.name.as_deref() == Some("") {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if changes.price.is_some_and(|p| p < 0.0) {
            return Err(DomainError::Validation("price must be non-negative".into()));
        }
        if changes.quantity.is_some_and(|q| q < 0) {
            return Err(DomainError::Validation(
                "quantity must be non-negative".into(),
            ));
        }

        match self.repo.update(id, changes).await {
            Ok(Some(sweet)) => Ok(sweet),
            Ok(None) => Err(DomainError::NotFound),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_sweet(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn purchase_sweet(&self, id: Uuid) -> Result<Sweet, DomainError> {
        self.repo.purchase_one(id).await
    }
}
