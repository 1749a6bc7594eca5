#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use async_trait::async_trait;
use uuid::Uuid;

use sweet_server::application::auth_service::AuthService;
use sweet_server::application::sweet_service::SweetService;
use sweet_server::data::sweet_repository::SweetRepository;
use sweet_server::data::user_repository::UserRepository;
use sweet_server::domain::error::DomainError;
use sweet_server::domain::sweet::Sweet;
use sweet_server::domain::user::{Role, User};
use sweet_server::infrastructure::security::JwtKeys;
use sweet_server::presentation::dto::UpdateSweetRequest;
use sweet_server::presentation::handlers;
use sweet_server::presentation::json_error_handler;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_keys() -> JwtKeys {
    JwtKeys::new(TEST_SECRET.to_string())
}

/// Mints a token for an arbitrary caller identity; stateless verification
/// means the user does not have to exist in the store.
pub fn token_for(role: Role) -> String {
    test_keys()
        .generate_token(Uuid::new_v4(), "test@test.com", role)
        .unwrap()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::AlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

#[derive(Default)]
pub struct InMemorySweetRepository {
    sweets: Mutex<Vec<Sweet>>,
}

#[async_trait]
impl SweetRepository for InMemorySweetRepository {
    async fn create(&self, sweet: Sweet) -> Result<Sweet, DomainError> {
        self.sweets.lock().unwrap().push(sweet.clone());
        Ok(sweet)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>, DomainError> {
        let sweets = self.sweets.lock().unwrap();
        Ok(sweets.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Sweet>, DomainError> {
        let mut sweets = self.sweets.lock().unwrap().clone();
        sweets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sweets)
    }

    async fn search(&self, query: &str) -> Result<Vec<Sweet>, DomainError> {
        let mut sweets: Vec<Sweet> = self
            .sweets
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name.contains(query) || s.category.contains(query))
            .cloned()
            .collect();
        sweets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sweets)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateSweetRequest,
    ) -> Result<Option<Sweet>, DomainError> {
        let mut sweets = self.sweets.lock().unwrap();
        let Some(sweet) = sweets.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            sweet.name = name;
        }
        if let Some(category) = changes.category {
            sweet.category = category;
        }
        if let Some(price) = changes.price {
            sweet.price = price;
        }
        if let Some(quantity) = changes.quantity {
            sweet.quantity = quantity;
        }
        Ok(Some(sweet.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut sweets = self.sweets.lock().unwrap();
        let before = sweets.len();
        sweets.retain(|s| s.id != id);
        if sweets.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn purchase_one(&self, id: Uuid) -> Result<Sweet, DomainError> {
        // Check and decrement under one lock, mirroring the conditional write
        // the Postgres implementation issues.
        let mut sweets = self.sweets.lock().unwrap();
        let sweet = sweets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::NotFound)?;
        if sweet.quantity < 1 {
            return Err(DomainError::OutOfStock);
        }
        sweet.quantity -= 1;
        Ok(sweet.clone())
    }
}

pub async fn spawn_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>
{
    let keys = test_keys();
    let auth_service = AuthService::new(Arc::new(InMemoryUserRepository::default()), keys.clone());
    let sweet_service = SweetService::new(Arc::new(InMemorySweetRepository::default()));

    test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(auth_service))
            .app_data(web::Data::new(sweet_service))
            .service(handlers::welcome)
            .service(
                web::scope("/api")
                    .service(handlers::auth::scope())
                    .service(handlers::sweets::scope(keys)),
            ),
    )
    .await
}
