//! In-memory repositories and collaborators for service tests.

use crate::{
    abstract_trait::{
        CategoryQueryRepositoryTrait, CustomerRepositoryTrait, EmailRequest, EmailServiceTrait,
        OrderCommandRepositoryTrait, ProductCommandRepositoryTrait, ProductFilter,
        ProductQueryRepositoryTrait, PromoCodeQueryRepositoryTrait,
        ResetTokenCommandRepositoryTrait, ResetTokenQueryRepositoryTrait, SessionStoreTrait,
        SubscriberRepositoryTrait, UserCommandRepositoryTrait, UserQueryRepositoryTrait,
    },
    domain::{
        requests::{
            CreateCheckoutRequest, CreateProductRequest, CreateResetTokenRequest,
            CreateUserRequest, UpdateProductRequest,
        },
        session::StorefrontSession,
    },
    errors::{RepositoryError, ServiceError},
    model::{
        Address, Category, Customer, ORDER_STATUS_PENDING, Order, Product, PromoCode, ResetToken,
        SubscribedUser, User,
    },
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use prometheus_client::registry::Registry;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

pub fn registry() -> Arc<tokio::sync::Mutex<Registry>> {
    Arc::new(tokio::sync::Mutex::new(Registry::default()))
}

pub fn product(id: i32, name: &str, price: i64) -> Product {
    Product {
        product_id: id,
        category_id: 1,
        user_id: None,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: format!("{name} description"),
        price,
        available: true,
        created_at: None,
        updated_at: None,
    }
}

pub fn user(id: i32, username: &str, email: &str, password_hash: &str) -> User {
    User {
        user_id: id,
        username: username.to_string(),
        email: email.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        password: password_hash.to_string(),
        is_staff: false,
        is_superuser: false,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    pub products: Mutex<Vec<Product>>,
}

impl InMemoryProducts {
    pub fn with(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            products: Mutex::new(products),
        })
    }

    fn matching(&self, filter: ProductFilter<'_>) -> Vec<Product> {
        let needle = filter.search.map(str::to_lowercase);
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.category_id.is_none_or(|id| p.category_id == id))
            .filter(|p| {
                needle.as_deref().is_none_or(|n| {
                    p.name.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProducts {
    async fn count(&self, filter: ProductFilter<'_>) -> Result<i64, RepositoryError> {
        Ok(self.matching(filter).len() as i64)
    }

    async fn find_page(
        &self,
        filter: ProductFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.product_id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.product_id))
            .cloned()
            .collect())
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.find_by_id(id).await?.filter(|p| p.available))
    }

    async fn find_available_by_id_and_slug(
        &self,
        id: i32,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .find_available_by_id(id)
            .await?
            .filter(|p| p.slug == slug))
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProducts {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        user_id: i32,
    ) -> Result<Product, RepositoryError> {
        if req.category_id != 1 {
            return Err(RepositoryError::ForeignKey("products_category_id_fkey".into()));
        }

        let mut products = self.products.lock().unwrap();
        let product = Product {
            product_id: products.len() as i32 + 1,
            category_id: req.category_id,
            user_id: Some(user_id),
            name: req.name.clone(),
            slug: req.slug.clone(),
            description: req.description.clone(),
            price: req.price,
            available: req.available,
            created_at: None,
            updated_at: None,
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<Product, RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.product_id == req.id)
            .ok_or(RepositoryError::NotFound)?;

        product.category_id = req.category_id;
        product.name = req.name.clone();
        product.slug = req.slug.clone();
        product.description = req.description.clone();
        product.price = req.price;
        product.available = req.available;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.product_id != id);
        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCategories {
    pub categories: Vec<Category>,
}

impl InMemoryCategories {
    pub fn with(categories: &[(i32, &str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            categories: categories
                .iter()
                .map(|(id, name, slug)| Category {
                    category_id: *id,
                    name: name.to_string(),
                    slug: slug.to_string(),
                })
                .collect(),
        })
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for InMemoryCategories {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPromoCodes {
    pub codes: Vec<PromoCode>,
}

impl InMemoryPromoCodes {
    pub fn with(codes: Vec<PromoCode>) -> Arc<Self> {
        Arc::new(Self { codes })
    }
}

#[async_trait]
impl PromoCodeQueryRepositoryTrait for InMemoryPromoCodes {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        Ok(self.codes.iter().find(|c| c.promo_code == code).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    pub checkouts: Mutex<Vec<CreateCheckoutRequest>>,
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrders {
    async fn create_checkout(
        &self,
        req: &CreateCheckoutRequest,
    ) -> Result<(Address, Vec<Order>), RepositoryError> {
        let mut checkouts = self.checkouts.lock().unwrap();
        checkouts.push(req.clone());
        let address_id = checkouts.len() as i32;

        let a = &req.address;
        let address = Address {
            address_id,
            customer_id: req.customer_id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            email: a.email.clone(),
            city: a.city.clone(),
            house: a.house.clone(),
            apartment: a.apartment.clone(),
            total_price: req.total_price,
            created_at: None,
        };

        let orders = req
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| Order {
                order_id: i as i32 + 1,
                address_id,
                customer_id: req.customer_id,
                product_id: line.product_id,
                first_name: a.first_name.clone(),
                last_name: a.last_name.clone(),
                email: a.email.clone(),
                city: a.city.clone(),
                house: a.house.clone(),
                apartment: a.apartment.clone(),
                quantity: line.quantity,
                total_price: line.total_price,
                status: ORDER_STATUS_PENDING.to_string(),
                created_at: None,
            })
            .collect();

        Ok((address, orders))
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    pub users: Mutex<Vec<User>>,
    pub customers: Mutex<Vec<Customer>>,
    fail_customers: AtomicBool,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
            ..Self::default()
        })
    }

    /// Makes every later customer insert fail, rolling back the user row.
    pub fn fail_customer_inserts(&self) {
        self.fail_customers.store(true, Ordering::SeqCst);
    }

    pub fn add_customer(&self, user_id: i32) -> Customer {
        let mut customers = self.customers.lock().unwrap();
        let customer = Customer {
            customer_id: customers.len() as i32 + 100,
            user_id,
            created_at: Some(Utc::now().naive_utc()),
        };
        customers.push(customer.clone());
        customer
    }

    pub fn password_of(&self, user_id: i32) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.password.clone())
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryUsers {
    async fn create_user_with_customer(
        &self,
        req: &CreateUserRequest,
    ) -> Result<(User, Customer), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == req.username) {
            return Err(RepositoryError::AlreadyExists("users_username_key".into()));
        }
        if self.fail_customers.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("customer insert failed".into()));
        }

        let mut created = user(users.len() as i32 + 1, &req.username, &req.email, &req.password);
        created.first_name = req.first_name.clone();
        created.last_name = req.last_name.clone();
        users.push(created.clone());
        drop(users);

        let customer = self.add_customer(created.user_id);
        Ok((created, customer))
    }

    async fn update_password(&self, user_id: i32, hashed: &str) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;
        user.password = hashed.to_string();
        Ok(())
    }
}

#[async_trait]
impl CustomerRepositoryTrait for InMemoryUsers {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemorySubscribers {
    pub subscribers: Mutex<Vec<SubscribedUser>>,
}

#[async_trait]
impl SubscriberRepositoryTrait for InMemorySubscribers {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscribedUser>, RepositoryError> {
        Ok(self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn create(&self, name: &str, email: &str) -> Result<SubscribedUser, RepositoryError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        let subscriber = SubscribedUser {
            subscriber_id: subscribers.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
            created_at: None,
        };
        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }
}

#[derive(Default)]
pub struct InMemoryResetTokens {
    pub tokens: Mutex<Vec<ResetToken>>,
}

#[async_trait]
impl ResetTokenQueryRepositoryTrait for InMemoryResetTokens {
    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, RepositoryError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }
}

#[async_trait]
impl ResetTokenCommandRepositoryTrait for InMemoryResetTokens {
    async fn create_reset_token(
        &self,
        request: &CreateResetTokenRequest,
    ) -> Result<ResetToken, RepositoryError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.user_id != request.user_id);
        let token = ResetToken {
            reset_token_id: tokens.len() as i32 + 1,
            user_id: request.user_id,
            token: request.token.clone(),
            expired_date: request.expired_date,
        };
        tokens.push(token.clone());
        Ok(token)
    }

    async fn delete_reset_token(&self, user_id: i32) -> Result<(), RepositoryError> {
        self.tokens.lock().unwrap().retain(|t| t.user_id != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailRequest>>,
    pub fail: bool,
}

#[async_trait]
impl EmailServiceTrait for RecordingMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::Email("SMTP relay unavailable".into()));
        }
        self.sent.lock().unwrap().push(req.clone());
        Ok(())
    }
}

/// Session store keeping sessions in a map; saves can be made to fail.
#[derive(Default)]
pub struct InMemorySessionStore {
    pub sessions: Mutex<HashMap<String, StorefrontSession>>,
    pub refreshed: Mutex<Vec<String>>,
    fail_saves: AtomicBool,
}

impl InMemorySessionStore {
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    pub fn session(&self, id: &str) -> Option<StorefrontSession> {
        self.sessions.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SessionStoreTrait for InMemorySessionStore {
    async fn save_session(&self, id: &str, session: &StorefrontSession, _: Duration) -> bool {
        if self.fail_saves.load(Ordering::SeqCst) {
            return false;
        }
        self.sessions
            .lock()
            .unwrap()
            .insert(id.to_string(), session.clone());
        true
    }

    async fn get_session(&self, id: &str) -> Option<StorefrontSession> {
        self.session(id)
    }

    async fn delete_session(&self, id: &str) -> bool {
        self.sessions.lock().unwrap().remove(id).is_some()
    }

    async fn refresh_session(&self, id: &str, _: Duration) -> bool {
        self.refreshed.lock().unwrap().push(id.to_string());
        true
    }
}
