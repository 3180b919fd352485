use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateCheckoutRequest,
    errors::RepositoryError,
    model::{Address, ORDER_STATUS_PENDING, Order},
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_checkout(
        &self,
        req: &CreateCheckoutRequest,
    ) -> Result<(Address, Vec<Order>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|err| {
            error!("❌ Failed to open checkout transaction: {err:?}");
            RepositoryError::from(err)
        })?;

        let contact = &req.address;

        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (customer_id, first_name, last_name, email, city, house, apartment,
                                   total_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, current_timestamp)
            RETURNING address_id, customer_id, first_name, last_name, email, city, house, apartment,
                      total_price, created_at
            "#,
        )
        .bind(req.customer_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.city)
        .bind(&contact.house)
        .bind(&contact.apartment)
        .bind(req.total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create address: {err:?}");
            RepositoryError::from_constraint(err)
        })?;

        let mut orders = Vec::with_capacity(req.lines.len());

        for line in &req.lines {
            let order = sqlx::query_as::<_, Order>(
                r#"
                INSERT INTO orders (address_id, customer_id, product_id, first_name, last_name, email,
                                    city, house, apartment, quantity, total_price, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, current_timestamp)
                RETURNING order_id, address_id, customer_id, product_id, first_name, last_name, email,
                          city, house, apartment, quantity, total_price, status, created_at
                "#,
            )
            .bind(address.address_id)
            .bind(req.customer_id)
            .bind(line.product_id)
            .bind(&address.first_name)
            .bind(&address.last_name)
            .bind(&address.email)
            .bind(&address.city)
            .bind(&address.house)
            .bind(&address.apartment)
            .bind(line.quantity)
            .bind(line.total_price)
            .bind(ORDER_STATUS_PENDING)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order for product ID {}: {err:?}",
                    line.product_id
                );
                RepositoryError::from_constraint(err)
            })?;

            orders.push(order);
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit checkout: {err:?}");
            RepositoryError::from(err)
        })?;

        info!(
            "🧾 Checkout stored: address ID {} with {} orders",
            address.address_id,
            orders.len()
        );

        Ok((address, orders))
    }
}
