use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
        user_id: i32,
    ) -> Result<Product, RepositoryError> {
        let result = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (category_id, user_id, name, slug, description, price, available,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp, current_timestamp)
            RETURNING product_id, category_id, user_id, name, slug, description, price, available,
                      created_at, updated_at
            "#,
        )
        .bind(product.category_id)
        .bind(user_id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {err:?}", product.name);
            RepositoryError::from_constraint(err)
        })?;

        info!("✅ Created product ID {} ({})", result.product_id, result.name);
        Ok(result)
    }

    async fn update_product(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let result = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET category_id = $2,
                name = $3,
                slug = $4,
                description = $5,
                price = $6,
                available = $7,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING product_id, category_id, user_id, name, slug, description, price, available,
                      created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {err:?}", product.id);
            RepositoryError::from_constraint(err)
        })?;

        info!("🔄 Updated product ID {}", result.product_id);
        Ok(result)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {id}: {err:?}");
                RepositoryError::from_constraint(err)
            })?;

        if result.rows_affected() == 0 {
            info!("ℹ️ Product ID {id} not found for deletion");
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product ID {id}");
        Ok(())
    }
}
