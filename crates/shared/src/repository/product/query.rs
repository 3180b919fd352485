use crate::{
    abstract_trait::{ProductFilter, ProductQueryRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};

const PRODUCT_COLUMNS: &str = "product_id, category_id, user_id, name, slug, description, \
                               price, available, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::INT IS NULL OR category_id = $1) \
     AND ($2::TEXT IS NULL OR name ILIKE $2 OR description ILIKE $2)";

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// `%term%` with LIKE metacharacters in the term escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn count(&self, filter: ProductFilter<'_>) -> Result<i64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM products WHERE {FILTER_CLAUSE}");

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.category_id)
            .bind(filter.search.map(contains_pattern))
            .fetch_one(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to count products: {err:?}");
                RepositoryError::from(err)
            })
    }

    async fn find_page(
        &self,
        filter: ProductFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        info!(
            "🔍 Fetching products (category: {:?}, search: {:?}, limit: {limit}, offset: {offset})",
            filter.category_id, filter.search
        );

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE {FILTER_CLAUSE} \
             ORDER BY created_at DESC, product_id DESC LIMIT $3 OFFSET $4"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(filter.category_id)
            .bind(filter.search.map(contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch products: {err:?}");
                RepositoryError::from(err)
            })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch product ID {id}: {err:?}");
                RepositoryError::from(err)
            })
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ANY($1) ORDER BY product_id"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(ids)
            .fetch_all(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch products {ids:?}: {err:?}");
                RepositoryError::from(err)
            })
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1 AND available = TRUE"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch available product ID {id}: {err:?}");
                RepositoryError::from(err)
            })
    }

    async fn find_available_by_id_and_slug(
        &self,
        id: i32,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE product_id = $1 AND slug = $2 AND available = TRUE"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(slug)
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch product {id}/{slug}: {err:?}");
                RepositoryError::from(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn search_term_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("shirt"), "%shirt%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
