//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
    },
    hosted::HostedTables,
};

const PRODUCTS_TABLE: &str = "products";

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, ordered by name.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product with the given patch.
    async fn update_product(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given id.
    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsServiceError>;

    /// Reduce a product's stock by the given quantity, saturating at zero.
    ///
    /// Returns the new stock level.
    async fn decrement_stock(&self, id: Uuid, quantity: u32)
    -> Result<u32, ProductsServiceError>;
}

/// Products service backed by the hosted `products` table.
#[derive(Debug, Clone)]
pub struct HostedProductsService {
    tables: HostedTables,
}

impl HostedProductsService {
    #[must_use]
    pub fn new(tables: HostedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ProductsService for HostedProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.tables.list(PRODUCTS_TABLE, Some("name")).await?)
    }

    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsServiceError> {
        Ok(self.tables.get(PRODUCTS_TABLE, id).await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        Ok(self.tables.insert(PRODUCTS_TABLE, &product).await?)
    }

    async fn update_product(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        Ok(self.tables.update(PRODUCTS_TABLE, id, &update).await?)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsServiceError> {
        Ok(self.tables.delete(PRODUCTS_TABLE, id).await?)
    }

    async fn decrement_stock(
        &self,
        id: Uuid,
        quantity: u32,
    ) -> Result<u32, ProductsServiceError> {
        let product: Product = self.tables.get(PRODUCTS_TABLE, id).await?;
        let new_stock = product.stock.saturating_sub(quantity);

        let patch = ProductUpdate {
            stock: Some(new_stock),
            ..ProductUpdate::default()
        };

        let updated: Product = self.tables.update(PRODUCTS_TABLE, id, &patch).await?;

        Ok(updated.stock)
    }
}

/// In-memory products service for local wiring and tests.
#[derive(Debug, Default)]
pub struct MemoryProductsService {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductsService for MemoryProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut products = self.products.lock().await.clone();

        products.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(products)
    }

    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsServiceError> {
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut products = self.products.lock().await;

        if products.iter().any(|p| p.id == product.id) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let now = Timestamp::now();

        let created = Product {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            created_at: now,
            updated_at: now,
        };

        products.push(created.clone());

        Ok(created)
    }

    async fn update_product(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut products = self.products.lock().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductsServiceError::NotFound)?;

        if let Some(name) = update.name {
            product.name = name;
        }

        if let Some(price) = update.price {
            product.price = price;
        }

        if let Some(stock) = update.stock {
            product.stock = stock;
        }

        product.updated_at = Timestamp::now();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsServiceError> {
        let mut products = self.products.lock().await;
        let before = products.len();

        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }

    async fn decrement_stock(
        &self,
        id: Uuid,
        quantity: u32,
    ) -> Result<u32, ProductsServiceError> {
        let mut products = self.products.lock().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductsServiceError::NotFound)?;

        product.stock = product.stock.saturating_sub(quantity);
        product.updated_at = Timestamp::now();

        Ok(product.stock)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn new_product(id: Uuid, name: &str, price: u64, stock: u32) -> NewProduct {
        NewProduct {
            id,
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn create_product_returns_stored_record() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        let product = service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await?;

        assert_eq!(product.id, id);
        assert_eq!(product.price, 25_000);
        assert_eq!(product.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_id_returns_already_exists() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await?;

        let result = service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let service = MemoryProductsService::default();

        let result = service.get_product(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_is_ordered_by_name() -> TestResult {
        let service = MemoryProductsService::default();

        service
            .create_product(new_product(Uuid::now_v7(), "Wax", 10_000, 5))
            .await?;
        service
            .create_product(new_product(Uuid::now_v7(), "Conditioner", 30_000, 5))
            .await?;

        let names: Vec<String> = service
            .list_products()
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Conditioner", "Wax"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_applies_only_set_fields() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await?;

        let updated = service
            .update_product(
                id,
                ProductUpdate {
                    price: Some(27_500),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Shampoo");
        assert_eq!(updated.price, 27_500);
        assert_eq!(updated.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await?;

        service.delete_product(id).await?;

        let result = service.get_product(id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn decrement_stock_reduces_by_quantity() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        service
            .create_product(new_product(id, "Shampoo", 25_000, 10))
            .await?;

        let remaining = service.decrement_stock(id, 2).await?;

        assert_eq!(remaining, 8);

        Ok(())
    }

    #[tokio::test]
    async fn decrement_stock_saturates_at_zero() -> TestResult {
        let service = MemoryProductsService::default();
        let id = Uuid::now_v7();

        service
            .create_product(new_product(id, "Shampoo", 25_000, 3))
            .await?;

        let remaining = service.decrement_stock(id, 5).await?;

        assert_eq!(remaining, 0);

        Ok(())
    }
}
