//! Salon services service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    domain::services::{
        errors::ServicesServiceError,
        models::{NewSalonService, SalonService, SalonServiceUpdate},
    },
    hosted::HostedTables,
};

const SERVICES_TABLE: &str = "services";

#[automock]
#[async_trait]
pub trait ServicesService: Send + Sync {
    /// Retrieves all services, ordered by name.
    async fn list_services(&self) -> Result<Vec<SalonService>, ServicesServiceError>;

    /// Retrieve a single service.
    async fn get_service(&self, id: Uuid) -> Result<SalonService, ServicesServiceError>;

    /// Creates a new service with the given details.
    async fn create_service(
        &self,
        service: NewSalonService,
    ) -> Result<SalonService, ServicesServiceError>;

    /// Updates a service with the given patch.
    async fn update_service(
        &self,
        id: Uuid,
        update: SalonServiceUpdate,
    ) -> Result<SalonService, ServicesServiceError>;

    /// Deletes a service with the given id.
    async fn delete_service(&self, id: Uuid) -> Result<(), ServicesServiceError>;
}

/// Services service backed by the hosted `services` table.
#[derive(Debug, Clone)]
pub struct HostedServicesService {
    tables: HostedTables,
}

impl HostedServicesService {
    #[must_use]
    pub fn new(tables: HostedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ServicesService for HostedServicesService {
    async fn list_services(&self) -> Result<Vec<SalonService>, ServicesServiceError> {
        Ok(self.tables.list(SERVICES_TABLE, Some("name")).await?)
    }

    async fn get_service(&self, id: Uuid) -> Result<SalonService, ServicesServiceError> {
        Ok(self.tables.get(SERVICES_TABLE, id).await?)
    }

    async fn create_service(
        &self,
        service: NewSalonService,
    ) -> Result<SalonService, ServicesServiceError> {
        Ok(self.tables.insert(SERVICES_TABLE, &service).await?)
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: SalonServiceUpdate,
    ) -> Result<SalonService, ServicesServiceError> {
        Ok(self.tables.update(SERVICES_TABLE, id, &update).await?)
    }

    async fn delete_service(&self, id: Uuid) -> Result<(), ServicesServiceError> {
        Ok(self.tables.delete(SERVICES_TABLE, id).await?)
    }
}

/// In-memory services service for local wiring and tests.
#[derive(Debug, Default)]
pub struct MemoryServicesService {
    services: Mutex<Vec<SalonService>>,
}

#[async_trait]
impl ServicesService for MemoryServicesService {
    async fn list_services(&self) -> Result<Vec<SalonService>, ServicesServiceError> {
        let mut services = self.services.lock().await.clone();

        services.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(services)
    }

    async fn get_service(&self, id: Uuid) -> Result<SalonService, ServicesServiceError> {
        self.services
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ServicesServiceError::NotFound)
    }

    async fn create_service(
        &self,
        service: NewSalonService,
    ) -> Result<SalonService, ServicesServiceError> {
        let mut services = self.services.lock().await;

        if services.iter().any(|s| s.id == service.id) {
            return Err(ServicesServiceError::AlreadyExists);
        }

        let now = Timestamp::now();

        let created = SalonService {
            id: service.id,
            name: service.name,
            description: service.description,
            price: service.price,
            products_used: service.products_used,
            created_at: now,
            updated_at: now,
        };

        services.push(created.clone());

        Ok(created)
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: SalonServiceUpdate,
    ) -> Result<SalonService, ServicesServiceError> {
        let mut services = self.services.lock().await;

        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ServicesServiceError::NotFound)?;

        if let Some(name) = update.name {
            service.name = name;
        }

        if let Some(description) = update.description {
            service.description = description;
        }

        if let Some(price) = update.price {
            service.price = price;
        }

        if let Some(products_used) = update.products_used {
            service.products_used = products_used;
        }

        service.updated_at = Timestamp::now();

        Ok(service.clone())
    }

    async fn delete_service(&self, id: Uuid) -> Result<(), ServicesServiceError> {
        let mut services = self.services.lock().await;
        let before = services.len();

        services.retain(|s| s.id != id);

        if services.len() == before {
            return Err(ServicesServiceError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn hair_spa(id: Uuid) -> NewSalonService {
        NewSalonService {
            id,
            name: "Hair Spa".to_string(),
            description: "Deep conditioning".to_string(),
            price: 50_000,
            products_used: vec![Uuid::from_u128(9)],
        }
    }

    #[tokio::test]
    async fn create_and_get_service() -> TestResult {
        let service = MemoryServicesService::default();
        let id = Uuid::now_v7();

        service.create_service(hair_spa(id)).await?;

        let stored = service.get_service(id).await?;

        assert_eq!(stored.name, "Hair Spa");
        assert_eq!(stored.products_used, vec![Uuid::from_u128(9)]);

        Ok(())
    }

    #[tokio::test]
    async fn get_service_unknown_id_returns_not_found() {
        let service = MemoryServicesService::default();

        let result = service.get_service(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(ServicesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_service_replaces_consumed_products() -> TestResult {
        let service = MemoryServicesService::default();
        let id = Uuid::now_v7();

        service.create_service(hair_spa(id)).await?;

        let replacement = vec![Uuid::from_u128(11), Uuid::from_u128(12)];

        let updated = service
            .update_service(
                id,
                SalonServiceUpdate {
                    products_used: Some(replacement.clone()),
                    ..SalonServiceUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.products_used, replacement);

        Ok(())
    }

    #[tokio::test]
    async fn delete_service_makes_it_not_found() -> TestResult {
        let service = MemoryServicesService::default();
        let id = Uuid::now_v7();

        service.create_service(hair_spa(id)).await?;
        service.delete_service(id).await?;

        let result = service.get_service(id).await;

        assert!(
            matches!(result, Err(ServicesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
