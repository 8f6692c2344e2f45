//! App Context

use std::{path::PathBuf, sync::Arc};

use shearflow::vouchers::VoucherCatalog;

use crate::{
    checkout::CheckoutEngine,
    domain::{
        orders::{HostedOrdersService, MemoryOrdersService, OrdersService},
        products::{HostedProductsService, MemoryProductsService, ProductsService},
        sales::{HostedSalesService, MemorySalesService, SalesService},
        services::{HostedServicesService, MemoryServicesService, ServicesService},
        vouchers::{FileVoucherUsage, MemoryVoucherUsage, VoucherService, VoucherUsageError},
    },
    hosted::{HostedConfig, HostedTables},
};

/// Service wiring for one running terminal.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub services: Arc<dyn ServicesService>,
    pub orders: Arc<dyn OrdersService>,
    pub sales: Arc<dyn SalesService>,
    pub vouchers: VoucherService,
    pub checkout: CheckoutEngine,
}

impl AppContext {
    /// Wire all services against the hosted backend, with the used-voucher
    /// set persisted to a local file.
    ///
    /// # Errors
    ///
    /// Returns an error when the voucher usage file cannot be opened.
    pub fn hosted(
        config: HostedConfig,
        voucher_usage_path: impl Into<PathBuf>,
    ) -> Result<Self, VoucherUsageError> {
        let tables = HostedTables::new(config);

        let vouchers = VoucherService::new(
            VoucherCatalog::standard(),
            Arc::new(FileVoucherUsage::open(voucher_usage_path)?),
        );

        Ok(Self::wire(
            Arc::new(HostedProductsService::new(tables.clone())),
            Arc::new(HostedServicesService::new(tables.clone())),
            Arc::new(HostedOrdersService::new(tables.clone())),
            Arc::new(HostedSalesService::new(tables)),
            vouchers,
        ))
    }

    /// Wire all services in memory, for local demos and tests.
    #[must_use]
    pub fn in_memory() -> Self {
        let vouchers = VoucherService::new(
            VoucherCatalog::standard(),
            Arc::new(MemoryVoucherUsage::default()),
        );

        Self::wire(
            Arc::new(MemoryProductsService::default()),
            Arc::new(MemoryServicesService::default()),
            Arc::new(MemoryOrdersService::default()),
            Arc::new(MemorySalesService::default()),
            vouchers,
        )
    }

    fn wire(
        products: Arc<dyn ProductsService>,
        services: Arc<dyn ServicesService>,
        orders: Arc<dyn OrdersService>,
        sales: Arc<dyn SalesService>,
        vouchers: VoucherService,
    ) -> Self {
        let checkout = CheckoutEngine::new(
            orders.clone(),
            sales.clone(),
            products.clone(),
            vouchers.clone(),
        );

        Self {
            products,
            services,
            orders,
            sales,
            vouchers,
            checkout,
        }
    }
}
