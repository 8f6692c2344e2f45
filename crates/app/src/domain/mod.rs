//! ShearFlow Domain Concerns

pub mod orders;
pub mod products;
pub mod sales;
pub mod services;
pub mod vouchers;
