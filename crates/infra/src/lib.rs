//! Infrastructure layer: storage adapters, configuration, fixture seeding.

pub mod config;
pub mod memory;
pub mod seed;

pub use config::{AppConfig, AuditConfig, ConfigError, SeedConfig};
pub use memory::{
    InMemoryAuditLogRepository, InMemoryOrganizationRepository, InMemoryStores,
    InMemoryTaskRepository, InMemoryUserRepository,
};
pub use seed::{Fixture, seed_fixture};
