//! Registry module - addresses, tracked pools and burner addresses.

mod address;
mod registry_model;

pub use address::{AccountId, Address, PoolId};
pub use registry_model::{BurnerSet, Denomination, PoolDefinition, PoolRegistry, RegistryFile};
