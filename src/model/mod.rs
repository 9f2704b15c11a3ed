//! Native snapshot records, one per category, in the camelCase shape of the remote API.
//!
//! These are plain data. The categories in [`groups`](crate::groups),
//! [`networks`](crate::networks), [`load_balancers`](crate::load_balancers),
//! [`cloud_services`](crate::cloud_services), [`virtual_machines`](crate::virtual_machines)
//! and [`regions`](crate::regions) bind them to the framework.

pub mod cloud_service;
pub mod group;
pub mod load_balancer;
pub mod network;
pub mod region;
pub mod virtual_machine;

pub use cloud_service::*;
pub use group::*;
pub use load_balancer::*;
pub use network::*;
pub use region::*;
pub use virtual_machine::*;
