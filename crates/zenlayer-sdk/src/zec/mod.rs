//! Zenlayer Elastic Compute (ZEC) API models
//!
//! ZEC covers both compute (instances, disks, snapshots) and networking
//! (VPCs, subnets, vNICs, EIPs, NAT gateways, routes, security groups).

pub mod border_gateway;
pub mod cidr;
pub mod disk;
pub mod eip;
pub mod instance;
pub mod nat;
pub mod nic;
pub mod route;
pub mod security_group;
pub mod snapshot;
pub mod subnet;
pub mod vpc;

pub use border_gateway::*;
pub use cidr::*;
pub use disk::*;
pub use eip::*;
pub use instance::*;
pub use nat::*;
pub use nic::*;
pub use route::*;
pub use security_group::*;
pub use snapshot::*;
pub use subnet::*;
pub use vpc::*;

pub const SERVICE: &str = "zec";
pub const VERSION: &str = "2024-04-01";
