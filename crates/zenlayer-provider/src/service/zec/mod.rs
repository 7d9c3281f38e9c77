//! ZEC service: compute and networking

mod border_gateway;
mod cidr;
mod disk;
mod eip;
mod instance;
mod nat;
mod nic;
mod route;
mod security_group;
mod snapshot;
mod subnet;
mod vpc;

pub use border_gateway::BorderGatewayFilter;
pub use cidr::CidrFilter;
pub use disk::DiskFilter;
pub use eip::EipFilter;
pub use instance::InstanceFilter;
pub use nat::NatGatewayFilter;
pub use nic::NicFilter;
pub use route::RouteFilter;
pub use security_group::SecurityGroupFilter;
pub use snapshot::{AutoSnapshotPolicyFilter, SnapshotFilter};
pub use subnet::SubnetFilter;
pub use vpc::VpcFilter;

use super::{call, found};
use zenlayer_cloud::{OpContext, Result};
use zenlayer_sdk::{ApiClient, PagedRequest, PagedResponse, Request};

type Item<R> = <<R as Request>::Response as PagedResponse>::Item;

#[derive(Clone)]
pub struct ZecService {
    client: ApiClient,
}

impl ZecService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Send one action under the retry loop
    pub async fn send<R: Request>(&self, ctx: &OpContext, request: &R) -> Result<R::Response> {
        call(&self.client, ctx, request, &[]).await
    }

    /// Like [`send`](Self::send), retrying on `extra_codes` as well
    pub async fn send_retrying<R: Request>(
        &self,
        ctx: &OpContext,
        request: &R,
        extra_codes: &[&str],
    ) -> Result<R::Response> {
        call(&self.client, ctx, request, extra_codes).await
    }

    /// Delete-style call. Returns `false` when the object was already gone.
    pub async fn send_unless_gone<R: Request>(&self, ctx: &OpContext, request: &R) -> Result<bool> {
        Ok(found(self.send(ctx, request).await)?.is_some())
    }

    /// First entity of a describe filtered down to one id
    async fn describe_one<R: PagedRequest>(&self, ctx: &OpContext, mut request: R) -> Result<Option<Item<R>>> {
        request.set_page(1, 1);
        let Some(response) = found(self.send(ctx, &request).await)? else {
            return Ok(None);
        };
        Ok(response.into_items().into_iter().next())
    }
}
