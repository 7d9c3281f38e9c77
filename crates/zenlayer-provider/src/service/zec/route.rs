use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::zec::{DescribeVpcRoutesRequest, RouteInfo};

#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    pub ids: Vec<String>,
    pub vpc_id: String,
    pub ip_version: String,
    pub route_type: String,
    pub destination_cidr_block: String,
}

impl RouteFilter {
    fn to_request(&self) -> DescribeVpcRoutesRequest {
        DescribeVpcRoutesRequest {
            route_ids: opt_vec(&self.ids),
            vpc_id: opt(&self.vpc_id),
            ip_version: opt(&self.ip_version),
            route_type: opt(&self.route_type),
            destination_cidr_block: opt(&self.destination_cidr_block),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_vpc_route_by_id(&self, ctx: &OpContext, route_id: &str) -> Result<Option<RouteInfo>> {
        let filter = RouteFilter {
            ids: vec![route_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_vpc_routes_by_filter(
        &self,
        ctx: &OpContext,
        filter: &RouteFilter,
    ) -> Result<Vec<RouteInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
