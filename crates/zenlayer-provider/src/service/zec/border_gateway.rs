use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::zec::{BorderGatewayInfo, DescribeBorderGatewaysRequest};

#[derive(Debug, Clone, Default)]
pub struct BorderGatewayFilter {
    pub ids: Vec<String>,
    pub vpc_id: String,
    pub region_id: String,
    pub name: String,
}

impl BorderGatewayFilter {
    fn to_request(&self) -> DescribeBorderGatewaysRequest {
        DescribeBorderGatewaysRequest {
            zbg_ids: opt_vec(&self.ids),
            vpc_id: opt(&self.vpc_id),
            region_id: opt(&self.region_id),
            name: opt(&self.name),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_border_gateway_by_id(
        &self,
        ctx: &OpContext,
        zbg_id: &str,
    ) -> Result<Option<BorderGatewayInfo>> {
        let filter = BorderGatewayFilter {
            ids: vec![zbg_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_border_gateways_by_filter(
        &self,
        ctx: &OpContext,
        filter: &BorderGatewayFilter,
    ) -> Result<Vec<BorderGatewayInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
