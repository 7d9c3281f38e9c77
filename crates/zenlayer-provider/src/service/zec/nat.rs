use super::ZecService;
use crate::service::{found, opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{
    DescribeNatGatewayDetailRequest, DescribeNatGatewayDetailResponse, DescribeNatGatewaysRequest, DnatEntry,
    NatGatewayInfo, SnatEntry,
};

#[derive(Debug, Clone, Default)]
pub struct NatGatewayFilter {
    pub ids: Vec<String>,
    pub region_id: String,
    pub vpc_id: String,
    pub name: String,
    pub resource_group_id: String,
}

impl NatGatewayFilter {
    fn to_request(&self) -> DescribeNatGatewaysRequest {
        DescribeNatGatewaysRequest {
            nat_gateway_ids: opt_vec(&self.ids),
            region_id: opt(&self.region_id),
            vpc_id: opt(&self.vpc_id),
            name: opt(&self.name),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_nat_gateway_by_id(
        &self,
        ctx: &OpContext,
        nat_gateway_id: &str,
    ) -> Result<Option<NatGatewayInfo>> {
        let filter = NatGatewayFilter {
            ids: vec![nat_gateway_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_nat_gateways_by_filter(
        &self,
        ctx: &OpContext,
        filter: &NatGatewayFilter,
    ) -> Result<Vec<NatGatewayInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn nat_gateway_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        nat_gateway_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, NatGatewayInfo> {
        state_refresh(
            format!("NAT gateway {nat_gateway_id}"),
            move || self.describe_nat_gateway_by_id(ctx, nat_gateway_id),
            |nat| nat.status.clone(),
            failed,
        )
    }

    /// SNAT and DNAT entries of a gateway, `None` when the gateway is gone
    pub async fn describe_nat_gateway_detail(
        &self,
        ctx: &OpContext,
        nat_gateway_id: &str,
    ) -> Result<Option<DescribeNatGatewayDetailResponse>> {
        let request = DescribeNatGatewayDetailRequest {
            nat_gateway_id: nat_gateway_id.to_string(),
        };
        found(self.send(ctx, &request).await)
    }

    pub async fn describe_snat_entry(
        &self,
        ctx: &OpContext,
        nat_gateway_id: &str,
        snat_entry_id: &str,
    ) -> Result<Option<SnatEntry>> {
        let Some(detail) = self.describe_nat_gateway_detail(ctx, nat_gateway_id).await? else {
            return Ok(None);
        };
        Ok(detail.snats.into_iter().find(|s| s.snat_entry_id == snat_entry_id))
    }

    pub async fn describe_dnat_entry(
        &self,
        ctx: &OpContext,
        nat_gateway_id: &str,
        dnat_entry_id: &str,
    ) -> Result<Option<DnatEntry>> {
        let Some(detail) = self.describe_nat_gateway_detail(ctx, nat_gateway_id).await? else {
            return Ok(None);
        };
        Ok(detail.dnats.into_iter().find(|s| s.dnat_entry_id == dnat_entry_id))
    }
}
