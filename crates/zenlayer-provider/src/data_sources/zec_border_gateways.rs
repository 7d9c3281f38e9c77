//! `zenlayercloud_zec_border_gateways`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::BorderGatewayFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::BorderGatewayInfo;

pub struct BorderGatewaysDataSource;

fn project(zbg: &BorderGatewayInfo) -> Value {
    json!({
        "id": zbg.zbg_id,
        "name": zbg.name,
        "vpc_id": zbg.vpc_id,
        "region_id": zbg.region_id,
        "asn": zbg.asn,
        "advertised_cidrs": zbg.advertised_cidrs,
        "nat_gateway_id": zbg.nat_id,
        "inter_connect_cidr": zbg.inter_connect_cidr,
        "create_time": zbg.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for BorderGatewaysDataSource {
    fn type_name(&self) -> &'static str {
        "zec_border_gateways"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "border_gateways", true)
            .with_description("Query border gateways")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String))
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = BorderGatewayFilter {
            ids: d.get_string_list("ids"),
            vpc_id: d.get_string("vpc_id"),
            region_id: d.get_string("region_id"),
            ..Default::default()
        };
        let gateways = meta.zec().describe_border_gateways_by_filter(ctx, &filter).await?;
        let entries = gateways
            .iter()
            .filter(|zbg| names.matches(&zbg.name))
            .map(|zbg| (zbg.zbg_id.clone(), project(zbg)))
            .collect();
        publish(d, "border_gateways", entries).await
    }
}
