// src/synth_options.rs
//! Fixed, deterministic synthesis configuration.
//!
//! Integration apps are synthesized against a fake account and region with
//! every environment lookup answered from context, so that the output does
//! not depend on the machine or credentials the verifier runs with.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, Result};

pub const TEST_ACCOUNT: &str = "12345678";
pub const TEST_REGION: &str = "test-region";

const AVAILABILITY_ZONE_FALLBACK_CONTEXT_KEY: &str = "@aws-cdk/core:availabilityZoneFallback";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthOptions {
    /// Context values handed to the app as `CDK_CONTEXT_JSON`.
    #[serde(default)]
    pub context: BTreeMap<String, Value>,
    /// Extra environment variables for the app process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for SynthOptions {
    fn default() -> Self {
        let zones = json!(["test-region-1a", "test-region-1b", "test-region-1c"]);
        let ssm = |parameter: &str| {
            format!("ssm:account={TEST_ACCOUNT}:parameterName={parameter}:region={TEST_REGION}")
        };

        let mut context = BTreeMap::new();
        context.insert(AVAILABILITY_ZONE_FALLBACK_CONTEXT_KEY.to_string(), zones.clone());
        context.insert(
            format!("availability-zones:account={TEST_ACCOUNT}:region={TEST_REGION}"),
            zones,
        );
        context.insert(
            ssm("/aws/service/ami-amazon-linux-latest/amzn-ami-hvm-x86_64-gp2"),
            json!("ami-1234"),
        );
        context.insert(
            ssm("/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2"),
            json!("ami-1234"),
        );
        context.insert(
            ssm("/aws/service/ecs/optimized-ami/amazon-linux/recommended"),
            json!("{\"image_id\": \"ami-1234\"}"),
        );
        context.insert(
            format!(
                "ami:account={TEST_ACCOUNT}:filters.image-type.0=machine:filters.name.0=amzn-ami-vpc-nat-*:filters.state.0=available:owners.0=amazon:region={TEST_REGION}"
            ),
            json!("ami-1234"),
        );
        context.insert(
            format!(
                "vpc-provider:account={TEST_ACCOUNT}:filter.isDefault=true:region={TEST_REGION}:returnAsymmetricSubnets=true"
            ),
            default_vpc(),
        );

        let env = BTreeMap::from([
            ("CDK_INTEG_ACCOUNT".to_string(), TEST_ACCOUNT.to_string()),
            ("CDK_INTEG_REGION".to_string(), TEST_REGION.to_string()),
        ]);

        Self { context, env }
    }
}

fn default_vpc() -> Value {
    json!({
        "vpcId": "vpc-60900905",
        "subnetGroups": [
            {
                "type": "Public",
                "name": "Public",
                "subnets": [
                    {
                        "cidr": "172.31.0.0/20",
                        "subnetId": "subnet-e19455ca",
                        "availabilityZone": "us-east-1a",
                        "routeTableId": "rtb-e19455ca"
                    },
                    {
                        "cidr": "172.31.16.0/20",
                        "subnetId": "subnet-e0c24797",
                        "availabilityZone": "us-east-1b",
                        "routeTableId": "rtb-e0c24797"
                    },
                    {
                        "cidr": "172.31.32.0/20",
                        "subnetId": "subnet-ccd77395",
                        "availabilityZone": "us-east-1c",
                        "routeTableId": "rtb-ccd77395"
                    }
                ]
            }
        ]
    })
}

impl SynthOptions {
    /// Load options from a YAML (or JSON, which is valid YAML) file.
    ///
    /// Keys missing from the file fall back to empty maps, not to the
    /// built-in defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| AppError::SynthOptions {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The context serialized the way apps expect it in `CDK_CONTEXT_JSON`.
    #[must_use]
    pub fn context_json(&self) -> String {
        Value::Object(self.context.clone().into_iter().collect()).to_string()
    }
}
