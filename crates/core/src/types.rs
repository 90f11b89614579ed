use serde::{Deserialize, Serialize};

/// Delivery channel for a marketing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Email,
    Sms,
}

/// KYC verification tier, as exposed by the platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycTier {
    #[serde(rename = "TIER_0")]
    Tier0,
    #[serde(rename = "TIER_1")]
    Tier1,
    #[serde(rename = "TIER_2")]
    Tier2,
}

impl KycTier {
    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            KycTier::Tier0 => "TIER_0",
            KycTier::Tier1 => "TIER_1",
            KycTier::Tier2 => "TIER_2",
        }
    }
}
