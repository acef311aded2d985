// src/regions.rs

//! AWS region identifiers known to the crawler.

/// Region used when a selection would otherwise be empty, and for `GLOBAL`.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Pseudo-region meaning "run once, in [`DEFAULT_REGION`]".
pub const GLOBAL: &str = "GLOBAL";

/// Commercial-partition regions.
pub const ALL_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-east-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "mx-central-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// Source of valid region identifiers.
pub trait RegionRegistry: Send + Sync {
    fn all_regions(&self) -> Vec<String>;

    fn is_known(&self, region: &str) -> bool {
        self.all_regions().iter().any(|r| r == region)
    }
}

/// Registry backed by [`ALL_REGIONS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegions;

impl RegionRegistry for StaticRegions {
    fn all_regions(&self) -> Vec<String> {
        ALL_REGIONS.iter().map(|r| r.to_string()).collect()
    }

    fn is_known(&self, region: &str) -> bool {
        ALL_REGIONS.contains(&region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_known() {
        assert!(StaticRegions.is_known(DEFAULT_REGION));
        assert!(!StaticRegions.is_known(GLOBAL));
        assert!(!StaticRegions.is_known("mars-west-1"));
    }
}
