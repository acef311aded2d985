// tests/properties.rs

mod common;
use crate::common::{FakeAccount, OrganizationBuilder};

use std::collections::BTreeSet;
use std::sync::Arc;

use orgcrawler::crawler::{
    Crawler, CrawlerOptions, ExecuteOptions, FnPayload, RegionSelector,
};
use orgcrawler::org::{Account, Directory};
use orgcrawler::regions::ALL_REGIONS;
use proptest::prelude::*;
use serde_json::json;

// Pick a non-empty subset of known regions by index.
fn region_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(0..ALL_REGIONS.len(), 1..6)
        .prop_map(|idx| idx.into_iter().map(|i| ALL_REGIONS[i].to_string()).collect())
}

fn build_crawler(accounts: usize, regions: Vec<String>) -> Crawler<Directory<FakeAccount>> {
    let org = OrganizationBuilder::new().with_accounts(accounts).build();
    Crawler::new(org, CrawlerOptions::default().regions(RegionSelector::Named(regions)))
        .expect("generated selection is valid")
}

// Deterministic payload; returns the response contents as a comparable set.
fn run(
    crawler: &mut Crawler<Directory<FakeAccount>>,
    workers: usize,
) -> BTreeSet<(String, String, String)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    let payload = FnPayload::new("tag", |region: String, account: Arc<FakeAccount>| async move {
        Ok::<_, anyhow::Error>(json!(format!("{}@{}", account.id(), region)))
    });

    let execution = runtime
        .block_on(crawler.execute(payload, ExecuteOptions::default().workers(workers)))
        .unwrap();

    execution
        .responses()
        .iter()
        .map(|r| {
            (
                r.region().to_string(),
                r.account().name().to_string(),
                r.output().unwrap().to_string(),
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn responses_cover_the_cross_product(
        accounts in 1..6usize,
        regions in region_strategy(),
        workers in 1..8usize,
    ) {
        let region_count = regions.len();
        let mut crawler = build_crawler(accounts, regions);
        let responses = run(&mut crawler, workers);

        prop_assert_eq!(responses.len(), accounts * region_count);
        let execution = crawler.get_execution("tag").unwrap();
        prop_assert_eq!(execution.responses().len(), accounts * region_count);
        prop_assert!(!execution.has_errors());
    }

    #[test]
    fn worker_count_does_not_change_results(
        accounts in 1..5usize,
        regions in region_strategy(),
    ) {
        let task_count = accounts * regions.len();
        let mut crawler = build_crawler(accounts, regions);

        let serial = run(&mut crawler, 1);
        let parallel = run(&mut crawler, task_count);

        prop_assert_eq!(serial, parallel);
    }
}
