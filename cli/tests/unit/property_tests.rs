//! Property-based tests for ledger, mount translation, config validation and
//! reconciler invariants.
//!
//! Uses `proptest` to verify invariants across many random inputs.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

use riot_cli::application::services::deploy::{DeployTarget, deploy};
use riot_cli::domain::{
    Application, Ledger, RunConfig, VALID_CONFIG_KEYS, runtime_config, validate_config_key,
};

use crate::helpers::{Call, MockRuntime, RecordingProgress, node, pinned_ledger, prod};

fn path() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}(/[a-z]{1,8}){0,2}"
}

proptest! {
    /// Mounts mirror the volume mapping one-to-one; no volumes means no mounts.
    #[test]
    fn prop_runtime_config_mirrors_volumes(
        volumes in proptest::collection::btree_map(path(), path(), 0..6),
        privileged in proptest::bool::ANY,
    ) {
        let cfg = runtime_config(&RunConfig { privileged, volumes: volumes.clone() });
        prop_assert_eq!(cfg.privileged, privileged);
        match cfg.mounts {
            None => prop_assert!(volumes.is_empty()),
            Some(mounts) => {
                prop_assert!(!mounts.is_empty());
                let got: BTreeMap<String, String> =
                    mounts.into_iter().map(|m| (m.source, m.target)).collect();
                prop_assert_eq!(got, volumes);
            }
        }
    }

    /// Any sequence of records leaves one entry per pair, holding the last id.
    #[test]
    fn prop_record_instance_keeps_one_entry_per_pair(
        records in proptest::collection::vec(("[a-c]", "n[1-3]", "c[0-9]{1,3}"), 0..30),
    ) {
        let mut ledger = Ledger::default();
        let mut last = BTreeMap::new();
        for (app, node, id) in &records {
            ledger.record_instance(app, node, id.clone());
            last.insert((app.clone(), node.clone()), id.clone());
        }
        let pairs: BTreeSet<(String, String)> = records
            .iter()
            .map(|(a, n, _)| (a.clone(), n.clone()))
            .collect();
        prop_assert_eq!(ledger.deployments().count(), pairs.len());
        for ((app, node), id) in &last {
            prop_assert_eq!(ledger.prior_instance(app, node), Some(id.as_str()));
        }
    }

    /// Keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z_]{1,20}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }

    /// A deploy stops exactly the recorded instance (if any), and records the
    /// id the runtime created.
    #[test]
    fn prop_deploy_replaces_exactly_the_prior_instance(
        prior in proptest::option::of("c0-[a-z]{1,6}"),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let mut ledger = pinned_ledger();
        if let Some(id) = &prior {
            ledger.record_instance("web", "n1", id.clone());
        }
        let runtime = MockRuntime::new();
        let app = Application { name: "web".into(), run: RunConfig::default() };
        let node = node("n1");
        let env = prod();
        let progress = RecordingProgress::default();
        let target = DeployTarget { application: &app, node: &node, environment: &env };

        let ledger = rt
            .block_on(deploy(target, ledger, &runtime, &progress, &progress, &CancellationToken::new()))
            .expect("deploy");

        let stops: Vec<String> = runtime
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Stop(id, None) => Some(id),
                _ => None,
            })
            .collect();
        prop_assert_eq!(stops, prior.into_iter().collect::<Vec<_>>());
        prop_assert_eq!(ledger.prior_instance("web", "n1"), Some("c1"));
    }
}
