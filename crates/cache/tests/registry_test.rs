use pipestat_cache::{CacheDirectory, JobRegistry};
use pipestat_core::{CiStage, Error, JobDescriptor};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn job(id: &str, pipeline: &str, stage: CiStage) -> JobDescriptor {
    JobDescriptor::builder(pipeline, stage, format!("run {id}"))
        .job_id(id)
        .tag("stats-group:compile")
        .build()
}

fn fresh_registry(temp_dir: &TempDir, name: &str) -> JobRegistry {
    let cache = CacheDirectory::new(temp_dir.path().join(name));
    cache.create_layout().unwrap();
    JobRegistry::new(cache)
}

#[test]
fn test_consolidate_preserves_run_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let registry = fresh_registry(&temp_dir, "run");
    fs::write(
        registry.cache().cache_file(),
        r#"{"project": "foo", "run_id": "r1", "jobs": []}"#,
    )
    .unwrap();

    registry.register(&job("a", "foo", CiStage::Build)).unwrap();
    registry.register(&job("b", "foo", CiStage::Test)).unwrap();
    registry.consolidate().unwrap();

    let cache_file = registry.cache().read_cache_file().unwrap();
    assert_eq!(cache_file.project(), Some("foo"));
    assert_eq!(cache_file.run_id(), Some("r1"));
    let ids: Vec<_> = cache_file.jobs.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn test_consolidate_without_existing_cache_file() {
    let temp_dir = TempDir::new().unwrap();
    let registry = fresh_registry(&temp_dir, "run");
    registry.register(&job("a", "foo", CiStage::Report)).unwrap();

    let cache_file = registry.consolidate().unwrap();

    assert_eq!(cache_file.jobs.len(), 1);
    assert_eq!(registry.cache().read_cache_file().unwrap(), cache_file);
}

#[test]
fn test_malformed_job_file_commits_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let registry = fresh_registry(&temp_dir, "run");
    let original = "{\n  \"jobs\": []\n}\n";
    fs::write(registry.cache().cache_file(), original).unwrap();

    registry.register(&job("a", "foo", CiStage::Build)).unwrap();
    fs::write(
        registry.cache().jobs_dir().join("broken.json"),
        r#"{"job_id": "broken", "ci_stage": "deploy"}"#,
    )
    .unwrap();

    let err = registry.consolidate().unwrap_err();
    assert!(matches!(err, Error::MalformedJob { ref path, .. } if path.ends_with("broken.json")));
    assert_eq!(
        fs::read_to_string(registry.cache().cache_file()).unwrap(),
        original
    );
}

proptest! {
    #[test]
    fn prop_consolidation_is_independent_of_registration_order(
        ids in proptest::collection::btree_set("[a-z0-9]{1,8}", 1..12)
            .prop_flat_map(|ids| {
                let ids: Vec<String> = ids.into_iter().collect();
                (Just(ids.clone()), Just(ids).prop_shuffle())
            })
    ) {
        let (sorted, shuffled) = ids;
        let temp_dir = TempDir::new().unwrap();
        let in_order = fresh_registry(&temp_dir, "ordered");
        let out_of_order = fresh_registry(&temp_dir, "shuffled");

        for id in &sorted {
            in_order.register(&job(id, "foo", CiStage::Build)).unwrap();
        }
        for id in &shuffled {
            out_of_order.register(&job(id, "foo", CiStage::Build)).unwrap();
        }

        let a = in_order.consolidate().unwrap().jobs;
        let b = out_of_order.consolidate().unwrap().jobs;
        prop_assert_eq!(&a, &b);

        let mut consolidated: Vec<_> = a.iter().map(|j| j.job_id.clone()).collect();
        consolidated.sort();
        prop_assert_eq!(consolidated, sorted);
    }
}
