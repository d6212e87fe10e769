//! The process-wide model cache. Kept in its own test binary with a single
//! test so no other test initializes the global first.

use std::path::PathBuf;

use cardiorisk::{ModelCache, ModelFormat};

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/heart_demo.json")
}

#[test]
fn first_caller_configures_the_global_cache() {
    let first = ModelCache::global(Some(demo_model_path()), ModelFormat::Auto);
    assert_eq!(first.load_count(), 0);
    assert!(first.model().is_some());
    assert_eq!(first.load_count(), 1);

    let dir = tempfile::tempdir().unwrap();
    let other = dir.path().join("other.json");
    let second = ModelCache::global(Some(other), ModelFormat::Dense);

    assert!(std::ptr::eq(first, second));
    assert_eq!(second.path(), Some(demo_model_path().as_path()));
    assert!(second.model().is_some());
    assert_eq!(second.load_count(), 1);
}
