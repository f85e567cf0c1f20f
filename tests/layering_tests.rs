//! The domain layer depends on nothing outside itself

use std::fs;
use std::path::Path;

use gold_price_feed_lib::domain::{ExtractionError, HistorySnapshot, SnapshotStore};

fn domain_sources() -> Vec<(String, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = vec![root.join("domain.rs")];
    for entry in fs::read_dir(root.join("domain")).unwrap() {
        files.push(entry.unwrap().path());
    }

    files
        .into_iter()
        .map(|path| (path.display().to_string(), fs::read_to_string(&path).unwrap()))
        .collect()
}

#[test]
fn test_domain_never_imports_outer_layers() {
    for (path, source) in domain_sources() {
        for layer in ["crate::infrastructure", "crate::application"] {
            assert!(!source.contains(layer), "{path} reaches into {layer}");
        }
    }
}

struct NeverSaved;

impl SnapshotStore for NeverSaved {
    fn load(&self) -> anyhow::Result<Option<HistorySnapshot>> {
        Ok(None)
    }

    fn save(&self, _snapshot: &HistorySnapshot) -> anyhow::Result<()> {
        Err(ExtractionError::source_unavailable("read-only store").into())
    }
}

#[test]
fn test_store_seam_accepts_any_error() {
    let store = NeverSaved;
    assert!(store.load().unwrap().is_none());

    let err = store.save(&HistorySnapshot::empty(chrono::Utc::now())).unwrap_err();
    assert!(err.downcast_ref::<ExtractionError>().is_some());
}
