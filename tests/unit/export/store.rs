use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "slidetext_{name}_{}_{}",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    assert_eq!(normalize_rel_path("a/./b//c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("a/../b").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
    assert!(normalize_rel_path("photos/a?v=2.png").is_err());
    assert!(normalize_rel_path("photos/a#1.png").is_err());
}

#[test]
fn split_expiry_reads_query() {
    let (base, exp) = split_expiry("mem://a.png?expires=42").unwrap();
    assert_eq!(base, "mem://a.png");
    assert_eq!(exp, Some(42));
    assert_eq!(split_expiry("mem://a.png").unwrap(), ("mem://a.png", None));
    assert!(split_expiry("mem://a.png?expires=soon").is_err());

    let (base, exp) = split_expiry("file:///r/a?v=2.png?expires=7").unwrap();
    assert_eq!(base, "file:///r/a?v=2.png");
    assert_eq!(exp, Some(7));
}

#[test]
fn image_ref_with_query_delimiter_is_rejected_before_signing() {
    let root = temp_dir("query_ref");
    let store = DirStore::new(&root);
    let err = store
        .signed_url("photos/a?v=2.png", Duration::from_secs(60))
        .unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));

    let mem = InMemoryStore::new();
    assert!(mem.insert_source("photos/a?v=2.png", vec![1]).is_err());
    assert!(mem.signed_url("photos/a#x.png", Duration::from_secs(60)).is_err());
}

#[test]
fn in_memory_sources_are_keyed_by_normalized_ref() {
    let store = InMemoryStore::new();
    store.insert_source("./img\\a.png", vec![7]).unwrap();
    let url = store
        .signed_url("img/a.png", Duration::from_secs(60))
        .unwrap();
    assert_eq!(store.fetch(&url, Duration::from_secs(1)).unwrap(), vec![7]);
}

#[test]
fn in_memory_store_serves_sources_and_records_uploads() {
    let store = InMemoryStore::new();
    store.insert_source("img/a.png", vec![1, 2, 3]).unwrap();

    let url = store
        .signed_url("img/a.png", Duration::from_secs(60))
        .unwrap();
    assert!(url.starts_with("mem://img/a.png?expires="));
    assert_eq!(
        store.fetch(&url, Duration::from_secs(1)).unwrap(),
        vec![1, 2, 3]
    );

    let out = store.put("rendered/o/s/a-1", vec![9], "image/png").unwrap();
    assert_eq!(out, "mem://rendered/o/s/a-1");
    let stored = store.upload("rendered/o/s/a-1").unwrap();
    assert_eq!(stored.bytes, vec![9]);
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(store.uploads().len(), 1);
}

#[test]
fn in_memory_fetch_of_missing_object_is_transport_error() {
    let store = InMemoryStore::new();
    let url = store.signed_url("nope.png", Duration::from_secs(60)).unwrap();
    let err = store.fetch(&url, Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, SlideError::Transport(_)));
}

#[test]
fn expired_url_is_rejected() {
    let store = InMemoryStore::new();
    store.insert_source("a.png", vec![1]).unwrap();
    let err = store
        .fetch("mem://a.png?expires=1", Duration::from_secs(1))
        .unwrap_err();
    assert!(err.to_string().contains("expired"));
}

#[test]
fn dir_store_writes_under_root() {
    let root = temp_dir("dir_store");
    let store = DirStore::new(&root);

    let url = store.put("rendered/o/s/x-7", vec![4, 5], "image/png").unwrap();
    assert!(url.starts_with("file://"));
    assert!(url.ends_with("rendered/o/s/x-7"));
    assert_eq!(
        std::fs::read(root.join("rendered/o/s/x-7")).unwrap(),
        vec![4, 5]
    );

    let signed = store.signed_url("img/a.png", Duration::from_secs(5)).unwrap();
    assert!(signed.contains("img/a.png?expires="));
    assert!(store.put("../escape", vec![], "image/png").is_err());

    let _ = std::fs::remove_dir_all(&root);
}
