use super::*;
use crate::export::store::{DirStore, ObjectStore};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "slidetext_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn reads_signed_file_urls() {
    let root = temp_dir("fetch_file");
    std::fs::create_dir_all(root.join("img")).unwrap();
    std::fs::write(root.join("img/a.bin"), [7u8, 8, 9]).unwrap();

    let store = DirStore::new(&root);
    let url = store.signed_url("img/a.bin", Duration::from_secs(60)).unwrap();
    let fetcher = UrlFetcher::new().unwrap();
    assert_eq!(
        fetcher.fetch(&url, Duration::from_secs(1)).unwrap(),
        vec![7, 8, 9]
    );

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_file_is_transport_error() {
    let fetcher = UrlFetcher::new().unwrap();
    let err = fetcher
        .fetch("file:///definitely/not/here.png", Duration::from_secs(1))
        .unwrap_err();
    assert!(matches!(err, SlideError::Transport(_)));
}

#[test]
fn unknown_scheme_is_rejected() {
    let fetcher = UrlFetcher::new().unwrap();
    let err = fetcher
        .fetch("ftp://host/a.png", Duration::from_secs(1))
        .unwrap_err();
    assert!(err.to_string().contains("unsupported url scheme"));
}
