use std::path::Path;

use sshmate::document::{self, SshHostConfig};
use sshmate::files;
use tempfile::tempdir;

async fn read_back(path: &Path) -> String {
    files::read_text(path).await.unwrap()
}

#[tokio::test]
async fn test_full_read_modify_write_cycle() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config");

    let original = "# managed manually\nHost web\n  HostName web.internal\n  User deploy\n";
    files::write_text(&config_path, original).await.unwrap();

    // read -> parse -> mutate -> serialize -> write
    let text = files::read_text(&config_path).await.unwrap();
    let mut doc = document::parse(&text);
    let mut host = SshHostConfig::with_defaults("db");
    host.apply_option("HostName", "db.internal");
    doc.add_host(host);
    files::write_text(&config_path, &doc.serialize()).await.unwrap();

    let written = read_back(&config_path).await;
    // the untouched block and comment are byte-exact
    assert!(written.starts_with(original));
    let reparsed = document::parse(&written);
    assert_eq!(reparsed.hosts.len(), 2);
    assert_eq!(reparsed.find_host("db").unwrap().host_name.as_deref(), Some("db.internal"));
}

#[tokio::test]
async fn test_missing_config_reads_as_empty_document() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config");

    let text = files::read_text_or_empty(&config_path).await.unwrap();
    let doc = document::parse(&text);
    assert!(doc.hosts.is_empty());
}

#[tokio::test]
async fn test_write_creates_parent_directory() {
    let temp_dir = tempdir().unwrap();
    let nested = temp_dir.path().join("deep").join("config");

    files::write_text(&nested, "Host a\n  Port 22").await.unwrap();
    assert!(files::exists(&nested).await);
}

#[tokio::test]
async fn test_typed_not_found_error() {
    let missing = Path::new("/definitely/not/a/real/config");
    let err = files::read_text(missing).await.unwrap_err();
    assert!(matches!(err, files::FileError::NotFound { .. }));
}

#[tokio::test]
async fn test_last_writer_wins_without_locking() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config");
    files::write_text(&config_path, "Host a\n  Port 1").await.unwrap();

    // two independent read-modify-write cycles over the same file
    let doc_a = {
        let mut doc = document::parse(&read_back(&config_path).await);
        doc.add_host(SshHostConfig::new("from-a"));
        doc
    };
    let doc_b = {
        let mut doc = document::parse(&read_back(&config_path).await);
        doc.add_host(SshHostConfig::new("from-b"));
        doc
    };

    files::write_text(&config_path, &doc_a.serialize()).await.unwrap();
    files::write_text(&config_path, &doc_b.serialize()).await.unwrap();

    let final_doc = document::parse(&read_back(&config_path).await);
    assert!(final_doc.find_host("from-b").is_some());
    // the first write was silently overwritten
    assert!(final_doc.find_host("from-a").is_none());
}
