use super::*;
use crate::fs::mock::MockFs;
use crate::gitea::ContentEntry;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

const REMOTE_MANIFEST: &str = r#"{
    "meta": { "version": "1.0.0", "defaultLocale": "en" },
    "identification": { "name": { "en": "English ULT" } },
    "type": {
        "flavorType": { "name": "scripture", "flavor": { "name": "textTranslation" } }
    },
    "ingredients": {
        "ingredients/GEN.usfm": { "mimeType": "text/x-usfm" },
        "ingredients/MRK.usfm": { "mimeType": "text/x-usfm" }
    }
}"#;

/// テスト用モックトランスポート
struct MockTransport {
    files: HashMap<String, Vec<u8>>,
    fail_read: Option<String>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
            fail_read: None,
        }
    }

    fn with_burrito() -> Self {
        let mut transport = Self::new();
        transport.add_file("metadata.json", REMOTE_MANIFEST);
        transport.add_file("ingredients/GEN.usfm", "\\id GEN");
        transport.add_file("ingredients/MRK.usfm", "\\id MRK");
        transport
    }

    fn failing(message: &str) -> Self {
        Self {
            files: HashMap::new(),
            fail_read: Some(message.to_string()),
        }
    }

    fn add_file(&mut self, path: &str, body: &str) {
        self.files.insert(path.to_string(), body.as_bytes().to_vec());
    }
}

impl ContentTransport for MockTransport {
    fn read_content<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _branch: &'a str,
        filepath: &'a str,
    ) -> Pin<Box<dyn Future<Output = crate::error::Result<ContentEntry>> + Send + 'a>> {
        let result = if let Some(message) = &self.fail_read {
            Err(SbmError::GiteaApi {
                status: 500,
                message: message.clone(),
            })
        } else if self.files.contains_key(filepath) {
            Ok(ContentEntry {
                name: None,
                path: Some(filepath.to_string()),
                download_url: Some(format!("mock://{}", filepath)),
            })
        } else {
            Ok(ContentEntry::default())
        };
        Box::pin(std::future::ready(result))
    }

    fn fetch_body<'a>(
        &'a self,
        download_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = crate::error::Result<Vec<u8>>> + Send + 'a>> {
        let result = download_url
            .strip_prefix("mock://")
            .and_then(|path| self.files.get(path).cloned())
            .ok_or_else(|| SbmError::Sync(format!("unknown url: {}", download_url)));
        Box::pin(std::future::ready(result))
    }
}

fn repo() -> RepoRef {
    RepoRef::new("door43", "en_ult")
}

#[tokio::test]
async fn test_sync_success_end_to_end() {
    let transport = MockTransport::with_burrito();
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let mut snapshots = Vec::new();
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |s| {
            snapshots.push(s)
        })
        .await;

    assert!(report.is_success());
    let SyncOutcome::Succeeded {
        project_name,
        duplicate,
        ..
    } = &report.outcome
    else {
        panic!("expected success");
    };
    assert_eq!(project_name, "en_ult");
    assert!(!duplicate);

    // 転送結果: マニフェストと ingredient がプロジェクト配下にある
    assert!(fs.exists(Path::new("/projects/en_ult/metadata.json")));
    assert!(fs.exists(Path::new("/projects/en_ult/ingredients/GEN.usfm")));
    assert!(fs.exists(Path::new("/projects/en_ult/ingredients/MRK.usfm")));

    assert_eq!(report.notifications.len(), 1);
    assert_eq!(
        report.notifications[0].severity,
        crate::notify::Severity::Success
    );
}

#[tokio::test]
async fn test_sync_progress_accounting() {
    let transport = MockTransport::with_burrito();
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let mut snapshots = Vec::new();
    sync.run(&repo(), "master", "alice", Path::new("/projects"), |s| {
        snapshots.push(s)
    })
    .await;

    // total = ingredients(2) + 2、どの観測点でも completed <= total
    let running: Vec<_> = snapshots.iter().filter(|s| s.sync_started).collect();
    assert!(!running.is_empty());
    for snapshot in &running {
        assert_eq!(snapshot.total_files, 4);
        assert!(snapshot.completed_files <= snapshot.total_files);
    }
    // 最初の観測はマニフェスト取得分の1、最後の実行中観測は完了
    assert_eq!(running.first().unwrap().completed_files, 1);
    assert_eq!(running.last().unwrap().completed_files, 4);

    // 結末後は無条件にゼロの Idle 状態
    let last = snapshots.last().unwrap();
    assert!(!last.sync_started);
    assert_eq!(last.total_files, 0);
    assert_eq!(last.completed_files, 0);
    assert_eq!(sync.progress(), *last);
}

#[tokio::test]
async fn test_sync_duplicate_is_overwritten_and_flagged() {
    let transport = MockTransport::with_burrito();
    let fs = MockFs::new();
    fs.add_dir("/projects");
    fs.add_dir("/projects/en_ult");
    fs.add_file("/projects/en_ult/metadata.json", "old");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    let SyncOutcome::Succeeded { duplicate, .. } = &report.outcome else {
        panic!("expected success");
    };
    assert!(duplicate);
    assert_eq!(
        fs.file_content("/projects/en_ult/metadata.json").unwrap(),
        REMOTE_MANIFEST
    );
}

#[tokio::test]
async fn test_sync_network_failure_clears_state() {
    let transport = MockTransport::failing("connection reset by peer");
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    assert!(!report.is_success());
    let SyncOutcome::Failed { error } = &report.outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("connection reset by peer"));

    // 通知は failure で、元のエラーテキストを含む
    assert_eq!(
        report.notifications[0].severity,
        crate::notify::Severity::Failure
    );
    assert!(report.notifications[0].message.contains("connection reset by peer"));

    // セッションは null 形へ、トラッカーはゼロの Idle へ
    assert!(sync.session().is_none());
    let progress = sync.progress();
    assert!(!progress.sync_started);
    assert_eq!(progress.total_files, 0);
    assert_eq!(progress.completed_files, 0);

    // 宛先ルート配下への書き込みは発生しない
    assert!(!fs.exists(Path::new("/projects/en_ult")));
}

#[tokio::test]
async fn test_sync_missing_manifest_fails_to_read() {
    let transport = MockTransport::new();
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    let SyncOutcome::Failed { error } = &report.outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("Failed to read MetaData"));
    assert!(!fs.exists(Path::new("/projects/en_ult")));
}

#[tokio::test]
async fn test_sync_invalid_manifest_is_rejected() {
    let mut transport = MockTransport::new();
    transport.add_file(
        "metadata.json",
        r#"{ "meta": { "version": "9.9.9" }, "ingredients": {} }"#,
    );
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    let SyncOutcome::Failed { error } = &report.outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("Burrito Validation Failed"));
    assert!(!fs.exists(Path::new("/projects/en_ult")));
}

#[tokio::test]
async fn test_sync_ingredient_failure_leaves_projects_untouched() {
    let mut transport = MockTransport::new();
    transport.add_file("metadata.json", REMOTE_MANIFEST);
    // GEN だけ存在し、MRK の取得は失敗する
    transport.add_file("ingredients/GEN.usfm", "\\id GEN");
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    assert!(!report.is_success());
    // staging 段階での失敗はプロジェクトストアに触れない
    assert!(!fs.exists(Path::new("/projects/en_ult")));
    assert!(sync.session().is_none());
}

#[tokio::test]
async fn test_sync_rejects_escaping_ingredient_path() {
    let mut transport = MockTransport::new();
    transport.add_file(
        "metadata.json",
        r#"{
            "meta": { "version": "1.0.0" },
            "type": {
                "flavorType": { "name": "scripture", "flavor": { "name": "textTranslation" } }
            },
            "ingredients": { "../evil.txt": {} }
        }"#,
    );
    transport.add_file("../evil.txt", "payload");
    let fs = MockFs::new();
    fs.add_dir("/projects");

    let mut sync = RemoteSync::new(&transport, &fs);
    let report = sync
        .run(&repo(), "master", "alice", Path::new("/projects"), |_| {})
        .await;

    let SyncOutcome::Failed { error } = &report.outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("Unsafe ingredient path"));
}
