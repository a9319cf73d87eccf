//! Integration tests for the mirror engine
//!
//! These tests run the full fetch/retry/archive cycle against wiremock
//! servers.

use sitezip::archive::build_archive;
use sitezip::config::Config;
use sitezip::mirror::Coordinator;
use sitezip::MirrorError;
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::ZipArchive;

/// Creates a test configuration with fast retry timings
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.fetch.pool_size = 4;
    config.fetch.request_timeout_secs = 5;
    config.retry.max_attempts = 2;
    config.retry.base_delay_ms = 10;
    config.retry.backoff_factor = 2;
    config
}

/// Reads the sorted entry names out of an in-memory archive
fn entry_names(bytes: Vec<u8>) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_mirror_with_all_resource_kinds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head>
                <link rel="stylesheet" href="/style.css">
            </head><body>
                <script src="/app.js"></script>
                <img src="images/logo.png">
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body { margin: 0 }"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("console.log(1)"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let snapshot = coordinator.mirror(&mock_server.uri()).await.unwrap();

    assert_eq!(snapshot.discovered, 3);
    assert_eq!(snapshot.succeeded, 3);
    assert_eq!(snapshot.failed, 0);
    assert_eq!(snapshot.origin.folder_name(), "127_0_0_1");

    let names = entry_names(build_archive(&snapshot).unwrap());
    assert_eq!(
        names,
        vec!["css/style.css", "html/index.html", "images/logo.png", "js/app.js"]
    );
}

#[tokio::test]
async fn test_root_fetch_failure_dispatches_no_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // The root document is never fetched successfully, so no resource fetch
    // may ever be dispatched
    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let result = coordinator.mirror(&mock_server.uri()).await;

    match result {
        Err(MirrorError::RootFetchStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected root fetch status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_root_fetch_is_never_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let result = coordinator.mirror(&mock_server.uri()).await;

    assert!(matches!(
        result,
        Err(MirrorError::RootFetchStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_invalid_url_rejected_before_any_network_call() {
    let coordinator = Coordinator::new(create_test_config()).unwrap();

    let result = coordinator.mirror("not a url").await;
    assert!(matches!(result, Err(MirrorError::Url(_))));

    let result = coordinator.mirror("data:text/plain,hi").await;
    assert!(matches!(result, Err(MirrorError::Url(_))));
}

#[tokio::test]
async fn test_exhausted_resource_is_recorded_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <script src="/good.js"></script>
                <img src="/gone.png">
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/good.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    // Always fails; with max_attempts = 2 it must be hit exactly twice
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let snapshot = coordinator.mirror(&mock_server.uri()).await.unwrap();

    assert_eq!(snapshot.discovered, 2);
    assert_eq!(snapshot.succeeded, 1);
    assert_eq!(snapshot.failed, 1);

    // The failed resource is omitted from the archive, not an error
    let names = entry_names(build_archive(&snapshot).unwrap());
    assert_eq!(names, vec!["html/index.html", "js/good.js"]);
}

#[tokio::test]
async fn test_transient_failure_recovers_on_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><img src="/flaky.png"></body></html>"#),
        )
        .mount(&mock_server)
        .await;

    // First attempt fails, second succeeds
    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pixels"))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let snapshot = coordinator.mirror(&mock_server.uri()).await.unwrap();

    assert_eq!(snapshot.succeeded, 1);
    assert_eq!(snapshot.failed, 0);

    let names = entry_names(build_archive(&snapshot).unwrap());
    assert!(names.contains(&"images/flaky.png".to_string()));
}

#[tokio::test]
async fn test_filename_less_resource_fetched_but_not_archived() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><img src="/assets/"></body></html>"#),
        )
        .mount(&mock_server)
        .await;

    // The fetch itself happens and succeeds
    Mock::given(method("GET"))
        .and(path("/assets/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let snapshot = coordinator.mirror(&mock_server.uri()).await.unwrap();

    // Counted as a success in the summary
    assert_eq!(snapshot.succeeded, 1);
    assert_eq!(snapshot.failed, 0);

    // But never materialized in the archive
    let names = entry_names(build_archive(&snapshot).unwrap());
    assert_eq!(names, vec!["html/index.html"]);
}

#[tokio::test]
async fn test_duplicate_references_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <img src="/logo.png">
                <img src="/logo.png">
                <img src="/logo.png">
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let snapshot = coordinator.mirror(&mock_server.uri()).await.unwrap();

    assert_eq!(snapshot.discovered, 1);
    assert_eq!(snapshot.succeeded, 1);
}

#[tokio::test]
async fn test_mirroring_twice_yields_identical_entry_sets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><link rel="stylesheet" href="/a.css"></head>
               <body><script src="/b.js"></script></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("b"))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let first = coordinator.mirror(&mock_server.uri()).await.unwrap();
    let second = coordinator.mirror(&mock_server.uri()).await.unwrap();

    assert_eq!(
        entry_names(build_archive(&first).unwrap()),
        entry_names(build_archive(&second).unwrap())
    );
}
