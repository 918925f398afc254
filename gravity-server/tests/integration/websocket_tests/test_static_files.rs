use reqwest::StatusCode;

use gravity_server::RelayConfig;

use crate::integration::{init_tracing, start_server, start_server_with};
use crate::utils::TestClient;

const PAGE: &str = "<!doctype html><title>gravity</title>";

#[tokio::test]
async fn test_static_dir_served_next_to_ws() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), PAGE).unwrap();
    std::fs::create_dir(dir.path().join("js")).unwrap();
    std::fs::write(dir.path().join("js").join("app.js"), "connect();").unwrap();

    let addr = start_server_with(RelayConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..RelayConfig::default()
    })
    .await;

    let index = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(index.text().await.unwrap(), PAGE);

    let script = reqwest::get(format!("http://{addr}/js/app.js")).await.unwrap();
    assert_eq!(script.status(), StatusCode::OK);
    assert_eq!(script.text().await.unwrap(), "connect();");

    let missing = reqwest::get(format!("http://{addr}/nope.css")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    // The signaling endpoint still upgrades.
    let mut client = TestClient::connect(addr).await.expect("connects");
    client.join("r1").await.expect("joins");
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_no_static_dir_means_no_files() {
    init_tracing();

    let addr = start_server().await;

    let index = reqwest::get(format!("http://{addr}/index.html")).await.unwrap();
    assert_eq!(index.status(), StatusCode::NOT_FOUND);
}
