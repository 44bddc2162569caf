//! End-to-end tests for the transfer engine over the Drive adapter
//!
//! Runs `WalkTreeUseCase` and `TransferItemsUseCase` against a mocked
//! Drive API to check expansion order, fallback resolution and the
//! cross-domain refusal message.

use handover_core::domain::{
    ErrorKind, ItemId, TransferMode, TransferRequest, OWNERSHIP_UNSUPPORTED_MESSAGE,
};
use handover_core::usecases::{
    TransferItemsUseCase, TransferOptions, WalkTreeUseCase, DEFAULT_MAX_DEPTH,
};
use serde_json::json;
use wiremock::MockServer;

use crate::common;

const TARGET: &str = "new.owner@example.com";

/// folderA { fileB, folderC { fileD } }
async fn mount_nested(server: &MockServer) {
    common::mount_folder(
        server,
        "folderA",
        "A",
        json!([common::file_json("fileB", "b.txt")]),
        json!([common::folder_json("folderC", "C")]),
    )
    .await;
    common::mount_folder(
        server,
        "folderC",
        "C",
        json!([common::file_json("fileD", "d.txt")]),
        json!([]),
    )
    .await;
    common::mount_item(server, common::file_json("fileB", "b.txt")).await;
    common::mount_item(server, common::file_json("fileD", "d.txt")).await;
}

#[tokio::test]
async fn test_walk_over_http_is_pre_order() {
    let (server, provider) = common::setup_provider().await;
    mount_nested(&server).await;

    let walker = WalkTreeUseCase::new(provider, DEFAULT_MAX_DEPTH);
    let ids = walker
        .walk(&ItemId::new("folderA".into()).unwrap())
        .await
        .expect("walk failed");

    let ids: Vec<_> = ids.iter().map(|i| i.as_str()).collect();
    assert_eq!(ids, vec!["fileB", "folderC", "fileD"]);
}

#[tokio::test]
async fn test_ownership_transfer_of_folder_tree() {
    let (server, provider) = common::setup_provider().await;
    mount_nested(&server).await;
    for id in ["folderA", "fileB", "folderC", "fileD"] {
        common::mount_permission_ok(&server, id, "owner").await;
    }

    let engine = TransferItemsUseCase::new(provider, TransferOptions::default());
    let request = TransferRequest::parse(&["folderA"], TARGET, TransferMode::TransferOwnership)
        .unwrap();
    let report = engine.transfer(&request).await;

    assert_eq!(report.total, 4);
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    let names: Vec<_> = report.successes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "b.txt", "C", "d.txt"]);
}

#[tokio::test]
async fn test_share_mode_resolves_folder_root_by_fallback() {
    let (server, provider) = common::setup_provider().await;
    common::mount_folder(&server, "folderX", "Team", json!([]), json!([])).await;
    common::mount_permission_ok(&server, "folderX", "writer").await;

    let engine = TransferItemsUseCase::new(provider, TransferOptions::default());
    let request = TransferRequest::parse(&["folderX"], TARGET, TransferMode::Share).unwrap();
    let report = engine.transfer(&request).await;

    assert_eq!(report.total, 1);
    assert_eq!(report.successes[0].name, "Team");
}

#[tokio::test]
async fn test_cross_domain_refusal_recommends_share_mode() {
    let (server, provider) = common::setup_provider().await;
    common::mount_item(&server, common::file_json("fileA", "a.txt")).await;
    common::mount_permission_error(
        &server,
        "fileA",
        403,
        "ownershipChangeAcrossDomainNotPermitted",
        "Ownership can only be transferred to another user in the same organization as the current owner.",
    )
    .await;

    let engine = TransferItemsUseCase::new(provider, TransferOptions::default());
    let request =
        TransferRequest::parse(&["fileA"], TARGET, TransferMode::TransferOwnership).unwrap();
    let report = engine.transfer(&request).await;

    assert_eq!(report.total, 1);
    assert_eq!(report.failures[0].kind, ErrorKind::UnsupportedTransfer);
    assert_eq!(report.failures[0].error, OWNERSHIP_UNSUPPORTED_MESSAGE);
}

#[tokio::test]
async fn test_missing_item_is_recorded_and_batch_continues() {
    let (server, provider) = common::setup_provider().await;
    common::mount_item_error(&server, "ghost", 404, "notFound").await;
    common::mount_item(&server, common::file_json("fileA", "a.txt")).await;
    common::mount_permission_ok(&server, "fileA", "writer").await;

    let engine = TransferItemsUseCase::new(provider, TransferOptions::default());
    let request = TransferRequest::parse(&["ghost", "fileA"], TARGET, TransferMode::Share).unwrap();
    let report = engine.transfer(&request).await;

    assert_eq!(report.total, 2);
    assert_eq!(report.total, report.successes.len() + report.failures.len());
    assert_eq!(report.failures[0].id.as_str(), "ghost");
    assert_eq!(report.failures[0].kind, ErrorKind::NotFound);
    assert_eq!(report.successes[0].id.as_str(), "fileA");
}
