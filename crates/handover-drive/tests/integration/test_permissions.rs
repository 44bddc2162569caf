//! Integration tests for permission changes
//!
//! Verifies the `permissions.create` requests issued for ownership
//! transfers and edit grants, and how refusals are classified.

use handover_core::domain::{Email, Item, ItemId};
use handover_core::ports::{IStorageProvider, ProviderError};
use handover_drive::client::DriveClient;
use handover_drive::provider::DriveStorageProvider;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn item(id: &str) -> Item {
    Item::file(ItemId::new(id.to_string()).unwrap(), format!("{id}.txt"))
}

fn target() -> Email {
    Email::new("new.owner@example.com".to_string()).unwrap()
}

#[tokio::test]
async fn test_set_owner_requests_ownership_transfer() {
    let (server, provider) = common::setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/files/doc1/permissions"))
        .and(query_param("transferOwnership", "true"))
        .and(body_json(json!({
            "role": "owner",
            "type": "user",
            "emailAddress": "new.owner@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "role": "owner"})))
        .expect(1)
        .mount(&server)
        .await;

    provider
        .set_owner(&item("doc1"), &target())
        .await
        .expect("set_owner failed");
}

#[tokio::test]
async fn test_add_editor_grants_writer_silently_by_default() {
    let (server, provider) = common::setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/files/doc1/permissions"))
        .and(query_param("sendNotificationEmail", "false"))
        .and(body_json(json!({
            "role": "writer",
            "type": "user",
            "emailAddress": "new.owner@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p2", "role": "writer"})))
        .expect(1)
        .mount(&server)
        .await;

    provider
        .add_editor(&item("doc1"), &target())
        .await
        .expect("add_editor failed");
}

#[tokio::test]
async fn test_add_editor_can_notify() {
    let server = wiremock::MockServer::start().await;
    let provider =
        DriveStorageProvider::new(DriveClient::with_base_url(common::TOKEN, server.uri()))
            .with_notification_email(true);

    Mock::given(method("POST"))
        .and(path("/files/doc1/permissions"))
        .and(query_param("sendNotificationEmail", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p3"})))
        .expect(1)
        .mount(&server)
        .await;

    provider.add_editor(&item("doc1"), &target()).await.unwrap();
}

#[tokio::test]
async fn test_cross_domain_refusal_is_unsupported_transfer() {
    let (server, provider) = common::setup_provider().await;
    common::mount_permission_error(
        &server,
        "doc1",
        403,
        "ownershipChangeAcrossDomainNotPermitted",
        "Ownership can only be transferred to another user in the same organization as the current owner.",
    )
    .await;

    let err = provider.set_owner(&item("doc1"), &target()).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedTransfer(msg) if msg.starts_with("Ownership can only")));
}

#[tokio::test]
async fn test_invalid_sharing_request_about_owner_is_unsupported_transfer() {
    let (server, provider) = common::setup_provider().await;
    common::mount_permission_error(
        &server,
        "doc1",
        400,
        "invalidSharingRequest",
        "Bad Request. User message: \"You can't change the owner of this item.\"",
    )
    .await;

    let err = provider.set_owner(&item("doc1"), &target()).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedTransfer(_)));
}

#[tokio::test]
async fn test_plain_forbidden_is_access_denied() {
    let (server, provider) = common::setup_provider().await;
    common::mount_permission_error(
        &server,
        "doc1",
        403,
        "insufficientFilePermissions",
        "The user does not have sufficient permissions for this file.",
    )
    .await;

    let err = provider.add_editor(&item("doc1"), &target()).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::AccessDenied(
            "The user does not have sufficient permissions for this file.".to_string()
        )
    );
}

#[tokio::test]
async fn test_other_failures_keep_provider_message() {
    let (server, provider) = common::setup_provider().await;
    common::mount_permission_error(&server, "doc1", 500, "backendError", "Internal Error").await;

    let err = provider.add_editor(&item("doc1"), &target()).await.unwrap_err();
    assert_eq!(err, ProviderError::Unknown("Internal Error".to_string()));
    assert_eq!(err.to_string(), "Internal Error");
}

#[tokio::test]
async fn test_regranting_writer_succeeds_again() {
    let (server, provider) = common::setup_provider().await;
    common::mount_permission_ok(&server, "doc1", "writer").await;

    provider.add_editor(&item("doc1"), &target()).await.unwrap();
    provider.add_editor(&item("doc1"), &target()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}
