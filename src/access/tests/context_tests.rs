//! Service tests for context resolution and registration.

use std::sync::Arc;

use crate::access::{
    adapters::memory::InMemoryDirectory,
    domain::{ChatId, Role, UserId, UserProfile},
    ports::{SettingsRepository, UserRepository},
    services::{AccessService, WORK_CHAT_KEY},
};
use rstest::{fixture, rstest};

type TestService = AccessService<InMemoryDirectory, InMemoryDirectory, InMemoryDirectory>;

fn service_over(directory: &Arc<InMemoryDirectory>) -> TestService {
    AccessService::new(
        Arc::clone(directory),
        Arc::clone(directory),
        Arc::clone(directory),
    )
}

#[fixture]
fn directory() -> Arc<InMemoryDirectory> {
    Arc::new(InMemoryDirectory::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_users_resolve_as_executors(directory: Arc<InMemoryDirectory>) {
    let service = service_over(&directory);

    let context = service
        .resolve_context(UserId::new(404), ChatId::new(1))
        .await
        .expect("resolution should succeed");

    assert_eq!(context.role, Role::Executor);
    assert!(!context.can_manage());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_chat_is_authorized_until_a_work_chat_is_set(directory: Arc<InMemoryDirectory>) {
    let service = service_over(&directory);

    let before = service
        .resolve_context(UserId::new(1), ChatId::new(42))
        .await
        .expect("resolution should succeed");
    service
        .set_work_chat(ChatId::new(-100))
        .await
        .expect("configuration should succeed");
    let elsewhere = service
        .resolve_context(UserId::new(1), ChatId::new(42))
        .await
        .expect("resolution should succeed");
    let at_work = service
        .resolve_context(UserId::new(1), ChatId::new(-100))
        .await
        .expect("resolution should succeed");

    assert!(before.is_work_chat);
    assert!(!elsewhere.is_work_chat);
    assert!(at_work.is_work_chat);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_blank_work_chat_setting_authorizes_every_chat(directory: Arc<InMemoryDirectory>) {
    directory
        .set_setting(WORK_CHAT_KEY, "   ")
        .await
        .expect("setting should succeed");
    let service = service_over(&directory);

    let context = service
        .resolve_context(UserId::new(1), ChatId::new(42))
        .await
        .expect("resolution should succeed");

    assert!(context.is_work_chat);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_roles_flow_into_the_context(directory: Arc<InMemoryDirectory>) {
    directory
        .upsert_user(&UserProfile::new(UserId::new(1)).with_username("anna"))
        .await
        .expect("registration should succeed");
    let service = service_over(&directory);

    let affected = service
        .set_role(UserId::new(1), Role::Manager)
        .await
        .expect("role assignment should succeed");
    let missing = service
        .set_role(UserId::new(404), Role::Manager)
        .await
        .expect("role assignment should succeed");
    let context = service
        .resolve_context(UserId::new(1), ChatId::new(1))
        .await
        .expect("resolution should succeed");

    assert!(affected);
    assert!(!missing);
    assert_eq!(context.role, Role::Manager);
    assert!(context.can_manage());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_is_idempotent_and_preserves_counters(directory: Arc<InMemoryDirectory>) {
    let service = service_over(&directory);
    let profile = UserProfile::new(UserId::new(1))
        .with_username("anna")
        .with_first_name("Anna");
    service
        .register_interaction(&profile, ChatId::new(-100), "Design team")
        .await
        .expect("registration should succeed");
    directory
        .increment_points("anna", 2)
        .await
        .expect("award should succeed");
    service
        .set_role(UserId::new(1), Role::Manager)
        .await
        .expect("role assignment should succeed");

    let renamed = UserProfile::new(UserId::new(1))
        .with_username("anna")
        .with_first_name("Anya");
    service
        .register_interaction(&renamed, ChatId::new(-100), "Design crew")
        .await
        .expect("registration should succeed");

    let user = directory
        .find_user(UserId::new(1))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.first_name.as_deref(), Some("Anya"));
    assert_eq!(user.points, 2);
    assert_eq!(user.role, Role::Manager);
}
