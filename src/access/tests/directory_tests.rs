//! Behavioural tests for the in-memory directory backend.

use crate::access::{
    adapters::memory::InMemoryDirectory,
    domain::{ChatId, Role, UserId, UserProfile},
    ports::{GroupRepository, SettingsRepository, UserRepository},
};
use rstest::{fixture, rstest};

#[fixture]
fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
}

async fn register(directory: &InMemoryDirectory, id: i64, username: &str) {
    directory
        .upsert_user(&UserProfile::new(UserId::new(id)).with_username(username))
        .await
        .expect("registration should succeed");
}

#[rstest]
#[case("anna")]
#[case("@anna")]
#[case("@Anna")]
#[tokio::test(flavor = "multi_thread")]
async fn points_accrue_by_any_username_spelling(
    directory: InMemoryDirectory,
    #[case] assignee: &str,
) {
    register(&directory, 1, "Anna").await;

    let affected = directory
        .increment_points(assignee, 1)
        .await
        .expect("award should succeed");

    assert_eq!(affected, 1);
    let user = directory
        .find_user(UserId::new(1))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.points, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn points_fall_back_to_a_numeric_user_id(directory: InMemoryDirectory) {
    register(&directory, 42, "bob").await;

    let affected = directory
        .increment_points("42", 3)
        .await
        .expect("award should succeed");

    assert_eq!(affected, 1);
    let user = directory
        .find_user(UserId::new(42))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.points, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn awards_to_unknown_assignees_affect_nothing(directory: InMemoryDirectory) {
    register(&directory, 1, "anna").await;

    let affected = directory
        .increment_points("@ghost", 1)
        .await
        .expect("award should succeed");

    assert_eq!(affected, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_updates_report_affected_records(directory: InMemoryDirectory) {
    register(&directory, 1, "anna").await;

    let known = directory
        .set_role(UserId::new(1), Role::Admin)
        .await
        .expect("role update should succeed");
    let unknown = directory
        .set_role(UserId::new(404), Role::Admin)
        .await
        .expect("role update should succeed");

    assert_eq!(known, 1);
    assert_eq!(unknown, 0);
    let role = directory
        .role_of(UserId::new(1))
        .await
        .expect("lookup should succeed");
    assert_eq!(role, Some(Role::Admin));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settings_replace_previous_values(directory: InMemoryDirectory) {
    let unset = directory
        .get_setting("work_chat_id")
        .await
        .expect("read should succeed");
    directory
        .set_setting("work_chat_id", "-100")
        .await
        .expect("write should succeed");
    directory
        .set_setting("work_chat_id", "-200")
        .await
        .expect("write should succeed");

    let value = directory
        .get_setting("work_chat_id")
        .await
        .expect("read should succeed");

    assert_eq!(unset, None);
    assert_eq!(value.as_deref(), Some("-200"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_upserts_refresh_the_title(directory: InMemoryDirectory) {
    directory
        .upsert_group(ChatId::new(-100), "Design team")
        .await
        .expect("upsert should succeed");
    directory
        .upsert_group(ChatId::new(-100), "Design crew")
        .await
        .expect("upsert should succeed");
}
