//! Authorization dispatch through the ACL policy and custom policies

use assert_matches::assert_matches;
use async_trait::async_trait;
use std::sync::Arc;
use warden_authorization::{
    guarded, require_authenticated, require_permission, AclPolicy, AclRuleSet,
    AuthorizationPolicy, Group,
};
use warden_core::{Result, WardenError};
use warden_testkit::{editorial_rules, FailingGroups, StaticGroups};

fn directory() -> StaticGroups {
    StaticGroups::new()
        .with_member("root", ["super_user"])
        .with_member("ed", ["edit_group"])
        .with_forbidden("mallory")
}

#[tokio::test]
async fn global_rules_apply_when_no_context_is_passed() {
    let policy = AclPolicy::new(directory()).with_context(editorial_rules());

    assert!(policy.permit(None, "view", None).await.unwrap());
    assert!(!policy.permit(None, "view_extra", None).await.unwrap());
    assert!(policy.permit(Some("bob"), "view_extra", None).await.unwrap());
    assert!(!policy.permit(Some("root"), "view_extra", None).await.unwrap());
    assert!(policy.permit(Some("ed"), "edit", None).await.unwrap());
    assert!(!policy.permit(Some("bob"), "edit", None).await.unwrap());
    assert!(!policy.permit(Some("mallory"), "view", None).await.unwrap());
}

#[tokio::test]
async fn local_context_replaces_global() {
    let policy = AclPolicy::new(directory()).with_context(editorial_rules());
    let local: AclRuleSet<String, String> = AclRuleSet::builder()
        .allow(Group::named("super_user"), ["view_extra"])
        .build();

    assert!(policy
        .permit(Some("root"), "view_extra", Some(&local))
        .await
        .unwrap());
    // The global allow for `view` is not consulted.
    assert!(!policy.permit(Some("bob"), "view", Some(&local)).await.unwrap());
}

#[tokio::test]
async fn local_context_without_global() {
    let policy: AclPolicy<_, String, String> = AclPolicy::new(directory());
    let rules = editorial_rules();
    assert!(policy.permit(Some("ed"), "edit", Some(&rules)).await.unwrap());
}

#[tokio::test]
async fn missing_context_is_a_configuration_error() {
    let policy: AclPolicy<_, String, String> = AclPolicy::new(directory());
    assert_matches!(
        policy.permit(Some("ed"), "edit", None).await,
        Err(WardenError::RuntimeConfiguration { .. })
    );
}

#[tokio::test]
async fn lookup_failure_is_not_an_empty_group_list() {
    let policy = AclPolicy::new(FailingGroups::new("directory offline"))
        .with_context(editorial_rules());
    assert_matches!(
        policy.permit(None, "view", None).await,
        Err(WardenError::GroupLookup { message }) if message == "directory offline"
    );
}

#[tokio::test]
async fn groups_are_fetched_once_per_decision() {
    let groups = Arc::new(directory());
    let policy = AclPolicy::new(groups.clone()).with_context(editorial_rules());

    policy.permit(Some("ed"), "edit", None).await.unwrap();
    policy.permit(None, "view", None).await.unwrap();
    assert_eq!(groups.calls(), vec![Some("ed".to_string()), None]);
}

#[tokio::test]
async fn unknown_identities_can_be_denied_outright() {
    let policy = AclPolicy::new(directory().deny_unknown()).with_context(editorial_rules());
    assert!(!policy.permit(Some("stranger"), "view", None).await.unwrap());
    assert!(policy.permit(Some("ed"), "view", None).await.unwrap());
}

/// Grants `admin` to one identity and nothing else.
struct AdminOnly {
    admin: String,
}

#[async_trait]
impl AuthorizationPolicy<str> for AdminOnly {
    type Context = ();

    async fn permit(
        &self,
        identity: Option<&str>,
        permission: &str,
        _context: Option<&()>,
    ) -> Result<bool> {
        Ok(permission == "admin" && identity == Some(self.admin.as_str()))
    }
}

#[tokio::test]
async fn custom_policy_plugs_into_guards() {
    let policy = AdminOnly {
        admin: "root".to_string(),
    };

    assert!(require_permission(&policy, Some("root"), "admin", None)
        .await
        .is_ok());
    assert_matches!(
        require_permission(&policy, Some("bob"), "admin", None).await,
        Err(WardenError::PermissionDenied { .. })
    );

    let dynamic: Arc<dyn AuthorizationPolicy<str, Context = ()>> = Arc::new(policy);
    assert!(dynamic.permit(Some("root"), "admin", None).await.unwrap());
    assert!(!dynamic.permit(Some("root"), "view", None).await.unwrap());
}

#[tokio::test]
async fn guards_compose_around_a_handler() {
    let policy = AclPolicy::new(directory()).with_context(editorial_rules());

    async fn edit_page(identity: Option<&str>) -> Result<String> {
        let who = require_authenticated(identity)?;
        Ok(format!("editing as {who}"))
    }

    let page = guarded(require_permission(&policy, Some("ed"), "edit", None), || {
        edit_page(Some("ed"))
    })
    .await
    .unwrap();
    assert_eq!(page, "editing as ed");

    assert_matches!(
        guarded(require_permission(&policy, Some("bob"), "edit", None), || {
            edit_page(Some("bob"))
        })
        .await,
        Err(WardenError::PermissionDenied { .. })
    );
}
