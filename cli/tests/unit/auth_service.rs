//! Tests for token authorization, refresh and status reporting.

#![allow(clippy::expect_used)]

use chrono::{TimeDelta, Utc};
use sctl_cli::application::ports::TokenStore;
use sctl_cli::application::services::auth;
use sctl_cli::domain::Project;

use crate::mocks::MemTokens;

#[test]
fn test_authorize_accepts_token_at_boundary() {
    let now = Utc::now();
    let project = Project::new("demo", "/srv/demo");
    let tokens = MemTokens::minted(&project, now, TimeDelta::seconds(300));
    let bundle = auth::authorize(&tokens, &project, now).expect("still valid");
    assert_eq!(bundle.master, project.master_token);
}

#[test]
fn test_authorize_rejects_token_past_boundary() {
    let now = Utc::now();
    let project = Project::new("demo", "/srv/demo");
    let tokens = MemTokens::minted(&project, now, TimeDelta::milliseconds(300_010));
    let err = auth::authorize(&tokens, &project, now).expect_err("expired");
    assert!(err.to_string().contains("sctl token refresh"), "got: {err}");
}

#[test]
fn test_refresh_keeps_master_and_renews_auth() {
    let now = Utc::now();
    let project = Project::new("demo", "/srv/demo");
    let tokens = MemTokens::minted(&project, now, TimeDelta::seconds(900));
    let before = tokens.load(&project).expect("load");

    let after = auth::refresh(&tokens, &project).expect("refresh");

    assert_eq!(after.master, before.master);
    assert_ne!(after.auth.data, before.auth.data);
    assert!(auth::authorize(&tokens, &project, Utc::now()).is_ok());
}

#[test]
fn test_status_reports_remaining_lifetime() {
    let now = Utc::now();
    let project = Project::new("demo", "/srv/demo");
    let tokens = MemTokens::minted(&project, now, TimeDelta::seconds(100));

    let status = auth::status(&tokens, &project, now).expect("status");
    assert!(status.valid);
    assert_eq!(status.age_secs, 100);
    assert_eq!(status.expires_in_secs, 200);

    let later = auth::status(&tokens, &project, now + TimeDelta::seconds(500)).expect("status");
    assert!(!later.valid);
    assert_eq!(later.expires_in_secs, 0);
}

#[test]
fn test_missing_bundle_is_lookup_failure() {
    let project = Project::new("demo", "/srv/demo");
    let err = auth::authorize(&MemTokens::default(), &project, Utc::now()).expect_err("missing");
    assert!(err.to_string().contains("failed to read"), "got: {err}");
}
