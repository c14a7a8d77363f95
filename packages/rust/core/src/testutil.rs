//! Shared fixtures for core unit tests.

use chrono::{TimeZone, Utc};
use courseboard_shared::{
    AssignmentRef, AssignmentResult, ProfileRecord, PullAuthor, PullRequestRecord,
};

/// A pull request with deterministic author-derived fields.
pub fn pull(url: &str, login: &str, uid: u64) -> PullRequestRecord {
    PullRequestRecord {
        id: uid * 100,
        html_url: url.into(),
        user: PullAuthor {
            id: uid,
            login: login.into(),
            avatar_url: format!("https://avatars.example.com/u/{uid}"),
            html_url: format!("https://github.com/{login}"),
        },
        title: format!("submission by {login}"),
        body: Some("work in progress".into()),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
    }
}

/// A fully-populated profile record for `login`.
pub fn profile(login: &str, uid: u64) -> ProfileRecord {
    ProfileRecord {
        login: login.into(),
        name: Some(format!("{login} (real name)")),
        id: uid,
        avatar_url: format!("https://avatars.example.com/profile/{uid}"),
        html_url: format!("https://github.com/{login}"),
        url: format!("https://api.github.com/users/{login}"),
        company: Some("Acme".into()),
        blog: Some("https://blog.example.com".into()),
        location: Some("Seoul".into()),
        email: Some(format!("{login}@example.com")),
        bio: Some("builds things".into()),
        followers: 10,
        following: 5,
    }
}

/// A grading result pointing at `url`, with one numeric score field.
pub fn result(name: &str, feedback: Option<&str>, url: &str, score: i64) -> AssignmentResult {
    let mut extra = serde_json::Map::new();
    extra.insert("score".into(), serde_json::Value::from(score));
    AssignmentResult {
        name: name.into(),
        feedback: feedback.map(String::from),
        assignment: AssignmentRef { url: url.into() },
        extra,
    }
}
