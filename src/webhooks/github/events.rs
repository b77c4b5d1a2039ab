use std::fmt::Display;

use serde::Deserialize;
use url::Url;

mod issues;
mod pull_request;

pub use issues::*;
pub use pull_request::*;

/// A classified webhook event, ready to be formatted.
#[derive(Debug)]
pub enum GitHubEvent {
    Issues(IssuesEvent),
    PullRequest(PullRequestEvent),
}

/// Raw webhook payload, before classification. GitHub ships many more fields; only the ones
/// consumed by the formatter are deserialized, and all of them are optional on the wire.
#[derive(Debug, Deserialize)]
pub struct InboundEvent {
    pub action: Option<String>,
    pub issue: Option<Issue>,
    pub pull_request: Option<PullRequest>,
    pub sender: Option<GitHubUser>,
    pub assignee: Option<GitHubUser>,
    pub requested_reviewer: Option<GitHubUser>,
    pub label: Option<Label>,
    pub milestone: Option<Milestone>,
}

impl InboundEvent {
    /// Decides which kind of event this payload describes, keyed on the presence of the `issue`
    /// or `pull_request` object. Anything else (pushes, releases, comments, ...) is out of scope
    /// and yields `None`, as does a payload without an `action`.
    pub fn classify(self) -> Option<GitHubEvent> {
        let InboundEvent {
            action,
            issue,
            pull_request,
            sender,
            assignee,
            requested_reviewer,
            label,
            milestone,
        } = self;

        let action = action?;

        if let Some(issue) = issue {
            Some(GitHubEvent::Issues(IssuesEvent {
                action,
                issue,
                sender,
                assignee,
                label,
                milestone,
            }))
        } else if let Some(pull_request) = pull_request {
            Some(GitHubEvent::PullRequest(PullRequestEvent {
                action,
                pull_request,
                sender,
                assignee,
                requested_reviewer,
            }))
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    // only used for log correlation, and not all deliveries carry it
    #[serde(default)]
    pub number: u64,
    pub title: String,
    pub html_url: Url,
    pub user: Option<GitHubUser>,
    #[serde(default)]
    pub assignees: Vec<GitHubUser>,
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} ({})", self.number, shorten_content(&self.title))
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: u64,
    pub title: String,
    pub html_url: Url,
    pub user: Option<GitHubUser>,
    #[serde(default)]
    pub assignees: Vec<GitHubUser>,
    #[serde(default)]
    pub requested_reviewers: Vec<GitHubUser>,
    pub merged: Option<bool>,
    pub merged_by: Option<GitHubUser>,
}

impl Display for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PR #{} ({})", self.number, shorten_content(&self.title))
    }
}

pub(crate) fn shorten_content(content: &str) -> String {
    let max_length = 72;
    if content.len() <= max_length {
        content.to_owned()
    } else {
        content.chars().take(max_length).collect::<String>() + "…"
    }
}
