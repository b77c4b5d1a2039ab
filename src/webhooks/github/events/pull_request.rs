use crate::webhooks::github::events::{GitHubUser, PullRequest};

#[derive(Debug)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub sender: Option<GitHubUser>,
    pub assignee: Option<GitHubUser>,
    pub requested_reviewer: Option<GitHubUser>,
}
