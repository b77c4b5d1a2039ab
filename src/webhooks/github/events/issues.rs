use crate::webhooks::github::events::{GitHubUser, Issue, Label, Milestone};

#[derive(Debug)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub sender: Option<GitHubUser>,
    pub assignee: Option<GitHubUser>,
    pub label: Option<Label>,
    pub milestone: Option<Milestone>,
}
