//! Turns classified webhook events into Discord-flavored Markdown messages.

use crate::webhooks::github::events::{GitHubEvent, GitHubUser, IssuesEvent, PullRequestEvent};

/// Fallback login for actors derived from the `sender` or creator fields.
const UNKNOWN_USER: &str = "Unknown";
/// Fallback login for target actors (assignee, requested reviewer).
const SOMEONE: &str = "someone";

pub fn handle_github_event(event: GitHubEvent) -> Option<String> {
    match event {
        GitHubEvent::Issues(event) => handle_issues(event),
        GitHubEvent::PullRequest(event) => handle_pull_request(event),
    }
}

/// One arm per supported action; anything unlisted lands on the generic bell template, so adding
/// an action is a matter of adding an arm.
fn handle_issues(event: IssuesEvent) -> Option<String> {
    let IssuesEvent {
        action,
        issue,
        sender,
        assignee,
        label,
        milestone,
    } = event;

    let creator = login_or(&issue.user, UNKNOWN_USER);
    let sender = login_or(&sender, UNKNOWN_USER);
    let assignees = assignee_text(&issue.assignees);
    let title = &issue.title;
    let url = &issue.html_url;

    let message = match action.as_str() {
        "opened" => {
            format!("🆕 Issue opened by **{creator}**\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "closed" => {
            format!("✅ Issue closed by **{sender}**\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "reopened" => {
            format!("🔄 Issue reopened by **{sender}**\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "assigned" => {
            let assignee = login_or(&assignee, SOMEONE);
            format!("👤 Issue assigned to **{assignee}** by **{sender}**\n**{title}**\n[View Issue]({url})")
        }
        "labeled" => {
            let label = label.as_ref().map_or("a label", |label| label.name.as_str());
            format!("🏷️ Issue labeled with \"**{label}**\"\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "milestoned" => {
            let milestone = milestone
                .as_ref()
                .map_or("a milestone", |milestone| milestone.title.as_str());
            format!("🎯 Issue added to milestone \"**{milestone}**\"\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "transferred" => {
            format!("📦 Issue transferred\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        "pinned" => format!("📌 Issue pinned\n**{title}**\n{assignees}\n[View Issue]({url})"),
        "edited" => {
            format!("✏️ Issue edited by **{sender}**\n**{title}**\n{assignees}\n[View Issue]({url})")
        }
        _ => format!("🔔 Issue {action}\n**{title}**\n{assignees}\n[View Issue]({url})"),
    };

    Some(message)
}

fn handle_pull_request(event: PullRequestEvent) -> Option<String> {
    let PullRequestEvent {
        action,
        pull_request,
        sender,
        assignee,
        requested_reviewer,
    } = event;

    let creator = login_or(&pull_request.user, UNKNOWN_USER);
    let sender = login_or(&sender, UNKNOWN_USER);
    let reviewers = reviewers_text(&pull_request.requested_reviewers);
    let title = &pull_request.title;
    let url = &pull_request.html_url;

    let message = match action.as_str() {
        "opened" => {
            format!("🔌 Pull request opened by **{creator}**\n**{title}**\n{reviewers}\n[View PR]({url})")
        }
        "closed" => {
            if pull_request.merged.unwrap_or(false) {
                let merged_by = pull_request
                    .merged_by
                    .as_ref()
                    .map_or(sender, |user| user.login.as_str());
                format!("🟣 Pull request merged by **{merged_by}**\n**{title}**\n[View PR]({url})")
            } else {
                format!("❌ Pull request closed without merging by **{sender}**\n**{title}**\n[View PR]({url})")
            }
        }
        "reopened" => {
            format!("🔄 Pull request reopened by **{sender}**\n**{title}**\n{reviewers}\n[View PR]({url})")
        }
        "ready_for_review" => {
            format!("👀 Pull request ready for review\n**{title}**\n{reviewers}\n[View PR]({url})")
        }
        "review_requested" => {
            let reviewer = login_or(&requested_reviewer, SOMEONE);
            format!("🔍 Review requested from **{reviewer}**\n**{title}**\n[View PR]({url})")
        }
        "assigned" => {
            let assignee = login_or(&assignee, SOMEONE);
            format!("👤 Pull request assigned to **{assignee}**\n**{title}**\n[View PR]({url})")
        }
        _ => format!("🔔 Pull request {action}\n**{title}**\n{reviewers}\n[View PR]({url})"),
    };

    Some(message)
}

fn login_or<'a>(user: &'a Option<GitHubUser>, fallback: &'a str) -> &'a str {
    user.as_ref().map_or(fallback, |user| user.login.as_str())
}

fn assignee_text(assignees: &[GitHubUser]) -> String {
    if assignees.is_empty() {
        "Unassigned".to_owned()
    } else {
        format!("Assigned to: {}", bold_logins(assignees))
    }
}

fn reviewers_text(reviewers: &[GitHubUser]) -> String {
    if reviewers.is_empty() {
        "No reviewers assigned".to_owned()
    } else {
        format!("Reviewers: {}", bold_logins(reviewers))
    }
}

fn bold_logins(users: &[GitHubUser]) -> String {
    users
        .iter()
        .map(|user| format!("**{}**", user.login))
        .collect::<Vec<_>>()
        .join(", ")
}
