use chrono::{DateTime, NaiveDate};
use gitea_sdk::model::issues::{IssueType, State};
use gitea_sdk::{Auth, Client};
use indexmap::IndexMap;
use log::debug;

use crate::error::RepoError;
use crate::model::UserActivity;
use crate::utils::message_spinner;

const PAGE_SIZE: i64 = 50;

const LABEL_BUG: &str = "bug";
const LABEL_DOC: &str = "documentation";
const LABEL_TYPO: &str = "typo";

// Cache toggle for collected activity. There is no cache implementation yet,
// so collection always hits the API.
const CACHE_ENABLED: bool = false;

pub type Activities = IndexMap<String, UserActivity>;

/// Boundary to the hosting service: per-contributor labelled activity for one
/// repository inside an inclusive `[since, until]` window.
pub trait ActivityCollector {
    async fn collect(
        &self,
        owner: &str,
        repo: &str,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Activities, RepoError>;
}

pub struct GiteaCollector {
    client: Client,
}

impl GiteaCollector {
    /// Without a token, requests go out unauthenticated.
    pub fn new(url: &str, token: Option<&str>) -> Self {
        let client = match token {
            Some(token) => Client::new(url, Auth::Token(token)),
            None => Client::new(url, Auth::<&str>::None),
        };
        Self { client }
    }
}

impl ActivityCollector for GiteaCollector {
    async fn collect(
        &self,
        owner: &str,
        repo: &str,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Activities, RepoError> {
        if !CACHE_ENABLED {
            debug!("activity cache disabled, fetching {owner}/{repo} from the API");
        }
        let mut activities = Activities::new();

        let pb = message_spinner();
        let pulls = self.client.pulls(owner, repo);
        let mut page = 1;
        loop {
            pb.set_message(format!("Fetch pull requests (#{page} page) ..."));
            let batch = pulls
                .list()
                .limit(PAGE_SIZE)
                .page(page)
                .state(State::All)
                .send(&self.client)
                .await
                .map_err(|err| RepoError::Ingest(err.to_string()))?;
            if batch.is_empty() {
                break;
            }
            for pull in &batch {
                if !within_window(&pull.created_at.to_string(), since, until) {
                    continue;
                }
                let entry = activities
                    .entry(pull.user.login.clone())
                    .or_insert_with(UserActivity::default);
                for label in &pull.labels {
                    match label.name.as_str() {
                        LABEL_BUG => entry.pr_fb += 1,
                        LABEL_DOC => entry.pr_doc += 1,
                        LABEL_TYPO => entry.pr_typo += 1,
                        _ => {}
                    }
                }
            }
            page += 1;
        }

        let issues = self.client.issues(owner, repo);
        let mut page = 1;
        loop {
            pb.set_message(format!("Fetch issues (#{page} page) ..."));
            // The issues endpoint also returns pull requests unless the type
            // filter is set; those are already tallied by the pulls pass.
            let batch = issues
                .list()
                .limit(PAGE_SIZE)
                .page(page)
                .state(State::All)
                .issue_type(IssueType::Issues)
                .send(&self.client)
                .await
                .map_err(|err| RepoError::Ingest(err.to_string()))?;
            if batch.is_empty() {
                break;
            }
            for issue in &batch {
                if !within_window(&issue.created_at.to_string(), since, until) {
                    continue;
                }
                let entry = activities
                    .entry(issue.user.login.clone())
                    .or_insert_with(UserActivity::default);
                for label in &issue.labels {
                    match label.name.as_str() {
                        LABEL_BUG => entry.is_fb += 1,
                        LABEL_DOC => entry.is_doc += 1,
                        _ => {}
                    }
                }
            }
            page += 1;
        }

        pb.finish_with_message(format!(
            "✅ Completed fetch activity for {owner}/{repo} (find {} contributors)",
            activities.len()
        ));
        Ok(activities)
    }
}

/// Inclusive calendar-date window check against an RFC 3339 creation stamp.
/// Unparseable stamps fall outside the window.
fn within_window(created_at: &str, since: Option<NaiveDate>, until: Option<NaiveDate>) -> bool {
    let Ok(created) = DateTime::parse_from_rfc3339(created_at) else {
        return false;
    };
    let date = created.date_naive();
    since.map_or(true, |since| date >= since) && until.map_or(true, |until| date <= until)
}
