use std::fs;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use log::{error, warn};

use crate::analyze::ScoreAggregate;
use crate::error::RepoError;
use crate::gitea::{Activities, ActivityCollector};
use crate::model::{IdentMap, IdentSet, IdentityResolver, LabelCounts, RepoTarget, UserScore};
use crate::report::{Format, ReportGenerator};

// The raw activity dump keeps its legacy fixed location; it does not follow
// the `-o` directory. Everything else does.
const RAW_DUMP_DIR: &str = "output";

#[derive(Debug)]
pub struct FailedRepo {
    pub slug: String,
    pub reason: String,
}

/// What the batch produced: per-repository label summaries, the slugs that
/// could not be processed, and the run-wide aggregate.
#[derive(Debug)]
pub struct BatchReport {
    pub summaries: Vec<(String, LabelCounts)>,
    pub failed_repos: Vec<FailedRepo>,
    pub aggregate: ScoreAggregate,
}

impl BatchReport {
    pub fn print_summary(&self) {
        if !self.summaries.is_empty() {
            println!("\n📊 Label summary across repositories");
            println!("----------------------------------------------------");
            println!("{:<30} {:>5} {:>5} {:>5}", "Repo", "B/F", "Doc", "typo");
            println!("----------------------------------------------------");
            for (repo, counts) in &self.summaries {
                println!(
                    "{:<30} {:>5} {:>5} {:>5}",
                    repo, counts.bug, counts.documentation, counts.typo
                );
            }
        }

        if !self.failed_repos.is_empty() {
            println!("\n❌ Repositories that could not be processed:");
            for failed in &self.failed_repos {
                println!("- {} ({})", failed.slug, failed.reason);
            }
        }
    }
}

/// Drives the repositories of one run in order, one at a time.
///
/// Failure boundaries, from the outside in: a slug that does not parse is
/// recorded and skipped; a collection failure abandons that repository; a
/// raw-dump failure abandons the rest of that repository's processing; a
/// report failure abandons the merge for that repository. None of them roll
/// back what earlier repositories already contributed to the aggregate.
pub struct BatchRunner<'a, C> {
    collector: &'a C,
    resolver: &'a IdentityResolver,
    formats: &'a [Format],
    output_dir: &'a str,
    raw_dump_dir: PathBuf,
    filter: Option<&'a IdentSet>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    aggregate: ScoreAggregate,
    summaries: Vec<(String, LabelCounts)>,
    failed_repos: Vec<FailedRepo>,
}

impl<'a, C: ActivityCollector> BatchRunner<'a, C> {
    pub fn new(
        collector: &'a C,
        resolver: &'a IdentityResolver,
        formats: &'a [Format],
        output_dir: &'a str,
        filter: Option<&'a IdentSet>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Self {
        Self {
            collector,
            resolver,
            formats,
            output_dir,
            raw_dump_dir: PathBuf::from(RAW_DUMP_DIR),
            filter,
            since,
            until,
            aggregate: ScoreAggregate::new(),
            summaries: Vec::new(),
            failed_repos: Vec::new(),
        }
    }

    #[cfg(test)]
    fn with_raw_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw_dump_dir = dir.into();
        self
    }

    pub async fn run(mut self, slugs: &[String]) -> BatchReport {
        for slug in slugs {
            let Some(target) = RepoTarget::parse_slug(slug) else {
                warn!("repository argument '{slug}' must look like 'owner/repo'");
                self.failed_repos.push(FailedRepo {
                    slug: slug.clone(),
                    reason: "expected form: owner/repo".to_string(),
                });
                continue;
            };
            if let Err(err) = self.process_repo(&target).await {
                error!("{slug}: {err}");
                self.failed_repos.push(FailedRepo {
                    slug: slug.clone(),
                    reason: err.to_string(),
                });
            }
        }

        if !self.aggregate.is_empty() {
            let generator =
                ReportGenerator::new(self.aggregate.scores(), "total", self.output_dir);
            if let Err(err) = generator.generate_table() {
                error!("total report: {err}");
            }
        }

        BatchReport {
            summaries: self.summaries,
            failed_repos: self.failed_repos,
            aggregate: self.aggregate,
        }
    }

    async fn process_repo(&mut self, target: &RepoTarget) -> Result<(), RepoError> {
        println!("\n🔍 Processing: {}", target.slug());

        let activities = self
            .collector
            .collect(&target.owner, &target.repo, self.since, self.until)
            .await?;

        // The raw dump is written, and its file closed, before any score
        // computation for this repository starts.
        let label_counts = self
            .write_raw_dump(target, &activities)
            .map_err(RepoError::Dump)?;
        self.summaries.push((target.slug(), label_counts));
        self.report_missing_filter_users(target, &activities);

        let resolved = self.resolve_scores(&activities);
        let generator = ReportGenerator::new(&resolved, &target.repo, self.output_dir);
        for format in self.formats {
            generator.dispatch(*format)?;
        }
        self.aggregate.merge(&resolved);
        Ok(())
    }

    /// One block per contributor with the five raw counts, plus the label
    /// totals computed in the same pass. The filter, when present, restricts
    /// both.
    fn write_raw_dump(
        &self,
        target: &RepoTarget,
        activities: &Activities,
    ) -> io::Result<LabelCounts> {
        let dir = self.raw_dump_dir.join(&target.repo);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}2.txt", target.repo));
        let mut file = fs::File::create(path)?;

        writeln!(file, "=== {} Activities ===", target.repo)?;
        let mut counts = LabelCounts::default();
        for (user_id, activity) in activities {
            if self.filter.is_some_and(|filter| !filter.contains(user_id)) {
                continue;
            }
            writeln!(file, "User ID: {user_id}")?;
            writeln!(file, "  PR_fb: {}", activity.pr_fb)?;
            writeln!(file, "  PR_doc: {}", activity.pr_doc)?;
            writeln!(file, "  PR_typo: {}", activity.pr_typo)?;
            writeln!(file, "  IS_fb: {}", activity.is_fb)?;
            writeln!(file, "  IS_doc: {}", activity.is_doc)?;
            writeln!(file)?;
            counts.accumulate(activity);
        }
        Ok(counts)
    }

    /// Advisory only: filter entries naming nobody in this repository.
    fn report_missing_filter_users(&self, target: &RepoTarget, activities: &Activities) {
        let Some(filter) = self.filter else {
            return;
        };
        let existing = activities.keys().collect::<IdentSet>();
        let missing = filter
            .iter()
            .filter(|id| !existing.contains(id))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            warn!(
                "⚠️ the following users were not found in {}: {}",
                target.slug(),
                missing.join(", ")
            );
        }
    }

    /// Derives a score per contributor and rewrites the key through the
    /// identity resolver. Two raw ids resolving to the same display name
    /// merge additively.
    fn resolve_scores(&self, activities: &Activities) -> IdentMap<UserScore> {
        let mut resolved = IdentMap::new();
        for (user_id, activity) in activities {
            let identity = self.resolver.resolve(user_id);
            resolved.upsert_with(identity, UserScore::from_activity(activity), |a, b| {
                a.merge(b)
            });
        }
        resolved
    }
}
