#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    /// Parses an `owner/repo` slug. Exactly one `/` separating two non-empty
    /// parts; anything else is not a target.
    pub fn parse_slug(slug: &str) -> Option<Self> {
        let parts = slug.split('/').collect::<Vec<_>>();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Some(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => None,
        }
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let target = RepoTarget::parse_slug("owner/repo").unwrap();
        assert_eq!(target.owner, "owner");
        assert_eq!(target.repo, "repo");
        assert_eq!(target.slug(), "owner/repo");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(RepoTarget::parse_slug("onlyname").is_none());
    }

    #[test]
    fn rejects_extra_separator() {
        assert!(RepoTarget::parse_slug("a/b/c").is_none());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(RepoTarget::parse_slug("").is_none());
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(RepoTarget::parse_slug("/repo").is_none());
        assert!(RepoTarget::parse_slug("owner/").is_none());
        assert!(RepoTarget::parse_slug("/").is_none());
    }
}
