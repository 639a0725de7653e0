/// Raw per-contributor contribution tallies for one repository: pull requests
/// and issues, split by label (bug-fix, documentation, typo). Immutable once
/// collected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UserActivity {
    pub pr_fb: u32,
    pub pr_doc: u32,
    pub pr_typo: u32,
    pub is_fb: u32,
    pub is_doc: u32,
}

impl UserActivity {
    pub fn new(pr_fb: u32, pr_doc: u32, pr_typo: u32, is_fb: u32, is_doc: u32) -> Self {
        Self {
            pr_fb,
            pr_doc,
            pr_typo,
            is_fb,
            is_doc,
        }
    }
}

impl Default for UserActivity {
    fn default() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }
}

/// Per-repository label totals summed across contributors.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LabelCounts {
    pub bug: u32,
    pub documentation: u32,
    pub typo: u32,
}

impl LabelCounts {
    pub fn accumulate(&mut self, activity: &UserActivity) {
        self.bug += activity.pr_fb + activity.is_fb;
        self.documentation += activity.pr_doc + activity.is_doc;
        self.typo += activity.pr_typo;
    }
}
