use crate::model::UserActivity;

const WEIGHT_PR_FB: u32 = 3;
const WEIGHT_PR_DOC: u32 = 2;
const WEIGHT_PR_TYPO: u32 = 1;
const WEIGHT_IS_FB: u32 = 2;
const WEIGHT_IS_DOC: u32 = 1;

/// Activity counts plus the derived total for one contributor.
///
/// The weighting is linear in every component, so deriving a score from
/// merged counts and merging already-derived scores agree. The aggregator
/// depends on that.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UserScore {
    pub pr_fb: u32,
    pub pr_doc: u32,
    pub pr_typo: u32,
    pub is_fb: u32,
    pub is_doc: u32,
    pub total: u32,
}

impl UserScore {
    pub fn new(pr_fb: u32, pr_doc: u32, pr_typo: u32, is_fb: u32, is_doc: u32, total: u32) -> Self {
        Self {
            pr_fb,
            pr_doc,
            pr_typo,
            is_fb,
            is_doc,
            total,
        }
    }

    pub fn from_activity(activity: &UserActivity) -> Self {
        let total = activity.pr_fb * WEIGHT_PR_FB
            + activity.pr_doc * WEIGHT_PR_DOC
            + activity.pr_typo * WEIGHT_PR_TYPO
            + activity.is_fb * WEIGHT_IS_FB
            + activity.is_doc * WEIGHT_IS_DOC;
        Self::new(
            activity.pr_fb,
            activity.pr_doc,
            activity.pr_typo,
            activity.is_fb,
            activity.is_doc,
            total,
        )
    }

    /// Component-wise sum of the five counts. The total is carried additively
    /// from both operands, never recomputed from the summed components.
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(
            self.pr_fb + other.pr_fb,
            self.pr_doc + other.pr_doc,
            self.pr_typo + other.pr_typo,
            self.is_fb + other.is_fb,
            self.is_doc + other.is_doc,
            self.total + other.total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined(a: &UserActivity, b: &UserActivity) -> UserActivity {
        UserActivity::new(
            a.pr_fb + b.pr_fb,
            a.pr_doc + b.pr_doc,
            a.pr_typo + b.pr_typo,
            a.is_fb + b.is_fb,
            a.is_doc + b.is_doc,
        )
    }

    #[test]
    fn merge_sums_components_and_total_independently() {
        let a = UserScore::new(1, 2, 3, 4, 5, 15);
        let b = UserScore::new(2, 3, 4, 5, 6, 20);
        let merged = a.merge(&b);
        assert_eq!(merged, UserScore::new(3, 5, 7, 9, 11, 35));
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let a = UserScore::new(1, 0, 2, 0, 1, 6);
        let b = UserScore::new(0, 3, 0, 1, 0, 8);
        let c = UserScore::new(2, 2, 2, 2, 2, 18);

        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn derivation_is_additive_over_disjoint_activity() {
        let samples = [
            (UserActivity::new(1, 2, 3, 4, 5), UserActivity::new(2, 3, 4, 5, 6)),
            (UserActivity::new(0, 0, 0, 0, 0), UserActivity::new(7, 0, 1, 0, 9)),
            (UserActivity::new(10, 1, 0, 3, 2), UserActivity::new(0, 4, 4, 0, 0)),
        ];
        for (a, b) in &samples {
            let separately = UserScore::from_activity(a).merge(&UserScore::from_activity(b));
            let together = UserScore::from_activity(&combined(a, b));
            assert_eq!(separately.total, together.total);
            assert_eq!(separately, together);
        }
    }
}
