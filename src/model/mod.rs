mod activity;
mod ident;
mod identity;
mod score;
mod target;

pub use activity::{LabelCounts, UserActivity};
pub use ident::{IdentMap, IdentSet};
pub use identity::IdentityResolver;
pub use score::UserScore;
pub use target::RepoTarget;
