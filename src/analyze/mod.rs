mod aggregate;

pub use aggregate::ScoreAggregate;
