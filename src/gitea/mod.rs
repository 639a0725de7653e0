pub mod collector;

pub use collector::Activities;
pub use collector::ActivityCollector;
pub use collector::GiteaCollector;
