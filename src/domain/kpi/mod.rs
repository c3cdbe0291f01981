//! KPI evaluation - classification, trends, windowing and aggregation.
//!
//! Everything here is synchronous and side-effect free: callers hand over
//! already-loaded records and targets and get a freshly computed result.

pub mod catalog;
mod aggregator;
mod classifier;
mod record;
mod target;
mod trend;
mod window;

pub use aggregator::{
    round_to, KpiAggregator, KpiReport, KpiRow, KpiSnapshot, ReportOptions, ReportPeriod,
    ScoreBand, SnapshotWindow,
};
pub use catalog::Recommendation;
pub use classifier::ThresholdClassifier;
pub use record::{EnvironmentRecord, KpiSource, SocialRecord, TimeKeyed, GRAVITY};
pub use target::{
    Band, Direction, KpiTargets, TargetDefinition, TargetSection, YellowBands,
    DEFAULT_ENV_WINDOW_N, DEFAULT_SOCIAL_WINDOW_N, DEFAULT_TREND_EPSILON,
};
pub use trend::{Trend, TrendEstimator};
pub use window::{SelectBy, SelectedWindow, WindowSelection, WindowSelector};
