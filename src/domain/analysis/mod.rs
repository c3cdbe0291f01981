//! Analysis Module - Pure domain services for multi-criteria weighting.
//!
//! # Components
//!
//! - `AhpEngine` - AHP priority weights and consistency ratio
//! - `DssCombiner` - Environmental/social/financial combination with ranking
//!
//! Like the KPI module, everything here is stateless and takes already
//! computed inputs. No ports or adapters are involved.

mod ahp;
mod dss;

pub use ahp::{
    ahp_weights, AhpEngine, AhpResult, PairwiseMatrix, CR_THRESHOLD, RANDOM_INDEX,
    RANDOM_INDEX_FALLBACK,
};
pub use dss::{
    financial_status, AhpSection, Category, CategoryAhp, CategoryWeights, DssCombiner,
    DssOptions, DssReport, DssScores, IndicatorAhp, IndicatorEntry, IndicatorSets, LineItem,
    RankingEntry, DEFAULT_CATEGORY_MATRIX, FINANCIAL_INDICATORS,
};
