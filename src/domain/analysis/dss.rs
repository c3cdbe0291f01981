//! DSS Combiner - merges environmental, social and financial indicators
//! into category scores, an overall score and a ranking using AHP weights.
//!
//! Inputs are already-computed KPI reports. Indicator statuses are
//! normalized to [0,1] through a [`StatusMapping`]; financial indicators have
//! no data source and use fixed normalized values unless overridden.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{KpiStatus, StatusMapping, ValidationError};
use crate::domain::kpi::catalog::{self, ENV_DSS_KPIS, SOCIAL_KPIS};
use crate::domain::kpi::{round_to, KpiReport, ReportPeriod, TargetSection};

use super::ahp::{AhpEngine, PairwiseMatrix, CR_THRESHOLD};

/// Financial indicators: key, label, default normalized value.
pub const FINANCIAL_INDICATORS: &[(&str, &str, f64)] = &[
    (
        "sustainable_cost_index",
        "Indice costo produzione sostenibile",
        0.60,
    ),
    (
        "energy_efficiency_index",
        "Indice efficienza energetica",
        0.70,
    ),
    (
        "revenue_impact_index",
        "Impatto ricavi prodotti sostenibili",
        0.55,
    ),
];

/// Default category comparisons over [ENV, SOC, FIN]: environmental and
/// financial moderately preferred over social.
pub const DEFAULT_CATEGORY_MATRIX: [[f64; 3]; 3] = [
    [1.0, 3.0, 1.0],
    [1.0 / 3.0, 1.0, 1.0 / 3.0],
    [1.0, 3.0, 1.0],
];

const RECIPROCITY_TOLERANCE: f64 = 1e-6;

/// Display status of a financial value: ≥0.8 green, ≥0.6 yellow, else red.
pub fn financial_status(value: f64) -> KpiStatus {
    if value >= 0.8 {
        KpiStatus::Green
    } else if value >= 0.6 {
        KpiStatus::Yellow
    } else {
        KpiStatus::Red
    }
}

/// DSS category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "ENV")]
    Environmental,
    #[serde(rename = "SOC")]
    Social,
    #[serde(rename = "FIN")]
    Financial,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Environmental,
        Category::Social,
        Category::Financial,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Environmental => "ENV",
            Category::Social => "SOC",
            Category::Financial => "FIN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Environmental => "Ambientale",
            Category::Social => "Sociale",
            Category::Financial => "Finanziario",
        }
    }

    fn matrix_field(&self) -> &'static str {
        match self {
            Category::Environmental => "env_matrix",
            Category::Social => "social_matrix",
            Category::Financial => "financial_matrix",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Options for one combination.
#[derive(Debug, Clone, PartialEq)]
pub struct DssOptions {
    pub category_matrix: Option<PairwiseMatrix>,
    pub env_matrix: Option<PairwiseMatrix>,
    pub social_matrix: Option<PairwiseMatrix>,
    pub financial_matrix: Option<PairwiseMatrix>,
    /// Overrides for financial normalized values, each in [0,1].
    pub financial_values: BTreeMap<String, f64>,
    pub status_mapping: StatusMapping,
    pub cr_threshold: f64,
    pub decimals: u32,
}

impl Default for DssOptions {
    fn default() -> Self {
        Self {
            category_matrix: None,
            env_matrix: None,
            social_matrix: None,
            financial_matrix: None,
            financial_values: BTreeMap::new(),
            status_mapping: StatusMapping::standard(),
            cr_threshold: CR_THRESHOLD,
            decimals: 2,
        }
    }
}

impl DssOptions {
    fn matrix_for(&self, category: Category) -> Option<&PairwiseMatrix> {
        match category {
            Category::Environmental => self.env_matrix.as_ref(),
            Category::Social => self.social_matrix.as_ref(),
            Category::Financial => self.financial_matrix.as_ref(),
        }
    }

    fn validate_financial_values(&self) -> Result<(), ValidationError> {
        for (key, value) in &self.financial_values {
            if !FINANCIAL_INDICATORS.iter().any(|(k, _, _)| k == key) {
                return Err(ValidationError::invalid_format(
                    format!("financial_mock_values.{}", key),
                    "unknown financial indicator",
                ));
            }
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(ValidationError::out_of_range(
                    format!("financial_mock_values.{}", key),
                    0.0,
                    1.0,
                    *value,
                ));
            }
        }
        Ok(())
    }
}

fn serialize_weights<S: Serializer>(
    weights: &[(String, f64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(weights.iter().map(|(k, w)| (k.as_str(), w)))
}

/// Category weights keyed ENV/SOC/FIN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryWeights {
    #[serde(rename = "ENV")]
    pub environmental: f64,
    #[serde(rename = "SOC")]
    pub social: f64,
    #[serde(rename = "FIN")]
    pub financial: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Environmental => self.environmental,
            Category::Social => self.social,
            Category::Financial => self.financial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAhp {
    pub weights: CategoryWeights,
    pub cr: f64,
}

/// Intra-category weights, in indicator order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorAhp {
    #[serde(serialize_with = "serialize_weights")]
    pub indicators: Vec<(String, f64)>,
    pub cr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpSection {
    pub category: CategoryAhp,
    pub environment: IndicatorAhp,
    pub social: IndicatorAhp,
    pub financial: IndicatorAhp,
}

/// One indicator inside a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorEntry {
    #[serde(skip)]
    pub key: String,
    pub label: String,
    pub status: KpiStatus,
    /// Normalized [0,1] value, `None` when excluded.
    pub value: Option<f64>,
    pub weight: f64,
}

fn serialize_entries<S: Serializer>(
    entries: &[IndicatorEntry],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|e| (e.key.as_str(), e)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSets {
    #[serde(serialize_with = "serialize_entries")]
    pub environment: Vec<IndicatorEntry>,
    #[serde(serialize_with = "serialize_entries")]
    pub social: Vec<IndicatorEntry>,
    #[serde(serialize_with = "serialize_entries")]
    pub financial: Vec<IndicatorEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DssScores {
    pub environment: f64,
    pub social: f64,
    pub financial: f64,
    pub overall: f64,
}

impl DssScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Environmental => self.environment,
            Category::Social => self.social,
            Category::Financial => self.financial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingEntry {
    pub category: Category,
    pub score: f64,
}

/// Composite view of one indicator's effect on the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub label: String,
    pub category: Category,
    pub final_weight: f64,
    pub norm_value: f64,
    pub contribution: f64,
    /// Distance from the ideal normalized value 1.0.
    pub gap: f64,
}

/// Decision report. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DssReport {
    pub period: ReportPeriod,
    pub facility: Option<String>,
    pub ahp: AhpSection,
    pub indicators: IndicatorSets,
    pub scores: DssScores,
    /// Category scores, highest first.
    pub ranking: Vec<RankingEntry>,
    pub line_items: Vec<LineItem>,
    pub status_mapping: StatusMapping,
    pub notes: Vec<String>,
}

/// Weighted evaluation of one category before rounding.
struct CategoryOutcome {
    entries: Vec<IndicatorEntry>,
    cr: f64,
    score: f64,
}

pub struct DssCombiner;

impl DssCombiner {
    /// Combines the environmental and social reports with financial values.
    ///
    /// `env_report` and `social_report` must contain rows for the DSS
    /// indicators (missing rows count as not available).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a supplied matrix does not match its
    /// indicator set or a financial override is outside [0,1].
    pub fn combine(
        env_report: &KpiReport,
        social_report: &KpiReport,
        env_targets: &TargetSection,
        social_targets: &TargetSection,
        options: &DssOptions,
    ) -> Result<DssReport, ValidationError> {
        options.status_mapping.validate()?;
        options.validate_financial_values()?;

        let mut notes = Vec::new();

        let category_matrix = match &options.category_matrix {
            Some(matrix) => {
                if matrix.size() != Category::ALL.len() {
                    return Err(ValidationError::dimension_mismatch(
                        "cat_matrix",
                        Category::ALL.len(),
                        matrix.size(),
                    ));
                }
                matrix.clone()
            }
            None => PairwiseMatrix::try_new(DEFAULT_CATEGORY_MATRIX.iter().map(|r| r.to_vec()).collect())?,
        };
        let category_ahp = AhpEngine::evaluate(&category_matrix);
        Self::check_matrix(
            "categorie",
            options.category_matrix.as_ref(),
            category_ahp.cr,
            options.cr_threshold,
            &mut notes,
        );

        let env_statuses: Vec<(String, KpiStatus)> = ENV_DSS_KPIS
            .iter()
            .filter(|key| env_targets.has_thresholds(key))
            .map(|key| (key.to_string(), Self::status_in(env_report, key)))
            .collect();
        let social_statuses: Vec<(String, KpiStatus)> = SOCIAL_KPIS
            .iter()
            .filter(|key| social_targets.has_thresholds(key))
            .map(|key| (key.to_string(), Self::status_in(social_report, key)))
            .collect();

        let mapping = &options.status_mapping;
        let env_inputs = env_statuses
            .into_iter()
            .map(|(key, status)| (key, status, mapping.normalize(status)))
            .collect();
        let social_inputs = social_statuses
            .into_iter()
            .map(|(key, status)| (key, status, mapping.normalize(status)))
            .collect();
        let financial_inputs = FINANCIAL_INDICATORS
            .iter()
            .map(|(key, _, default)| {
                let value = options.financial_values.get(*key).copied().unwrap_or(*default);
                (key.to_string(), financial_status(value), Some(value))
            })
            .collect();

        let env = Self::evaluate_category(Category::Environmental, env_inputs, options, &mut notes)?;
        let social = Self::evaluate_category(Category::Social, social_inputs, options, &mut notes)?;
        let financial =
            Self::evaluate_category(Category::Financial, financial_inputs, options, &mut notes)?;

        if env_report.has_no_data() {
            notes.push("Finestra dati ambientali vuota o senza valori: KPI ambientali N/D.".to_string());
        }
        if social_report.has_no_data() {
            notes.push("Nessun dato sociale nella finestra selezionata: KPI sociali N/D.".to_string());
        }

        let weights = &category_ahp.weights;
        let overall = weights[0] * env.score + weights[1] * social.score + weights[2] * financial.score;

        let d = options.decimals;
        let outcomes = [(Category::Environmental, &env), (Category::Social, &social), (Category::Financial, &financial)];

        let mut line_items = Vec::new();
        for (i, (category, outcome)) in outcomes.iter().enumerate() {
            for entry in &outcome.entries {
                let Some(norm) = entry.value else { continue };
                let final_weight = weights[i] * entry.weight;
                line_items.push(LineItem {
                    name: entry.key.clone(),
                    label: entry.label.clone(),
                    category: *category,
                    final_weight: round_to(final_weight, d),
                    norm_value: round_to(norm, d),
                    contribution: round_to(final_weight * norm, d),
                    gap: round_to(1.0 - norm, d),
                });
            }
        }

        let scores = DssScores {
            environment: round_to(env.score, d),
            social: round_to(social.score, d),
            financial: round_to(financial.score, d),
            overall: round_to(overall, d),
        };
        let mut ranking: Vec<RankingEntry> = Category::ALL
            .iter()
            .map(|c| RankingEntry {
                category: *c,
                score: scores.get(*c),
            })
            .collect();
        // stable: equal scores keep ENV, SOC, FIN order
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

        let cr_decimals = d.max(3);
        let indicator_ahp = |outcome: &CategoryOutcome| IndicatorAhp {
            indicators: outcome
                .entries
                .iter()
                .map(|e| (e.key.clone(), round_to(e.weight, d)))
                .collect(),
            cr: round_to(outcome.cr, cr_decimals),
        };
        let ahp = AhpSection {
            category: CategoryAhp {
                weights: CategoryWeights {
                    environmental: round_to(weights[0], d),
                    social: round_to(weights[1], d),
                    financial: round_to(weights[2], d),
                },
                cr: round_to(category_ahp.cr, cr_decimals),
            },
            environment: indicator_ahp(&env),
            social: indicator_ahp(&social),
            financial: indicator_ahp(&financial),
        };

        let round_entries = |entries: Vec<IndicatorEntry>| -> Vec<IndicatorEntry> {
            entries
                .into_iter()
                .map(|mut e| {
                    e.value = e.value.map(|v| round_to(v, d));
                    e.weight = round_to(e.weight, d);
                    e
                })
                .collect()
        };

        Ok(DssReport {
            period: env_report.period.clone(),
            facility: social_report.facility.clone(),
            ahp,
            indicators: IndicatorSets {
                environment: round_entries(env.entries),
                social: round_entries(social.entries),
                financial: round_entries(financial.entries),
            },
            scores,
            ranking,
            line_items,
            status_mapping: options.status_mapping,
            notes,
        })
    }

    fn status_in(report: &KpiReport, key: &str) -> KpiStatus {
        report
            .row(key)
            .map(|row| row.status)
            .unwrap_or(KpiStatus::NotAvailable)
    }

    /// Weights one category's indicators and computes its score.
    ///
    /// Indicators with no normalized value are dropped after weighting and
    /// the remaining weights renormalised.
    fn evaluate_category(
        category: Category,
        inputs: Vec<(String, KpiStatus, Option<f64>)>,
        options: &DssOptions,
        notes: &mut Vec<String>,
    ) -> Result<CategoryOutcome, ValidationError> {
        let supplied = options.matrix_for(category);
        let n = inputs.len();

        if let Some(matrix) = supplied {
            if matrix.size() != n {
                return Err(ValidationError::dimension_mismatch(
                    category.matrix_field(),
                    n,
                    matrix.size(),
                ));
            }
        }
        if n == 0 {
            notes.push(format!(
                "Nessun indicatore con soglie per la categoria {}: score 0.",
                category.label()
            ));
            return Ok(CategoryOutcome {
                entries: Vec::new(),
                cr: 0.0,
                score: 0.0,
            });
        }

        let matrix = match supplied {
            Some(matrix) => matrix.clone(),
            None => PairwiseMatrix::equal(n)?,
        };
        let result = AhpEngine::evaluate(&matrix);
        Self::check_matrix(
            category.label(),
            supplied,
            result.cr,
            options.cr_threshold,
            notes,
        );

        let kept: f64 = inputs
            .iter()
            .zip(&result.weights)
            .filter(|((_, _, value), _)| value.is_some())
            .map(|(_, w)| w)
            .sum();

        let excluded: Vec<&str> = inputs
            .iter()
            .filter(|(_, _, value)| value.is_none())
            .map(|(key, _, _)| catalog::label(key))
            .collect();
        if !excluded.is_empty() {
            notes.push(format!(
                "{}: indicatori N/D esclusi dal calcolo ({}).",
                category.label(),
                excluded.join(", ")
            ));
        }

        let entries: Vec<IndicatorEntry> = inputs
            .into_iter()
            .zip(&result.weights)
            .map(|((key, status, value), w)| {
                let weight = match value {
                    Some(_) if kept > 0.0 => w / kept,
                    _ => 0.0,
                };
                IndicatorEntry {
                    label: indicator_label(&key).to_string(),
                    key,
                    status,
                    value,
                    weight,
                }
            })
            .collect();

        let score = entries
            .iter()
            .filter_map(|e| e.value.map(|v| v * e.weight))
            .sum();

        Ok(CategoryOutcome {
            entries,
            cr: result.cr,
            score,
        })
    }

    /// Adds advisory notes for an inconsistent or non-reciprocal matrix.
    fn check_matrix(
        name: &str,
        supplied: Option<&PairwiseMatrix>,
        cr: f64,
        threshold: f64,
        notes: &mut Vec<String>,
    ) {
        if cr > threshold {
            tracing::warn!(matrix = name, cr, threshold, "AHP consistency ratio above threshold");
            notes.push(format!(
                "CR matrice {} = {:.3} > {}: giudizi poco coerenti, rivedere i confronti.",
                name, cr, threshold
            ));
        }
        if let Some(matrix) = supplied {
            let violations = matrix.reciprocity_violations(RECIPROCITY_TOLERANCE);
            if !violations.is_empty() {
                let pairs: Vec<String> = violations
                    .iter()
                    .map(|(i, j)| format!("({},{})", i + 1, j + 1))
                    .collect();
                notes.push(format!(
                    "Matrice {} non reciproca nelle coppie {}.",
                    name,
                    pairs.join(", ")
                ));
            }
        }
    }
}

fn indicator_label(key: &str) -> &str {
    FINANCIAL_INDICATORS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, label, _)| *label)
        .unwrap_or_else(|| catalog::label(key))
}
