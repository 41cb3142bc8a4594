//! Seeded synthetic rule group generator
//!
//! Rules are built from a `StdRng` seeded with the config seed, so the same
//! config always yields byte-identical groups. Alerting and recording rules
//! are shuffled together, chunked into groups of `rulesPerGroup`, and the
//! groups are laid out `groupsPerFolder` at a time into folders named
//! `load-test-folder-<n>`.

use super::{Generator, GeneratorError};
use crate::config::GenerateConfig;
use crate::models::{AlertQuery, AlertRuleGroup, ProvisionedAlertRule, Record, RelativeTimeRange};
use indexmap::IndexMap;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom as _, SliceRandom as _};
use rand::{Rng, SeedableRng as _};
use serde_json::json;

/// Prefix of every folder UID the generator assigns
pub const FOLDER_UID_PREFIX: &str = "load-test-folder-";

/// Evaluation interval of generated groups, in seconds
pub const GROUP_INTERVAL_SECONDS: i64 = 60;

/// Datasource UID Grafana uses for server-side expressions
pub const EXPRESSION_DATASOURCE_UID: &str = "__expr__";

/// Upper bound on alerting plus recording rules in one run
pub const MAX_RULES: i64 = 1_000_000;

const UID_LENGTH: usize = 14;
const ORG_ID: i64 = 1;
const QUERY_WINDOW_SECONDS: i64 = 600;

const ADJECTIVES: &[&str] = &[
    "Amber", "Brisk", "Calm", "Dusty", "Eager", "Faint", "Gentle", "Hollow", "Idle", "Jagged",
    "Keen", "Lucky", "Mellow", "Noisy", "Odd", "Proud", "Quiet", "Rapid", "Silent", "Tidy",
];

const NOUNS: &[&str] = &[
    "api", "cache", "database", "disk", "gateway", "ingress", "kafka", "latency", "memory",
    "network", "queue", "scheduler", "storage", "worker",
];

const METRICS: &[&str] = &[
    "up",
    "go_goroutines",
    "http_requests_total",
    "http_request_duration_seconds_count",
    "node_cpu_seconds_total",
    "node_memory_MemAvailable_bytes",
    "process_resident_memory_bytes",
];

const TEAMS: &[&str] = &["alerting", "backend", "frontend", "platform", "storage"];
const SEVERITIES: &[&str] = &["critical", "warning", "info"];
const PENDING_PERIODS: &[&str] = &["0s", "1m", "5m", "10m"];

/// Default [`Generator`] producing random but reproducible rule groups
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    fn alerting_rule(rng: &mut StdRng, config: &GenerateConfig, index: i64) -> ProvisionedAlertRule {
        let noun = pick(rng, NOUNS);
        let title = format!("{} {} alert {}", pick(rng, ADJECTIVES), noun, index);
        let threshold = rng.random_range(1..=100);

        let mut labels = IndexMap::new();
        labels.insert("team".to_string(), pick(rng, TEAMS).to_string());
        labels.insert("severity".to_string(), pick(rng, SEVERITIES).to_string());

        let mut annotations = IndexMap::new();
        annotations.insert(
            "summary".to_string(),
            format!("{} is above {}", noun, threshold),
        );

        let threshold_expression = AlertQuery {
            ref_id: "B".to_string(),
            query_type: String::new(),
            relative_time_range: RelativeTimeRange { from: 0, to: 0 },
            datasource_uid: EXPRESSION_DATASOURCE_UID.to_string(),
            model: json!({
                "refId": "B",
                "type": "threshold",
                "expression": "A",
                "conditions": [{"evaluator": {"type": "gt", "params": [threshold]}}],
                "datasource": {"type": EXPRESSION_DATASOURCE_UID, "uid": EXPRESSION_DATASOURCE_UID},
            }),
        };

        ProvisionedAlertRule {
            uid: random_uid(rng),
            org_id: ORG_ID,
            folder_uid: String::new(),
            rule_group: String::new(),
            title,
            condition: "B".to_string(),
            data: vec![Self::metric_query(rng, config), threshold_expression],
            no_data_state: "NoData".to_string(),
            exec_err_state: "Error".to_string(),
            pending_for: pick(rng, PENDING_PERIODS).to_string(),
            labels,
            annotations,
            is_paused: false,
            record: None,
        }
    }

    fn recording_rule(rng: &mut StdRng, config: &GenerateConfig, index: i64) -> ProvisionedAlertRule {
        let noun = pick(rng, NOUNS);
        let title = format!("{} {} recording {}", pick(rng, ADJECTIVES), noun, index);

        let mut labels = IndexMap::new();
        labels.insert("team".to_string(), pick(rng, TEAMS).to_string());

        ProvisionedAlertRule {
            uid: random_uid(rng),
            org_id: ORG_ID,
            folder_uid: String::new(),
            rule_group: String::new(),
            title,
            condition: "A".to_string(),
            data: vec![Self::metric_query(rng, config)],
            no_data_state: "NoData".to_string(),
            exec_err_state: "Error".to_string(),
            pending_for: "0s".to_string(),
            labels,
            annotations: IndexMap::new(),
            is_paused: false,
            record: Some(Record {
                metric: format!("generated_{}_{}", noun, index),
                from: "A".to_string(),
                target_datasource_uid: config.write_datasource.clone(),
            }),
        }
    }

    /// Query `A` against the configured query datasource
    fn metric_query(rng: &mut StdRng, config: &GenerateConfig) -> AlertQuery {
        let expr = format!("avg({})", pick(rng, METRICS));

        AlertQuery {
            ref_id: "A".to_string(),
            query_type: String::new(),
            relative_time_range: RelativeTimeRange {
                from: QUERY_WINDOW_SECONDS,
                to: 0,
            },
            datasource_uid: config.query_datasource.clone(),
            model: json!({
                "refId": "A",
                "expr": expr,
                "instant": true,
                "intervalMs": 1000,
                "maxDataPoints": 43200,
            }),
        }
    }
}

impl Generator for SyntheticGenerator {
    type Error = GeneratorError;

    fn generate(
        &self,
        config: &GenerateConfig,
        verbose: bool,
    ) -> Result<Vec<AlertRuleGroup>, Self::Error> {
        validate(config)?;

        if config.total_rules() == 0 {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(config.seed as u64);

        let requested = config.total_rules();
        let mut rules: Vec<ProvisionedAlertRule> = Vec::new();
        rules
            .try_reserve(usize::try_from(requested).unwrap_or(usize::MAX))
            .map_err(|_| GeneratorError::TooManyRules {
                requested,
                max: MAX_RULES,
            })?;
        rules.extend((0..config.num_alerting).map(|index| Self::alerting_rule(&mut rng, config, index)));
        rules.extend((0..config.num_recording).map(|index| Self::recording_rule(&mut rng, config, index)));
        rules.shuffle(&mut rng);

        let rules_per_group = usize::try_from(config.rules_per_group).unwrap_or(usize::MAX);
        let groups_per_folder = usize::try_from(config.groups_per_folder).unwrap_or(usize::MAX);

        let mut remaining = rules.into_iter().peekable();
        let mut groups = Vec::new();

        while remaining.peek().is_some() {
            let index = groups.len();
            let folder_uid = format!("{}{}", FOLDER_UID_PREFIX, index / groups_per_folder);
            let title = format!("{}-{}-group-{}", pick(&mut rng, NOUNS), pick(&mut rng, NOUNS), index);

            let group_rules: Vec<ProvisionedAlertRule> = remaining
                .by_ref()
                .take(rules_per_group)
                .map(|mut rule| {
                    rule.folder_uid = folder_uid.clone();
                    rule.rule_group = title.clone();
                    rule
                })
                .collect();

            if verbose {
                tracing::info!(group = %title, folder = %folder_uid, rules = group_rules.len(), "Generated rule group");
            } else {
                tracing::debug!(group = %title, folder = %folder_uid, rules = group_rules.len(), "Generated rule group");
            }

            groups.push(AlertRuleGroup {
                title,
                folder_uid,
                interval: GROUP_INTERVAL_SECONDS,
                rules: group_rules,
            });
        }

        if verbose {
            tracing::info!(
                groups = groups.len(),
                rules = config.total_rules(),
                seed = config.seed,
                "Rule generation complete"
            );
        }

        Ok(groups)
    }
}

fn validate(config: &GenerateConfig) -> Result<(), GeneratorError> {
    let counts = [
        ("alertRuleCount", config.num_alerting),
        ("recordingRuleCount", config.num_recording),
        ("rulesPerGroup", config.rules_per_group),
        ("groupsPerFolder", config.groups_per_folder),
    ];
    if let Some(&(field, value)) = counts.iter().find(|(_, value)| *value < 0) {
        return Err(GeneratorError::NegativeCount { field, value });
    }

    let requested = config.total_rules();
    if requested > MAX_RULES {
        return Err(GeneratorError::TooManyRules {
            requested,
            max: MAX_RULES,
        });
    }

    if requested > 0 {
        if config.rules_per_group == 0 {
            return Err(GeneratorError::ZeroRulesPerGroup);
        }
        if config.groups_per_folder == 0 {
            return Err(GeneratorError::ZeroGroupsPerFolder);
        }
    }

    Ok(())
}

fn pick(rng: &mut StdRng, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

fn random_uid(rng: &mut StdRng) -> String {
    rng.sample_iter(Alphanumeric)
        .take(UID_LENGTH)
        .map(char::from)
        .collect()
}
