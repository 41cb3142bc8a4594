use crate::error::AlertGenError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Grafana alert rule group as accepted by the provisioning API
/// https://grafana.com/docs/grafana/latest/developers/http_api/alerting_provisioning/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRuleGroup {
    /// Name of the group, unique within its folder
    pub title: String,

    /// UID of the folder the group is stored in
    #[serde(rename = "folderUid")]
    pub folder_uid: String,

    /// Evaluation interval in seconds
    pub interval: i64,

    /// Rules evaluated together in this group
    #[serde(default)]
    pub rules: Vec<ProvisionedAlertRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedAlertRule {
    pub uid: String,

    #[serde(rename = "orgID")]
    pub org_id: i64,

    #[serde(rename = "folderUID")]
    pub folder_uid: String,

    #[serde(rename = "ruleGroup")]
    pub rule_group: String,

    pub title: String,

    /// refId of the query or expression whose result decides the rule state
    pub condition: String,

    /// Queries and expressions evaluated by the rule
    pub data: Vec<AlertQuery>,

    #[serde(rename = "noDataState")]
    pub no_data_state: String,

    #[serde(rename = "execErrState")]
    pub exec_err_state: String,

    /// Pending period before firing (e.g., "5m")
    #[serde(rename = "for")]
    pub pending_for: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: IndexMap<String, String>,

    #[serde(default, rename = "isPaused")]
    pub is_paused: bool,

    /// Present only on recording rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertQuery {
    #[serde(rename = "refId")]
    pub ref_id: String,

    #[serde(default, rename = "queryType")]
    pub query_type: String,

    #[serde(rename = "relativeTimeRange")]
    pub relative_time_range: RelativeTimeRange,

    #[serde(rename = "datasourceUid")]
    pub datasource_uid: String,

    /// Datasource-specific query model
    pub model: serde_json::Value,
}

/// Query window in seconds relative to evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTimeRange {
    pub from: i64,
    pub to: i64,
}

/// Recording rule target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the metric written by the rule
    pub metric: String,

    /// refId of the query whose result is recorded
    pub from: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_datasource_uid: String,
}

impl AlertRuleGroup {
    /// Check that every rule points back at this group and its folder
    pub fn validate(&self) -> Result<(), AlertGenError> {
        if self.title.is_empty() {
            return Err(AlertGenError::InvalidConfig(
                "Rule group title must not be empty".to_string(),
            ));
        }

        for rule in &self.rules {
            if rule.rule_group != self.title || rule.folder_uid != self.folder_uid {
                return Err(AlertGenError::InvalidConfig(format!(
                    "Rule {} belongs to {}/{}, not {}/{}",
                    rule.uid, rule.folder_uid, rule.rule_group, self.folder_uid, self.title
                )));
            }
        }

        Ok(())
    }
}

impl ProvisionedAlertRule {
    pub fn is_recording(&self) -> bool {
        self.record.is_some()
    }
}
