pub mod alerting;

pub use alerting::{AlertQuery, AlertRuleGroup, ProvisionedAlertRule, Record, RelativeTimeRange};
