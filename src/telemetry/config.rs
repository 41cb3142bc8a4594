use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub headers: HashMap<String, String>,
    pub service_name: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("OTEL_ENABLED")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|| "http://localhost:4318/v1/traces".to_string());

        let service_name = lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| "alertgen".to_string());

        let mut headers = HashMap::new();
        if let Some(raw_headers) = lookup("OTEL_EXPORTER_OTLP_HEADERS") {
            // "key=value,key2=value2"
            for pair in raw_headers.split(',') {
                if let Some((k, v)) = pair.split_once('=') {
                    headers.insert(k.trim().to_string(), v.trim().to_string());
                }
            }
        }

        Self {
            enabled,
            endpoint,
            headers,
            service_name,
        }
    }
}
