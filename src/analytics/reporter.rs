//! Activity reporter: per-endpoint aggregation of the request log.

use std::collections::HashMap;

use crate::analytics::logger::RequestLogEntry;

/// Summary for `campaign-assistant activity`.
#[derive(Debug, Default)]
pub struct ActivitySummary {
    pub total_requests: usize,
    pub failed_requests: usize,
    pub endpoints: Vec<EndpointStat>,
}

impl ActivitySummary {
    /// Share of requests that did not end `ok`, as a percentage.
    pub fn failure_pct(&self) -> f64 {
        pct(self.failed_requests, self.total_requests)
    }
}

/// Aggregated statistics for one `METHOD path` pair.
#[derive(Debug, Clone)]
pub struct EndpointStat {
    pub endpoint: String,
    pub count: usize,
    pub ok: usize,
    pub rejected: usize,
    pub transport: usize,
    pub malformed: usize,
    pub avg_latency_ms: f64,
}

impl EndpointStat {
    pub fn failures(&self) -> usize {
        self.count - self.ok
    }
}

/// Aggregate log entries by endpoint, busiest first.
pub fn summarize(entries: &[RequestLogEntry]) -> ActivitySummary {
    let mut by_endpoint: HashMap<String, Vec<&RequestLogEntry>> = HashMap::new();
    for entry in entries {
        by_endpoint
            .entry(format!("{} {}", entry.method, entry.path))
            .or_default()
            .push(entry);
    }

    let mut endpoints: Vec<EndpointStat> = by_endpoint
        .into_iter()
        .map(|(endpoint, group)| {
            let count_outcome = |o: &str| group.iter().filter(|e| e.outcome == o).count();
            let total_latency: u64 = group.iter().map(|e| e.latency_ms).sum();
            EndpointStat {
                endpoint,
                count: group.len(),
                ok: count_outcome("ok"),
                rejected: count_outcome("rejected"),
                transport: count_outcome("transport"),
                malformed: count_outcome("malformed"),
                avg_latency_ms: total_latency as f64 / group.len() as f64,
            }
        })
        .collect();

    endpoints.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.endpoint.cmp(&b.endpoint)));

    ActivitySummary {
        total_requests: entries.len(),
        failed_requests: entries.iter().filter(|e| !e.is_ok()).count(),
        endpoints,
    }
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: &str, path: &str, outcome: &str, latency_ms: u64) -> RequestLogEntry {
        RequestLogEntry::new(method, path, outcome, latency_ms)
    }

    #[test]
    fn empty_log_summarizes_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_requests, 0);
        assert_eq!(summary.failure_pct(), 0.0);
        assert!(summary.endpoints.is_empty());
    }

    #[test]
    fn groups_by_endpoint_busiest_first() {
        let entries = vec![
            entry("GET", "/ads/status", "ok", 10),
            entry("POST", "/generate-report", "ok", 3000),
            entry("GET", "/ads/status", "transport", 30),
            entry("GET", "/ads/status", "ok", 20),
            entry("POST", "/generate-report", "rejected", 1000),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.total_requests, 5);
        assert_eq!(summary.failed_requests, 2);
        assert!((summary.failure_pct() - 40.0).abs() < f64::EPSILON);

        let status = &summary.endpoints[0];
        assert_eq!(status.endpoint, "GET /ads/status");
        assert_eq!(status.count, 3);
        assert_eq!(status.transport, 1);
        assert_eq!(status.failures(), 1);
        assert!((status.avg_latency_ms - 20.0).abs() < f64::EPSILON);

        let report = &summary.endpoints[1];
        assert_eq!(report.rejected, 1);
        assert!((report.avg_latency_ms - 2000.0).abs() < f64::EPSILON);
    }
}
