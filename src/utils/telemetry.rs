// file: src/utils/telemetry.rs
// description: store health reporting and operation timing
// reference: tracing-based observability

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn icon(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Degraded => "⚠",
            HealthStatus::Unhealthy => "✗",
        }
    }
}

/// Health of one dependency, e.g. the membership store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub component: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthCheck {
    /// Classifies a probe result; a successful but slow probe is degraded.
    pub fn from_probe<E: std::fmt::Display>(
        component: &str,
        probe: std::result::Result<Duration, E>,
        slow_threshold: Duration,
    ) -> Self {
        match probe {
            Ok(elapsed) if elapsed > slow_threshold => Self {
                component: component.to_string(),
                status: HealthStatus::Degraded,
                message: Some(format!(
                    "responded in {}ms (threshold {}ms)",
                    elapsed.as_millis(),
                    slow_threshold.as_millis()
                )),
                response_time_ms: elapsed.as_millis() as u64,
            },
            Ok(elapsed) => Self {
                component: component.to_string(),
                status: HealthStatus::Healthy,
                message: None,
                response_time_ms: elapsed.as_millis() as u64,
            },
            Err(e) => Self {
                component: component.to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                response_time_ms: 0,
            },
        }
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "{} {} ({:?}) - {}ms",
            self.status.icon(),
            self.component,
            self.status,
            self.response_time_ms
        );

        if let Some(ref msg) = self.message {
            output.push_str(&format!("\n  {}", msg));
        }

        output
    }
}

pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} - {} items in {:.2}s ({:.2} items/sec)",
            self.operation,
            count,
            elapsed.as_secs_f64(),
            if elapsed.as_secs_f64() > 0.0 {
                count as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            }
        );
        elapsed
    }

    pub fn checkpoint(&self, message: &str) {
        let elapsed = self.elapsed();
        info!(
            "Operation checkpoint [{}]: {} at {:.2}s",
            self.operation,
            message,
            elapsed.as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_classification() {
        let threshold = Duration::from_millis(500);

        let healthy = HealthCheck::from_probe::<String>(
            "store",
            Ok(Duration::from_millis(40)),
            threshold,
        );
        assert_eq!(healthy.status, HealthStatus::Healthy);
        assert_eq!(healthy.response_time_ms, 40);

        let slow = HealthCheck::from_probe::<String>(
            "store",
            Ok(Duration::from_millis(900)),
            threshold,
        );
        assert_eq!(slow.status, HealthStatus::Degraded);

        let down = HealthCheck::from_probe("store", Err("connection refused"), threshold);
        assert_eq!(down.status, HealthStatus::Unhealthy);
        assert!(down.format().contains("connection refused"));
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("test");
        std::thread::sleep(Duration::from_millis(10));
        timer.checkpoint("halfway");
        let elapsed = timer.finish_with_count(3);
        assert!(elapsed >= Duration::from_millis(10));
    }
}
