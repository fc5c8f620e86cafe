// src/health/checker.rs
use super::status::{ComponentHealth, HealthReport, HealthStatus, EMPTY_REPORT_JSON};
use arc_swap::ArcSwap;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Tracks the health of named components.
///
/// The checker is healthy while no component is reported unhealthy, which
/// includes the case where nothing has been reported yet. Each component is
/// stored once with its latest report, so it is never healthy and unhealthy
/// at the same time.
///
/// Writers publish a fresh copy of the component map; readers always see
/// one complete snapshot and never block writers.
#[derive(Debug)]
pub struct Checker {
    components: ArcSwap<HashMap<String, ComponentHealth>>,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            components: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Mark `component` healthy. A missing message is stored as `""`.
    pub fn set_healthy(&self, component: &str, message: Option<&str>) {
        let health = ComponentHealth::Healthy {
            message: message.unwrap_or_default().to_string(),
        };
        self.record(component, health);
    }

    /// Mark `component` unhealthy. The message is mandatory and must not be empty.
    pub fn set_not_healthy(&self, component: &str, message: &str) -> Result<(), CheckerError> {
        if message.is_empty() {
            return Err(CheckerError::InvalidArgument(format!(
                "a message is required to mark component '{}' not healthy",
                component
            )));
        }

        let health = ComponentHealth::Unhealthy {
            message: message.to_string(),
        };
        self.record(component, health);
        Ok(())
    }

    pub fn is_healthy(&self) -> bool {
        self.components
            .load()
            .values()
            .all(ComponentHealth::is_healthy)
    }

    pub fn component(&self, component: &str) -> Option<ComponentHealth> {
        self.components.load().get(component).cloned()
    }

    pub fn report(&self) -> HealthReport {
        let components = self.components.load();
        let mut report = HealthReport::default();

        for (name, health) in components.iter() {
            let group = match health {
                ComponentHealth::Healthy { .. } => &mut report.healthy,
                ComponentHealth::Unhealthy { .. } => &mut report.not_healthy,
            };
            group.insert(name.clone(), health.message().to_string());
        }

        report
    }

    /// Aggregate status plus the JSON description served to probes.
    pub fn status(&self) -> HealthStatus {
        let report = self.report();
        // String-keyed maps always serialize; keep the body shape if that ever changes.
        let description = report.to_json().unwrap_or_else(|err| {
            error!(%err, "Failed to serialize health report");
            EMPTY_REPORT_JSON.to_string()
        });

        HealthStatus {
            healthy: report.is_healthy(),
            description,
        }
    }

    fn record(&self, component: &str, health: ComponentHealth) {
        let previous = self.components.rcu(|current| {
            let mut next = (**current).clone();
            next.insert(component.to_string(), health.clone());
            next
        });

        let was_healthy = previous.get(component).map(ComponentHealth::is_healthy);
        match (was_healthy, &health) {
            (Some(true) | None, ComponentHealth::Unhealthy { message }) => {
                warn!(component, %message, "Component is now unhealthy");
            }
            (Some(false), ComponentHealth::Healthy { message }) => {
                info!(component, %message, "Component recovered");
            }
            (_, health) => {
                debug!(component, message = health.message(), healthy = health.is_healthy(), "Component status updated");
            }
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    const COMPONENTS: [&str; 6] = ["A", "B", "C", "a", "bb", "c0"];

    fn parse(status: &HealthStatus) -> HealthReport {
        serde_json::from_str(&status.description).unwrap()
    }

    #[test]
    fn test_empty_checker_is_healthy() {
        let checker = Checker::new();
        let status = checker.status();

        assert!(status.healthy);
        assert_eq!(parse(&status), HealthReport::default());
        assert_eq!(status.description, r#"{"healthy": {}, "not healthy": {}}"#);
    }

    #[test]
    fn test_set_healthy_without_message() {
        let checker = Checker::new();
        checker.set_healthy("any", None);

        assert!(checker.is_healthy());
        assert_eq!(
            checker.component("any"),
            Some(ComponentHealth::Healthy { message: String::new() })
        );
    }

    #[test]
    fn test_unreported_component_in_neither_group() {
        let checker = Checker::new();
        checker.set_healthy("A", None);
        checker.set_not_healthy("B", "bad").unwrap();

        assert_eq!(checker.component("never"), None);
        let report = checker.report();
        assert!(!report.healthy.contains_key("never"));
        assert!(!report.not_healthy.contains_key("never"));
        assert!(!checker.status().description.contains("never"));
    }

    #[test]
    fn test_set_not_healthy_requires_message() {
        let checker = Checker::new();
        checker.set_healthy("any", Some("fine"));

        let err = checker.set_not_healthy("any", "").unwrap_err();
        assert!(matches!(err, CheckerError::InvalidArgument(_)));

        // state untouched
        assert!(checker.is_healthy());
        assert_eq!(checker.component("any").unwrap().message(), "fine");
    }

    #[test]
    fn test_single_unhealthy_component() {
        let checker = Checker::new();
        checker.set_not_healthy("any", "msg").unwrap();

        let status = checker.status();
        assert!(!status.healthy);
        assert_eq!(parse(&status).not_healthy.get("any").map(String::as_str), Some("msg"));
    }

    #[test]
    fn test_recovered_component_is_healthy_with_empty_message() {
        let checker = Checker::new();
        checker.set_not_healthy("X", "bad").unwrap();
        checker.set_healthy("X", None);

        let report = checker.report();
        assert!(checker.is_healthy());
        assert_eq!(report.healthy.get("X").map(String::as_str), Some(""));
        assert!(!report.not_healthy.contains_key("X"));
    }

    #[test]
    fn test_repeated_set_healthy_keeps_latest_message() {
        let checker = Checker::new();
        checker.set_healthy("A", Some("first"));
        checker.set_healthy("A", Some("second"));

        let report = checker.report();
        assert_eq!(report.healthy.len(), 1);
        assert_eq!(report.healthy["A"], "second");
    }

    #[test]
    fn test_any_unhealthy_component_fails_aggregate() {
        for sick in COMPONENTS {
            let checker = Checker::new();
            for component in COMPONENTS {
                if component == sick {
                    checker.set_not_healthy(component, "is sick").unwrap();
                } else {
                    checker.set_healthy(component, None);
                }
            }

            let status = checker.status();
            assert!(!status.healthy, "{} should make the checker unhealthy", sick);
            assert_eq!(parse(&status).not_healthy.len(), 1);
        }
    }

    #[test]
    fn test_report_lists_components_and_messages() {
        let checker = Checker::new();
        checker.set_healthy("A", Some("ok"));
        checker.set_healthy("B", Some("ok"));
        checker.set_not_healthy("B", "bad").unwrap();

        let status = checker.status();
        assert!(!status.healthy);

        let mut expected = HealthReport::default();
        expected.healthy.insert("A".into(), "ok".into());
        expected.not_healthy.insert("B".into(), "bad".into());
        assert_eq!(parse(&status), expected);
    }

    #[test]
    fn test_independent_checkers() {
        let first = Checker::new();
        let second = Checker::new();
        first.set_healthy("A", None);
        second.set_not_healthy("A", "sick").unwrap();

        assert!(first.is_healthy());
        assert!(!second.is_healthy());
        assert_eq!(first.status().description, r#"{"healthy": {"A": ""}, "not healthy": {}}"#);
        assert_eq!(second.status().description, r#"{"healthy": {}, "not healthy": {"A": "sick"}}"#);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let checker = Arc::new(Checker::new());

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let checker = checker.clone();
                scope.spawn(move || {
                    for i in 0..50 {
                        let component = format!("w{}-{}", worker, i);
                        checker.set_not_healthy(&component, "starting").unwrap();
                        checker.set_healthy(&component, Some("ready"));
                        let _ = checker.status();
                    }
                });
            }
        });

        let report = checker.report();
        assert_eq!(report.healthy.len(), 8 * 50);
        assert!(report.not_healthy.is_empty());
        assert!(checker.is_healthy());
    }

    proptest! {
        #[test]
        fn prop_components_partition_and_aggregate(
            ops in prop::collection::vec((0usize..4, any::<bool>(), "[a-z]{1,8}"), 0..40)
        ) {
            let checker = Checker::new();
            let mut model: HashMap<String, (bool, String)> = HashMap::new();

            for (idx, healthy, message) in ops {
                let component = format!("c{}", idx);
                if healthy {
                    checker.set_healthy(&component, Some(message.as_str()));
                } else {
                    checker.set_not_healthy(&component, &message).unwrap();
                }
                model.insert(component, (healthy, message));
            }

            let report = checker.report();
            for name in report.healthy.keys() {
                prop_assert!(!report.not_healthy.contains_key(name));
            }
            prop_assert_eq!(report.healthy.len() + report.not_healthy.len(), model.len());
            for (name, (healthy, message)) in &model {
                let group = if *healthy { &report.healthy } else { &report.not_healthy };
                prop_assert_eq!(group.get(name), Some(message));
            }

            let status = checker.status();
            prop_assert_eq!(status.healthy, report.not_healthy.is_empty());
            prop_assert_eq!(status.healthy, model.values().all(|(healthy, _)| *healthy));
        }
    }
}
