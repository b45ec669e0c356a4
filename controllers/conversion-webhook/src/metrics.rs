//! Prometheus metrics for the conversion webhook

use prometheus::{IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::WebhookError;

/// Counters exposed on `/metrics`
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    converted_objects: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, WebhookError> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("capo_conversion_requests_total", "ConversionReview requests by result"),
            &["result"],
        )?;
        let converted_objects = IntCounterVec::new(
            Opts::new("capo_converted_objects_total", "Objects converted successfully by kind"),
            &["kind"],
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(converted_objects.clone()))?;

        Ok(Self {
            registry,
            requests,
            converted_objects,
        })
    }

    /// `result` is the ConversionReview status, `Success` or `Failure`
    pub fn record_request(&self, result: &str) {
        self.requests.with_label_values(&[result]).inc();
    }

    pub fn record_object(&self, kind: &str) {
        self.converted_objects.with_label_values(&[kind]).inc();
    }

    /// Text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_request("Success");
        metrics.record_object("OpenStackCluster");
        metrics.record_object("OpenStackCluster");

        let text = metrics.encode().unwrap();

        assert!(text.contains("capo_conversion_requests_total{result=\"Success\"} 1"), "{text}");
        assert!(
            text.contains("capo_converted_objects_total{kind=\"OpenStackCluster\"} 2"),
            "{text}"
        );
    }
}
