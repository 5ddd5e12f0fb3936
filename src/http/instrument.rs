use opentelemetry::{
    global,
    trace::{Span, SpanKind, Status, Tracer},
    KeyValue,
};
use reqwest::{Method, Url};
use std::time::Duration;

use crate::telemetry::get_tracer;

/// OpenTelemetry client span wrapped around one outgoing request.
pub struct ClientSpan {
    span: global::BoxedSpan,
}

impl ClientSpan {
    pub fn start(method: &Method, url: &Url, route: &str, request_id: &str) -> Self {
        let tracer = get_tracer("http-client");
        let mut span = tracer
            .span_builder(format!("{} {}", method, route))
            .with_kind(SpanKind::Client)
            .start(&tracer);

        set_span_attributes(&mut span, method, url, route);
        span.set_attribute(KeyValue::new("http.request_id", request_id.to_string()));

        Self { span }
    }

    pub fn finish(mut self, status_code: u16, duration: Duration) {
        self.span
            .set_attribute(KeyValue::new("http.status_code", status_code as i64));
        self.span.set_attribute(KeyValue::new(
            "http.response_time_ms",
            duration.as_millis() as i64,
        ));

        if status_code >= 500 {
            self.span.set_status(Status::Error {
                description: format!("HTTP {}", status_code).into(),
            });
        } else {
            self.span.set_status(Status::Ok);
        }
        self.span.end();
    }

    pub fn fail(mut self, error: &reqwest::Error) {
        self.span.set_status(Status::Error {
            description: error.to_string().into(),
        });
        self.span.end();
    }
}

fn set_span_attributes(span: &mut impl Span, method: &Method, url: &Url, route: &str) {
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("http.url", url.to_string()));
    span.set_attribute(KeyValue::new("http.route", route.to_string()));
    span.set_attribute(KeyValue::new("http.scheme", url.scheme().to_string()));

    if let Some(host) = url.host_str() {
        span.set_attribute(KeyValue::new("http.host", host.to_string()));
    }
}
