use crate::report::{ReportBody, ReportContext};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a> {
    generated_at: DateTime<Utc>,
    event: &'a str,
    snapshot_sha256: &'a str,
    net_max_over_par: i32,
    #[serde(flatten)]
    body: ReportBody<'a>,
}

pub fn to_json(context: &ReportContext, body: ReportBody) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope {
        generated_at: Utc::now(),
        event: context.event,
        snapshot_sha256: context.snapshot_sha256,
        net_max_over_par: context.net_max_over_par,
        body,
    })
}
