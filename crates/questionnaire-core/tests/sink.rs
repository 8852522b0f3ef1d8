use std::io::Write;

use questionnaire_core::{
    JsonLinesSink, MemorySink, Questionnaire, SubmissionAck, SubmissionSink, TracingSink,
};
use questionnaire_spec::Submission;
use serde_json::Value;

fn completed_submission() -> Submission {
    let mut controller = Questionnaire::microcement()
        .expect("builtin questionnaire")
        .controller();
    controller.select_single("userType", "Architect").unwrap();
    controller.go_next().unwrap();
    controller.select_single("projectType", "For myself").unwrap();
    controller.go_next().unwrap();
    controller.toggle_multi("space", "Stairs").unwrap();
    controller.go_next().unwrap();
    controller.set_text("area", "12").unwrap();
    controller.go_next().unwrap();
    controller.toggle_multi("surface", "OSB Boards").unwrap();
    controller.go_next().unwrap();
    controller.set_text("name", "Marko").unwrap();
    controller.set_text("email", "marko@example.com").unwrap();
    controller.set_text("phone", "+385 1 234").unwrap();
    controller.go_next().unwrap();
    controller.submission().unwrap()
}

#[test]
fn json_lines_sink_writes_one_flat_record_per_line() {
    let sink = JsonLinesSink::new(Vec::new());
    let submission = completed_submission();
    assert_eq!(sink.submit(&submission), SubmissionAck::Submitted);
    assert_eq!(sink.submit(&submission), SubmissionAck::Submitted);

    let written = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    let record: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["space"], serde_json::json!(["Stairs"]));
    assert_eq!(record["phone"], "+385 1 234");
    assert!(record.get("form_id").is_none());
}

#[test]
fn json_lines_sink_appends_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("submissions.jsonl");
    let submission = completed_submission();

    JsonLinesSink::append(&path).unwrap().submit(&submission);
    JsonLinesSink::append(&path).unwrap().submit(&submission);

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 2);
}

struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failures_become_failed_acks() {
    let sink = JsonLinesSink::new(BrokenWriter);
    match sink.submit(&completed_submission()) {
        SubmissionAck::Failed { reason } => assert!(reason.contains("disk full")),
        other => panic!("unexpected ack {other:?}"),
    }
}

#[test]
fn memory_and_tracing_sinks_acknowledge() {
    let submission = completed_submission();
    let memory = MemorySink::new();
    assert!(memory.is_empty());
    assert!(memory.submit(&submission).is_submitted());
    assert_eq!(memory.submissions(), vec![submission.clone()]);
    assert!(TracingSink.submit(&submission).is_submitted());
}

#[test]
fn acknowledgement_serializes_with_status_tag() {
    let failed = SubmissionAck::Failed {
        reason: "offline".into(),
    };
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        serde_json::json!({"status": "failed", "reason": "offline"})
    );
    assert_eq!(
        serde_json::to_value(SubmissionAck::Submitted).unwrap(),
        serde_json::json!({"status": "submitted"})
    );
}
