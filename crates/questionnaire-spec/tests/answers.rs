use questionnaire_spec::{AnswerRecord, AnswerValue, StepSchema, Submission};
use serde_json::json;

#[test]
fn defaults_cover_every_field_with_empty_values() {
    let schema = StepSchema::microcement();
    let answers = AnswerRecord::defaults_for(&schema);
    assert_eq!(answers.len(), 8);
    assert_eq!(
        answers.to_json(),
        json!({
            "userType": "",
            "projectType": "",
            "space": [],
            "area": "",
            "surface": [],
            "name": "",
            "email": "",
            "phone": ""
        })
    );
}

#[test]
fn get_mut_never_creates_fields() {
    let schema = StepSchema::microcement();
    let mut answers = AnswerRecord::defaults_for(&schema);
    assert!(answers.get_mut("budget").is_none());
    assert!(!answers.contains("budget"));
}

#[test]
fn submission_record_is_flat_and_keyed_by_field() {
    let schema = StepSchema::microcement();
    let mut answers = AnswerRecord::defaults_for(&schema);
    *answers.get_mut("userType").unwrap() = AnswerValue::Text("Investor".into());
    *answers.get_mut("space").unwrap() = AnswerValue::Choices(vec!["Wall".into()]);

    let submission = Submission::new(&schema, "hr", answers);
    assert_eq!(submission.form_id, "microcement");
    assert_eq!(submission.locale, "hr");
    assert!(submission.meta.as_ref().and_then(|meta| meta.created_at.as_ref()).is_some());

    let record = submission.record();
    assert_eq!(record["userType"], "Investor");
    assert_eq!(record["space"], json!(["Wall"]));
    assert_eq!(record["phone"], "");
}

#[test]
fn submission_encodes_as_cbor() {
    let schema = StepSchema::microcement();
    let submission = Submission::new(&schema, "en", AnswerRecord::defaults_for(&schema));
    let bytes = submission.to_cbor().expect("cbor encoding");
    assert!(!bytes.is_empty());
    let decoded: Submission = ciborium::from_reader(bytes.as_slice()).expect("cbor decoding");
    assert_eq!(decoded, submission);
}
