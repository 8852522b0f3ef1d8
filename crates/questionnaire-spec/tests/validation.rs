use questionnaire_spec::{AnswerRecord, AnswerValue, StepSchema, ValidationPolicy, validate_step};

fn set_text(answers: &mut AnswerRecord, field: &str, value: &str) {
    *answers.get_mut(field).expect("field exists") = AnswerValue::Text(value.into());
}

fn set_choices(answers: &mut AnswerRecord, field: &str, values: &[&str]) {
    *answers.get_mut(field).expect("field exists") =
        AnswerValue::Choices(values.iter().map(|value| value.to_string()).collect());
}

#[test]
fn defaults_fail_every_step() {
    let schema = StepSchema::microcement();
    let answers = AnswerRecord::defaults_for(&schema);
    for step in schema.steps() {
        let result = validate_step(step, &answers);
        assert!(!result.valid, "step {} should start incomplete", step.id);
        assert_eq!(result.step, step.id);
        assert!(result.errors.iter().all(|error| error.code == "missing"));
    }
}

#[test]
fn single_choice_requires_known_option() {
    let schema = StepSchema::microcement();
    let step = schema.step(0).unwrap();
    let mut answers = AnswerRecord::defaults_for(&schema);

    set_text(&mut answers, "userType", "Astronaut");
    let result = validate_step(step, &answers);
    assert!(!result.valid);
    assert_eq!(result.errors[0].code, "unknown_option");

    set_text(&mut answers, "userType", "Architect");
    assert!(ValidationPolicy.is_complete(step, &answers));
}

#[test]
fn multi_choice_requires_one_selection() {
    let schema = StepSchema::microcement();
    let step = schema.step(2).unwrap();
    let mut answers = AnswerRecord::defaults_for(&schema);
    assert!(!ValidationPolicy.is_complete(step, &answers));

    set_choices(&mut answers, "space", &["Wall"]);
    assert!(ValidationPolicy.is_complete(step, &answers));
}

#[test]
fn numeric_accepts_any_non_blank_text() {
    let schema = StepSchema::microcement();
    let step = schema.step(3).unwrap();
    let mut answers = AnswerRecord::defaults_for(&schema);

    set_text(&mut answers, "area", "   ");
    assert!(!ValidationPolicy.is_complete(step, &answers));

    set_text(&mut answers, "area", "25");
    assert!(ValidationPolicy.is_complete(step, &answers));

    set_text(&mut answers, "area", "about twenty");
    assert!(
        ValidationPolicy.is_complete(step, &answers),
        "numeric input is not parsed at this layer"
    );
}

#[test]
fn contact_requires_name_and_email_only() {
    let schema = StepSchema::microcement();
    let step = schema.step(5).unwrap();
    let mut answers = AnswerRecord::defaults_for(&schema);

    set_text(&mut answers, "name", "Jane");
    let result = ValidationPolicy.evaluate(step, &answers);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "email");

    set_text(&mut answers, "email", "j@x.com");
    assert!(ValidationPolicy.is_complete(step, &answers));
    assert_eq!(answers.text("phone"), Some(""));
}

#[test]
fn wrong_value_shape_is_a_type_mismatch() {
    let schema = StepSchema::microcement();
    let mut answers = AnswerRecord::defaults_for(&schema);
    set_choices(&mut answers, "userType", &["Architect"]);
    let result = validate_step(schema.step(0).unwrap(), &answers);
    assert_eq!(result.errors[0].code, "type_mismatch");
}

#[test]
fn validation_only_looks_at_the_given_step() {
    let schema = StepSchema::microcement();
    let mut answers = AnswerRecord::defaults_for(&schema);
    set_choices(&mut answers, "surface", &["Wood"]);
    assert!(ValidationPolicy.is_complete(schema.step(4).unwrap(), &answers));
    assert!(!ValidationPolicy.is_complete(schema.step(0).unwrap(), &answers));
}
