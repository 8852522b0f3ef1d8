//! Built-in microcement offer questionnaire.

use crate::spec::schema::StepSchema;
use crate::spec::step::{InputSpec, InputType, OptionSpec, StepKind, StepSpec};

pub const FORM_ID: &str = "microcement";
pub const FORM_VERSION: &str = "1.0.0";

const USER_TYPES: &[(&str, &str)] = &[
    ("Architect", "/images/mockups/architect.jpg"),
    ("Interior Designer", "/images/mockups/interior-designer.jpg"),
    ("Investor", "/images/mockups/investor.jpg"),
    ("Contractor", "/images/mockups/contractor.jpg"),
];

const PROJECT_TYPES: &[(&str, &str)] = &[
    ("For a client", "/images/mockups/for-a-client.jpg"),
    ("For myself", "/images/mockups/for-myself.jpg"),
];

const SPACES: &[(&str, &str)] = &[
    ("Floor", "/images/mockups/floor.jpg"),
    ("Wall", "/images/mockups/wall.jpg"),
    ("Stairs", "/images/mockups/stairs.jpg"),
    ("Bathroom", "/images/mockups/bathroom.jpg"),
    ("Shower", "/images/mockups/shower.jpg"),
    ("Kitchen Counter", "/images/mockups/kitchen.jpg"),
    ("Pool", "/images/mockups/pool.jpg"),
    ("Other", "/images/mockups/drugo.jpg"),
];

const SURFACES: &[(&str, &str)] = &[
    ("Ceramic", "/images/mockups/ceramic.jpg"),
    ("Screed (cement)", "/images/mockups/screed.jpg"),
    ("Wood", "/images/mockups/wood.jpg"),
    ("Finished Concrete", "/images/mockups/concrete-finished.jpg"),
    ("Raw Concrete", "/images/mockups/concrete-raw.jpg"),
    ("OSB Boards", "/images/mockups/osb.jpg"),
    ("Drywall", "/images/mockups/drywall.jpg"),
    ("Fermacell", "/images/mockups/fermacell.jpg"),
    ("Plaster", "/images/mockups/plaster.jpg"),
    ("Other / Not sure", "/images/mockups/other.jpg"),
];

impl StepSchema {
    /// The six-step microcement questionnaire.
    pub fn microcement() -> Self {
        let steps = vec![
            choice_step(0, "userType", StepKind::SingleChoice, "step.user_type.question", USER_TYPES),
            choice_step(
                1,
                "projectType",
                StepKind::SingleChoice,
                "step.project_type.question",
                PROJECT_TYPES,
            ),
            choice_step(2, "space", StepKind::MultiChoice, "step.space.question", SPACES),
            StepSpec {
                id: 3,
                field: "area".into(),
                kind: StepKind::Numeric,
                question_key: "step.area.question".into(),
                options: Vec::new(),
                inputs: vec![InputSpec::required(
                    "area",
                    InputType::Number,
                    "input.area.placeholder",
                )],
            },
            choice_step(4, "surface", StepKind::MultiChoice, "step.surface.question", SURFACES),
            StepSpec {
                id: 5,
                field: "contact".into(),
                kind: StepKind::ContactGroup,
                question_key: "step.contact.question".into(),
                options: Vec::new(),
                inputs: vec![
                    InputSpec::required("name", InputType::Text, "input.name.placeholder"),
                    InputSpec::required("email", InputType::Email, "input.email.placeholder"),
                    InputSpec::optional("phone", InputType::Tel, "input.phone.placeholder"),
                ],
            },
        ];

        Self::new(FORM_ID, FORM_VERSION, steps).expect("built-in microcement schema is valid")
    }
}

fn choice_step(
    id: usize,
    field: &str,
    kind: StepKind,
    question_key: &str,
    options: &[(&str, &str)],
) -> StepSpec {
    StepSpec {
        id,
        field: field.to_string(),
        kind,
        question_key: question_key.to_string(),
        options: options
            .iter()
            .map(|(label, image)| OptionSpec::new(*label).with_image(*image))
            .collect(),
        inputs: Vec::new(),
    }
}
