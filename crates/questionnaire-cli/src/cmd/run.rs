use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use questionnaire_core::{
    JsonLinesSink, SubmissionAck, SubmissionSink, TracingSink, WizardController, WizardError,
    WizardView,
};
use questionnaire_spec::{StepKind, Submission};
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::AppContext;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Flat answer record (JSON) to replay instead of prompting
    #[arg(long = "answers", value_name = "FILE")]
    pub answers: Option<PathBuf>,
    /// Append the submitted record to this JSON lines file
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run(args: RunArgs, ctx: &AppContext) -> Result<()> {
    let out = args.out.clone().or_else(|| ctx.config.submissions_path());
    let sink: Arc<dyn SubmissionSink> = match &out {
        Some(path) => Arc::new(
            JsonLinesSink::append(path)
                .with_context(|| format!("failed to open submissions file {}", path.display()))?,
        ),
        None => Arc::new(TracingSink),
    };
    let mut controller = ctx
        .questionnaire
        .controller()
        .with_sink(sink)
        .with_locale(&ctx.locale)?;

    match &args.answers {
        Some(path) => {
            let answers = load_answers(path)?;
            replay_answers(&mut controller, &answers)?;
        }
        None => {
            if !(io::stdin().is_terminal() && io::stdout().is_terminal()) {
                bail!("no terminal attached; pass --answers <FILE> to run non-interactively");
            }
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            interact(&mut controller, &mut input, &mut output)?;
        }
    }

    let submission = controller.submission()?;
    if let Some(SubmissionAck::Failed { reason }) = controller.acknowledgement() {
        bail!("submission was not delivered: {reason}");
    }
    println!("{}", serde_json::to_string_pretty(&submission.record())?);
    Ok(())
}

fn load_answers(path: &Path) -> Result<JsonMap<String, JsonValue>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    let answers: JsonMap<String, JsonValue> = serde_json::from_str(&raw)
        .with_context(|| format!("answers {} must be a JSON object", path.display()))?;
    Ok(answers)
}

/// Applies a flat answer record step by step, advancing through every step.
pub fn replay_answers(
    controller: &mut WizardController,
    answers: &JsonMap<String, JsonValue>,
) -> Result<Submission> {
    let known = controller.schema().fields();
    if let Some(unknown) = answers.keys().find(|key| !known.contains(&key.as_str())) {
        bail!("answers contain unknown field '{unknown}'");
    }

    let steps = controller.schema().steps().to_vec();
    for step in &steps {
        match step.kind {
            StepKind::SingleChoice => {
                if let Some(value) = answers.get(&step.field) {
                    let option = single_choice(&step.field, value)?;
                    controller.select_single(&step.field, &option)?;
                }
            }
            StepKind::MultiChoice => {
                for option in choice_list(&step.field, answers.get(&step.field))? {
                    let already = controller
                        .state()
                        .answers()
                        .choices(&step.field)
                        .is_some_and(|chosen| chosen.contains(&option));
                    if !already {
                        controller.toggle_multi(&step.field, &option)?;
                    }
                }
            }
            StepKind::Numeric | StepKind::ContactGroup => {
                for input in &step.inputs {
                    if let Some(value) = answers.get(&input.field) {
                        let text = scalar_text(&input.field, value)?;
                        controller.set_text(&input.field, &text)?;
                    }
                }
            }
        }
        controller.go_next().with_context(|| {
            format!(
                "answers for step {} ({}) are incomplete",
                step.id + 1,
                step.field
            )
        })?;
    }
    Ok(controller.submission()?)
}

fn scalar_text(field: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(text) => Ok(text.clone()),
        JsonValue::Number(number) => Ok(number.to_string()),
        JsonValue::Null => Ok(String::new()),
        _ => bail!("answer for '{field}' must be a string"),
    }
}

/// A single choice may also arrive as a one-element list.
fn single_choice(field: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Array(items) if items.len() <= 1 => match items.first() {
            Some(item) => scalar_text(field, item),
            None => Ok(String::new()),
        },
        JsonValue::Array(_) => bail!("answer for '{field}' takes a single option"),
        other => scalar_text(field, other),
    }
}

fn choice_list(field: &str, value: Option<&JsonValue>) -> Result<Vec<String>> {
    match value {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::String(single)) => Ok(vec![single.clone()]),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| anyhow!("answers for '{field}' must be strings"))
            })
            .collect(),
        Some(_) => bail!("answer for '{field}' must be a string or a list of strings"),
    }
}

enum Command {
    Back,
    Locale(String),
    Restart,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line {
        "b" | ":back" => Some(Command::Back),
        ":restart" => Some(Command::Restart),
        ":q" | ":quit" => Some(Command::Quit),
        _ => line
            .strip_prefix(":lang")
            .map(|code| Command::Locale(code.trim().to_string())),
    }
}

/// Line-based renderer over any reader and writer.
///
/// Choice steps take option numbers (single choice advances right away, multi
/// choice toggles and advances on an empty line). Text steps prompt each input in
/// turn; an empty line keeps the current value, `-` clears it and anything else
/// is stored as typed. `b` goes back, `:lang <code>` switches locale,
/// `:restart` starts over and `:quit` aborts.
pub fn interact<R: BufRead, W: Write>(
    controller: &mut WizardController,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let view = controller.current_view()?;
    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", view.subtitle)?;
    writeln!(out, "{}", view.greeting)?;

    'steps: loop {
        let view = controller.current_view()?;
        if view.completed {
            if let Some(message) = &view.submitted_message {
                writeln!(out, "{message}")?;
            }
            return Ok(());
        }
        render_step(&view, out)?;

        if view.kind.is_choice() {
            write!(out, "> ")?;
            out.flush()?;
            let line = read_line(input)?;
            let line = line.trim();
            if let Some(command) = parse_command(line) {
                apply_command(controller, command, out)?;
                continue;
            }
            if line.is_empty() {
                try_next(controller, out)?;
                continue;
            }
            let Some(option) = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| view.options.get(index))
            else {
                writeln!(out, "? {line}")?;
                continue;
            };
            if view.kind == StepKind::SingleChoice {
                controller.select_single(&view.field, &option.id)?;
                try_next(controller, out)?;
            } else {
                controller.toggle_multi(&view.field, &option.id)?;
            }
            continue;
        }

        for field in &view.inputs {
            let mut prompt = field.placeholder.clone();
            if let Some(unit) = &view.unit {
                prompt.push_str(&format!(" ({unit})"));
            }
            if !field.required {
                prompt.push('*');
            }
            if field.value.is_empty() {
                write!(out, "{prompt}: ")?;
            } else {
                write!(out, "{prompt} [{}]: ", field.value)?;
            }
            out.flush()?;
            let line = read_line(input)?;
            match line.trim() {
                "" => {}
                "-" => controller.set_text(&field.field, "")?,
                trimmed => {
                    if let Some(command) = parse_command(trimmed) {
                        apply_command(controller, command, out)?;
                        continue 'steps;
                    }
                    controller.set_text(&field.field, &line)?;
                }
            }
        }
        try_next(controller, out)?;
    }
}

fn render_step<W: Write>(view: &WizardView, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}/{}] {}% {}",
        view.step_number, view.step_count, view.progress_percent, view.question
    )?;
    for (n, option) in view.options.iter().enumerate() {
        let marker = if option.selected { "x" } else { " " };
        writeln!(out, "  {:>2}. [{marker}] {}", n + 1, option.label)?;
    }
    let hint = if view.can_retreat {
        format!("b = {}, Enter = {}", view.back_label, view.next_label)
    } else {
        format!("Enter = {}", view.next_label)
    };
    writeln!(out, "  ({hint}, :lang {})", view.available_locales.join("|"))
}

fn try_next<W: Write>(controller: &mut WizardController, out: &mut W) -> Result<()> {
    match controller.go_next() {
        Ok(_) => Ok(()),
        Err(WizardError::Validation(validation)) => {
            for error in &validation.errors {
                writeln!(out, "! {}: {}", error.field, error.message)?;
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn apply_command<W: Write>(
    controller: &mut WizardController,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Back => {
            controller.go_back()?;
        }
        Command::Restart => controller.restart(),
        Command::Quit => bail!("questionnaire aborted"),
        Command::Locale(code) => {
            let code = controller
                .catalog()
                .negotiate(&code)
                .unwrap_or(code);
            if let Err(err) = controller.change_locale(&code) {
                writeln!(out, "! {err}")?;
            }
        }
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        bail!("stdin closed");
    }
    let end = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(end);
    Ok(line)
}
