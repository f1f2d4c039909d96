//! Prompt templates for the element-selection benchmark.
//!
//! The live record and the worked examples share one renderer, so a
//! few-shot example always looks exactly like the query it illustrates.

use crate::task::{IndexTask, Task};
use crate::NO_INPUT;

/// How many worked examples follow the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shots {
    Zero,
    #[default]
    One,
    Two,
}

impl Shots {
    /// The worked examples for this shot count. Index-only prompts never
    /// show a text-entry step, since that mode evaluates navigation only.
    pub fn examples(self, style: PromptStyle) -> &'static [WorkedExample] {
        let pool: &'static [WorkedExample] = match style {
            PromptStyle::Full => &FULL_EXAMPLES,
            PromptStyle::IndexOnly => &INDEX_EXAMPLES,
        };
        match self {
            Shots::Zero => &[],
            Shots::One => &pool[..1],
            Shots::Two => pool,
        }
    }
}

/// Answer format the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// `[id], '[input]'`
    Full,
    /// A bare `[id]`.
    IndexOnly,
}

/// A fixed (screen, instruction, expected answer) triple shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedExample {
    pub screen: &'static str,
    pub instruction: &'static str,
    pub index: i64,
    /// Text to type, if the step enters text.
    pub input: Option<&'static str>,
}

impl WorkedExample {
    /// The answer line in the requested style.
    pub fn output(&self, style: PromptStyle) -> String {
        match style {
            PromptStyle::Full => format_full_answer(self.index, self.input.unwrap_or(NO_INPUT)),
            PromptStyle::IndexOnly => self.index.to_string(),
        }
    }
}

pub const SORT_APPS_EXAMPLE: WorkedExample = WorkedExample {
    screen: "<input id=0 >Search</input>
<button id=1 text='Sort by'></button>
<button id=2 text='Toggle app name visibility'></button>
<button id=3 text='More options'></button>
<button id=4>Calendar</button>
<button id=5>Camera</button>
<button id=6>Clock</button>
<button id=7>go back</button>",
    instruction: "Sort apps by title in descending order",
    index: 1,
    input: None,
};

pub const NEW_NOTE_EXAMPLE: WorkedExample = WorkedExample {
    screen: "<button id=0 text='Search'></button>
<button id=1 text='Open note'></button>
<button id=2 text='Create a new note'></button>
<button id=3 text='More options'></button>
<button id=4>General note</button>
<p id=5>test</p>
<input id=6>Insert text here</input>
<button id=7>go back</button>",
    instruction: "Create a text note called 'test', type '12345678', and search for '234'",
    index: 6,
    input: Some("123456"),
};

pub const NOTE_OPTIONS_EXAMPLE: WorkedExample = WorkedExample {
    screen: NEW_NOTE_EXAMPLE.screen,
    instruction: "Delete the note called 'test'",
    index: 3,
    input: None,
};

static FULL_EXAMPLES: [WorkedExample; 2] = [SORT_APPS_EXAMPLE, NEW_NOTE_EXAMPLE];
static INDEX_EXAMPLES: [WorkedExample; 2] = [SORT_APPS_EXAMPLE, NOTE_OPTIONS_EXAMPLE];

// ── Rendering ──────────────────────────────────────────────────────────────

const FULL_HEADER: &str = "Given a screen, an instruction, predict the id of the UI element to perform or continue the instruction.
If you think it needs to input text, also give the text, else give the string 'null'.
Your output should only contain the following information:
[id], '[input]'";

/// `<id>, '<input>'`, the answer shape the full prompt asks for.
pub fn format_full_answer(index: i64, input: &str) -> String {
    format!("{index}, '{input}'")
}

fn index_header(total_index: i64) -> String {
    format!(
        "Given a screen, an instruction, predict the id of the UI element to perform or continue the instruction.
If the instruction is already complete and nothing is left to do, give the id {total_index}.
Your output should only contain the id as a bare integer:
[id]"
    )
}

/// The `Screen:` / `Instruction:` block shared by queries and examples.
pub fn render_query(screen: &str, instruction: &str) -> String {
    format!("Screen:\n{screen}\n\nInstruction: {instruction}\n")
}

pub fn render_example(example: &WorkedExample, style: PromptStyle) -> String {
    format!(
        "{}\nOutput:\n{}\n",
        render_query(example.screen, example.instruction),
        example.output(style)
    )
}

fn assemble(header: &str, screen: &str, instruction: &str, style: PromptStyle, shots: Shots) -> String {
    let mut prompt = format!("{header}\n\n{}", render_query(screen, instruction));

    let examples = shots.examples(style);
    if examples.is_empty() {
        return prompt;
    }

    prompt.push_str("\nThe following are examples:\n");
    let numbered = examples.len() > 1;
    for (i, example) in examples.iter().enumerate() {
        prompt.push('\n');
        if numbered {
            prompt.push_str(&format!("Example {}:\n\n", i + 1));
        }
        prompt.push_str(&render_example(example, style));
    }
    prompt
}

/// Prompt asking for an element id and input text.
pub fn build_prompt(task: &Task, shots: Shots) -> String {
    assemble(
        FULL_HEADER,
        &task.ui_representation,
        &task.task_description,
        PromptStyle::Full,
        shots,
    )
}

/// Prompt asking for a bare element id.
pub fn build_index_prompt(task: &IndexTask, shots: Shots) -> String {
    assemble(
        &index_header(task.total_index),
        &task.ui_representation,
        &task.task_description,
        PromptStyle::IndexOnly,
        shots,
    )
}
