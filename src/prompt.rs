//! Pure prompt builders for detection and generation components.
//!
//! The rendered strings are handed to the external completion capability;
//! nothing here performs IO.

use std::fmt::Write;

use crate::types::{Detection, Generation, Message, Role};

/// Token budget for detection calls; class labels are short.
pub const DETECTION_MAX_TOKENS: u32 = 16;
/// Token budget for generation calls.
pub const GENERATION_MAX_TOKENS: u32 = 100;

const GENERATION_INSTRUCTION: &str = "The student sees a cyberbully on social media and makes a \
comment in response to the bully. Teach students to counteract cyberbullies based on the \
following examples:\n";

/// Normalizes a class label for routing comparison. Applied both to the raw
/// model output and to stored `gen_class`/`det_class` labels so matching is
/// symmetric.
pub fn normalize_label(label: &str) -> String {
  label.trim().to_lowercase()
}

/// Renders the classification prompt for a detection component: one
/// instruction line enumerating the class labels, an `Input N`/`Category N`
/// pair per stored example (numbered globally across classes), and a final
/// unnumbered input built from the transcript's last message.
///
/// The model is expected to complete the trailing `Category N+1:` line.
pub fn detection_prompt(detection: &Detection, transcript: &[Message]) -> String {
  let labels = detection.class_labels().join(", ");
  let mut prompt = format!(
    "Classify the user inputs into one of the following categories: {}\n",
    labels
  );

  let mut example_num = 0;
  for class in &detection.classes {
    for example in &class.examples {
      example_num += 1;
      let _ = write!(prompt, "Input {}: {}\n", example_num, example.example);
      let _ = write!(prompt, "Category {}: {}\n", example_num, class.det_class);
    }
  }

  let to_classify = transcript.last().map_or("", |m| m.message.as_str());
  let _ = write!(
    prompt,
    "Input {}: {}\nCategory {}: ",
    example_num + 1,
    to_classify,
    example_num + 1
  );
  prompt
}

/// Renders the generation prompt: fixed instruction, one `Example N:` block
/// per stored (context, response) pair, the conversation history minus the
/// last message (when there is any), and a final context line built from the
/// last message.
///
/// The model is expected to complete the trailing `Response:` line.
pub fn generation_prompt(generation: &Generation, transcript: &[Message]) -> String {
  let mut prompt = String::from(GENERATION_INSTRUCTION);

  for (i, example) in generation.examples.iter().enumerate() {
    let _ = write!(prompt, "Example {}:\n", i + 1);
    let _ = write!(prompt, "Context: {}\n", example.context);
    let _ = write!(prompt, "Response: {}\n", example.response);
  }

  if transcript.len() >= 2 {
    prompt.push_str("Here is the conversation history with the student:\n");
    for message in &transcript[..transcript.len() - 1] {
      let role = match message.role {
        Role::Student => "Student",
        Role::Chatbot => "Chatbot",
      };
      let _ = write!(prompt, "{}: {}\n", role, message.message);
    }
  }

  let to_answer = transcript.last().map_or("", |m| m.message.as_str());
  prompt.push_str("Here is what the student said, fill in the answer:\n");
  let _ = write!(prompt, "Context: {}\nResponse: ", to_answer);
  prompt
}
