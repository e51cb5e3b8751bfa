use crate::prompt::{detection_prompt, generation_prompt, normalize_label};
use crate::types::{Detection, Generation, Message};

fn detection_fixture() -> Detection {
  let mut d = Detection::default();
  let bully = d.add_class("bully");
  let neutral = d.add_class("neutral");
  d.get_class_mut(&bully).unwrap().add_example("u suck");
  d.get_class_mut(&neutral).unwrap().add_example("hi there");
  d
}

#[test]
fn normalize_label_trims_and_lowercases() {
  assert_eq!(normalize_label("  Bully\n"), "bully");
  assert_eq!(normalize_label("NEUTRAL"), "neutral");
  assert_eq!(normalize_label("bully"), "bully");
}

#[test]
fn detection_prompt_numbers_examples_across_classes() {
  let d = detection_fixture();
  let prompt = detection_prompt(&d, &[Message::student("you stink")]);
  assert_eq!(
    prompt,
    concat!(
      "Classify the user inputs into one of the following categories: bully, neutral\n",
      "Input 1: u suck\n",
      "Category 1: bully\n",
      "Input 2: hi there\n",
      "Category 2: neutral\n",
      "Input 3: you stink\n",
      "Category 3: ",
    )
  );
}

#[test]
fn detection_prompt_without_examples() {
  let mut d = Detection::default();
  d.add_class("bully");
  let prompt = detection_prompt(&d, &[Message::student("hey")]);
  assert_eq!(
    prompt,
    concat!(
      "Classify the user inputs into one of the following categories: bully\n",
      "Input 1: hey\n",
      "Category 1: ",
    )
  );
}

#[test]
fn detection_prompt_uses_last_message_only() {
  let d = detection_fixture();
  let transcript = vec![
    Message::student("first"),
    Message::chatbot("reply"),
    Message::student("you stink"),
  ];
  let prompt = detection_prompt(&d, &transcript);
  assert!(prompt.ends_with("Input 3: you stink\nCategory 3: "));
  assert!(!prompt.contains("first"));
}

#[test]
fn generation_prompt_single_message_has_no_history_block() {
  let mut g = Generation::default();
  g.add_example("c1", "r1");
  let prompt = generation_prompt(&g, &[Message::student("hello")]);
  assert_eq!(
    prompt,
    concat!(
      "The student sees a cyberbully on social media and makes a comment in response to the ",
      "bully. Teach students to counteract cyberbullies based on the following examples:\n",
      "Example 1:\n",
      "Context: c1\n",
      "Response: r1\n",
      "Here is what the student said, fill in the answer:\n",
      "Context: hello\n",
      "Response: ",
    )
  );
}

#[test]
fn generation_prompt_lists_history_minus_last_message() {
  let mut g = Generation::default();
  g.add_example("c1", "r1");
  let transcript = vec![
    Message::student("hi"),
    Message::chatbot("hey"),
    Message::student("help"),
  ];
  let prompt = generation_prompt(&g, &transcript);
  assert!(prompt.contains(concat!(
    "Here is the conversation history with the student:\n",
    "Student: hi\n",
    "Chatbot: hey\n",
    "Here is what the student said, fill in the answer:\n",
  )));
  assert!(prompt.ends_with("Context: help\nResponse: "));
}

#[test]
fn generation_prompt_numbers_examples_in_order() {
  let mut g = Generation::default();
  g.add_example("c1", "r1");
  g.add_example("c2", "r2");
  let prompt = generation_prompt(&g, &[Message::student("x")]);
  assert!(prompt.contains("Example 1:\nContext: c1\nResponse: r1\n"));
  assert!(prompt.contains("Example 2:\nContext: c2\nResponse: r2\n"));
  let pos1 = prompt.find("Example 1:").unwrap();
  let pos2 = prompt.find("Example 2:").unwrap();
  assert!(pos1 < pos2);
}
