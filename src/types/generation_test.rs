use crate::error::TreeError;
use crate::types::Generation;

#[test]
fn examples_get_sequential_ids() {
  let mut g = Generation::default();
  assert_eq!(g.add_example("c1", "r1"), "ex-0");
  assert_eq!(g.add_example("c2", "r2"), "ex-1");
  assert_eq!(g.get_example("ex-1").unwrap().context, "c2");
}

#[test]
fn delete_example_then_add_reuses_freed_suffix() {
  // Sub-entity ids allocate past the live maximum only; deleting the max
  // makes its suffix available again.
  let mut g = Generation::default();
  g.add_example("c1", "r1");
  g.add_example("c2", "r2");
  g.delete_example("ex-1").unwrap();
  assert_eq!(g.add_example("c3", "r3"), "ex-1");
}

#[test]
fn delete_unknown_example_fails() {
  let mut g = Generation::default();
  assert_eq!(
    g.delete_example("ex-0"),
    Err(TreeError::ExampleNotFound("ex-0".to_string()))
  );
}

#[test]
fn edit_keeps_fields_passed_as_none() {
  let mut g = Generation::default();
  g.add_example("c1", "r1");

  let example = g.get_example_mut("ex-0").unwrap();
  example.edit(Some("c2".to_string()), None);
  assert_eq!(example.context, "c2");
  assert_eq!(example.response, "r1");

  example.edit(None, Some("r2".to_string()));
  assert_eq!(example.context, "c2");
  assert_eq!(example.response, "r2");
}
