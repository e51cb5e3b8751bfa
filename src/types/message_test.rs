use crate::types::{Message, Role};

#[test]
fn constructors_set_roles() {
  assert_eq!(Message::student("hi").role, Role::Student);
  assert_eq!(Message::chatbot("hello").role, Role::Chatbot);
}

#[test]
fn roles_serialize_lowercase() {
  let json = serde_json::to_value(Message::student("hi")).unwrap();
  assert_eq!(json, serde_json::json!({"role": "student", "message": "hi"}));

  let restored: Message =
    serde_json::from_value(serde_json::json!({"role": "chatbot", "message": "hello"})).unwrap();
  assert_eq!(restored, Message::chatbot("hello"));
}
