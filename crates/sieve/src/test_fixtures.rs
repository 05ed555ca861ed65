use crate::{
    model::{FieldDescriptor, RecordModel},
    traits::{FieldValue, Record},
    value::Value,
};
use std::collections::BTreeMap;

///
/// Person
///
/// Shared record fixture for unit tests.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Person {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub score: Option<Value>,
    pub secret: String,
}

pub(crate) fn person(name: &str, age: u32) -> Person {
    Person {
        id: u64::from(age) * 1000 + name.len() as u64,
        name: name.to_string(),
        age,
        ..Person::default()
    }
}

fn read_name(p: &Person) -> Value {
    p.name.to_value()
}

fn read_age(p: &Person) -> Value {
    p.age.to_value()
}

fn read_nickname(p: &Person) -> Value {
    p.nickname.to_value()
}

fn read_tags(p: &Person) -> Value {
    p.tags.as_slice().to_value()
}

fn read_attrs(p: &Person) -> Value {
    p.attrs.to_value()
}

fn read_score(p: &Person) -> Value {
    p.score.to_value()
}

fn read_secret(p: &Person) -> Value {
    p.secret.to_value()
}

impl Record for Person {
    const MODEL: &'static RecordModel<Self> = &RecordModel::new(
        "test::Person",
        &[
            FieldDescriptor::exported("Name", read_name),
            FieldDescriptor::exported("Age", read_age),
            FieldDescriptor::exported("Nickname", read_nickname),
            FieldDescriptor::exported("Tags", read_tags),
            FieldDescriptor::exported("Attrs", read_attrs),
            FieldDescriptor::exported("Score", read_score),
            FieldDescriptor::unexported("Secret", read_secret),
        ],
    );

    fn key_value(&self) -> Value {
        self.id.to_value()
    }
}
