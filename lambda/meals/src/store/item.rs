//! Conversion between [`Meal`] and DynamoDB items. Every attribute is always
//! written; a missing or `NULL` attribute reads as empty.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::model::Meal;
use crate::store::StoreError;

pub type Item = HashMap<String, AttributeValue>;

pub const KEY_ATTR: &str = "mealID";

const NAME_ATTR: &str = "mealName";
const TYPE_ATTR: &str = "mealType";
const EATING_OUT_ATTR: &str = "eatingOut";
const DATE_ATTR: &str = "date";
const NOTE_ATTR: &str = "note";
const TAGS_ATTR: &str = "tags";

pub fn key(id: &str) -> Item {
    let mut key = HashMap::new();
    key.insert(KEY_ATTR.to_string(), AttributeValue::S(id.to_string()));
    key
}

pub fn to_item(meal: &Meal) -> Item {
    let mut item = key(&meal.meal_id);
    item.insert(
        NAME_ATTR.to_string(),
        AttributeValue::S(meal.meal_name.clone()),
    );
    item.insert(
        TYPE_ATTR.to_string(),
        AttributeValue::S(meal.meal_type.clone()),
    );
    item.insert(
        EATING_OUT_ATTR.to_string(),
        AttributeValue::Bool(meal.eating_out),
    );
    item.insert(DATE_ATTR.to_string(), AttributeValue::S(meal.date.clone()));
    item.insert(NOTE_ATTR.to_string(), AttributeValue::S(meal.note.clone()));

    let tags: Vec<AttributeValue> = meal
        .tags
        .iter()
        .map(|tag| AttributeValue::S(tag.clone()))
        .collect();
    item.insert(TAGS_ATTR.to_string(), AttributeValue::L(tags));

    item
}

pub fn from_item(item: &Item) -> Result<Meal, StoreError> {
    Ok(Meal {
        meal_id: string_attr(item, KEY_ATTR)?,
        meal_name: string_attr(item, NAME_ATTR)?,
        meal_type: string_attr(item, TYPE_ATTR)?,
        eating_out: bool_attr(item, EATING_OUT_ATTR)?,
        date: string_attr(item, DATE_ATTR)?,
        note: string_attr(item, NOTE_ATTR)?,
        tags: list_attr(item, TAGS_ATTR)?,
    })
}

/// Reads the partition key alone, as returned by a key-only projection.
pub fn key_of(item: &Item) -> Result<String, StoreError> {
    match item.get(KEY_ATTR) {
        Some(AttributeValue::S(id)) => Ok(id.clone()),
        _ => Err(StoreError::Malformed(format!("item without {KEY_ATTR}"))),
    }
}

fn string_attr(item: &Item, name: &str) -> Result<String, StoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(String::new()),
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(other) => Err(mismatch(name, "S", other)),
    }
}

fn bool_attr(item: &Item, name: &str) -> Result<bool, StoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(false),
        Some(AttributeValue::Bool(value)) => Ok(*value),
        Some(other) => Err(mismatch(name, "BOOL", other)),
    }
}

fn list_attr(item: &Item, name: &str) -> Result<Vec<String>, StoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(Vec::new()),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| match value {
                AttributeValue::S(tag) => Ok(tag.clone()),
                other => Err(mismatch(name, "S list element", other)),
            })
            .collect(),
        // Items written by older tooling may carry tags as a string set.
        Some(AttributeValue::Ss(values)) => Ok(values.clone()),
        Some(other) => Err(mismatch(name, "L", other)),
    }
}

fn mismatch(name: &str, expected: &str, found: &AttributeValue) -> StoreError {
    StoreError::Malformed(format!("{name}: expected {expected}, found {found:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_meal() -> Meal {
        Meal {
            meal_id: "0d6c7a0e-5a7f-4f3e-9a49-5f0f7b1c2d3e".to_string(),
            meal_name: "Pho".to_string(),
            meal_type: "Dinner".to_string(),
            eating_out: true,
            date: "2024-03-09T19:30:00Z".to_string(),
            note: "extra basil, ünïcødé ok".to_string(),
            tags: vec!["soup".to_string(), "vietnamese".to_string(), "soup".to_string()],
        }
    }

    #[test]
    fn full_record_round_trips() {
        let meal = full_meal();
        assert_eq!(from_item(&to_item(&meal)).unwrap(), meal);
    }

    #[test]
    fn empty_values_are_written_not_dropped() {
        let item = to_item(&Meal::default());
        assert_eq!(item.get(NOTE_ATTR), Some(&AttributeValue::S(String::new())));
        assert_eq!(item.get(TAGS_ATTR), Some(&AttributeValue::L(Vec::new())));
        assert_eq!(item.get(EATING_OUT_ATTR), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn missing_and_null_attributes_read_as_empty() {
        let mut item = key("abc");
        item.insert(NOTE_ATTR.to_string(), AttributeValue::Null(true));
        let meal = from_item(&item).unwrap();
        assert_eq!(
            meal,
            Meal {
                meal_id: "abc".to_string(),
                ..Meal::default()
            }
        );
    }

    #[test]
    fn string_set_tags_are_accepted() {
        let mut item = to_item(&full_meal());
        item.insert(
            TAGS_ATTR.to_string(),
            AttributeValue::Ss(vec!["lunch".to_string()]),
        );
        assert_eq!(from_item(&item).unwrap().tags, vec!["lunch".to_string()]);
    }

    #[test]
    fn wrong_attribute_type_is_malformed() {
        let mut item = to_item(&full_meal());
        item.insert(EATING_OUT_ATTR.to_string(), AttributeValue::S("yes".to_string()));
        assert!(matches!(from_item(&item), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn key_of_reads_partition_key() {
        assert_eq!(key_of(&key("abc")).unwrap(), "abc");
        assert!(key_of(&HashMap::new()).is_err());
    }
}
