//! Meal record and the request payload it is built from.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    #[serde(rename = "mealID")]
    pub meal_id: String,
    #[serde(rename = "mealName")]
    pub meal_name: String,
    #[serde(rename = "mealType")]
    pub meal_type: String,
    #[serde(rename = "eatingOut")]
    pub eating_out: bool,
    pub date: String,
    pub note: String,
    pub tags: Vec<String>,
}

impl Meal {
    pub fn validate(&self) -> bool {
        !self.meal_name.is_empty() && !self.meal_type.is_empty()
    }

    /// Generates an id and timestamp where the caller left them empty.
    pub fn prepare_for_create(mut self) -> Self {
        if self.meal_id.is_empty() {
            self.meal_id = Uuid::new_v4().to_string();
        }
        if self.date.is_empty() {
            self.date = now_rfc3339();
        }
        self
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Request body for create and update; `null` counts as not sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPayload {
    #[serde(rename = "mealID", default)]
    pub meal_id: Option<String>,
    #[serde(rename = "mealName", default)]
    pub meal_name: Option<String>,
    #[serde(rename = "mealType", default)]
    pub meal_type: Option<String>,
    #[serde(rename = "eatingOut", default)]
    pub eating_out: Option<bool>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl MealPayload {
    /// A literal `null` body decodes as a payload with every field omitted.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// Omitted fields take their empty value.
    pub fn into_meal(self) -> Meal {
        Meal {
            meal_id: self.meal_id.unwrap_or_default(),
            meal_name: self.meal_name.unwrap_or_default(),
            meal_type: self.meal_type.unwrap_or_default(),
            eating_out: self.eating_out.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }

    /// Full replacement keyed by the path id, whatever the body said.
    pub fn replace(self, meal_id: &str) -> Meal {
        Meal {
            meal_id: meal_id.to_string(),
            ..self.into_meal()
        }
    }
}
