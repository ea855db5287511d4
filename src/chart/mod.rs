use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options the prompt asks for in every meal.
pub const OPTIONS_PER_MEAL: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Snacks, Meal::Dinner];

    /// Key used in the JSON template and the section heading.
    pub fn key(&self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Snacks => "Snacks",
            Meal::Dinner => "Dinner",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealOption {
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietChart {
    #[serde(rename = "Breakfast", default)]
    pub breakfast: Vec<MealOption>,
    #[serde(rename = "Lunch", default)]
    pub lunch: Vec<MealOption>,
    #[serde(rename = "Snacks", default)]
    pub snacks: Vec<MealOption>,
    #[serde(rename = "Dinner", default)]
    pub dinner: Vec<MealOption>,
    #[serde(default)]
    pub total_calories: String,
    #[serde(default)]
    pub total_protein: String,
}

impl DietChart {
    pub fn meal(&self, meal: Meal) -> &[MealOption] {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Snacks => &self.snacks,
            Meal::Dinner => &self.dinner,
        }
    }

    fn meal_mut(&mut self, meal: Meal) -> &mut Vec<MealOption> {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Snacks => &mut self.snacks,
            Meal::Dinner => &mut self.dinner,
        }
    }
}

/// Map a parsed model reply onto a typed chart.
///
/// Returns `None` only when there is no `diet_chart` object at all. Any other
/// deviation from the template is tolerated: absent meals become empty lists,
/// absent totals become empty strings, and numeric scalars are stringified.
/// Every deviation is reported in the returned warnings.
pub fn sanitize(doc: &Value) -> (Option<DietChart>, Vec<String>) {
    let mut warnings = Vec::new();

    let body = match doc.get("diet_chart") {
        Some(Value::Object(m)) => m,
        Some(_) => {
            warnings.push("diet_chart is not an object".to_string());
            return (None, warnings);
        }
        None => {
            warnings.push("missing diet_chart key".to_string());
            return (None, warnings);
        }
    };

    let mut chart = DietChart::default();

    for meal in Meal::ALL {
        let key = meal.key();
        let Some(value) = lookup(body, key, &mut warnings) else {
            warnings.push(format!("missing meal {key}"));
            continue;
        };
        let Value::Array(items) = value else {
            warnings.push(format!("meal {key} is not a list"));
            continue;
        };
        if items.len() != OPTIONS_PER_MEAL {
            warnings.push(format!(
                "meal {key} has {} options, expected {OPTIONS_PER_MEAL}",
                items.len()
            ));
        }
        let slot = chart.meal_mut(meal);
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::Object(o) => slot.push(MealOption {
                    option: o.get("option").map(scalar_text).unwrap_or_default(),
                    quantity: o.get("quantity").map(scalar_text).unwrap_or_default(),
                }),
                _ => warnings.push(format!("dropped non-object option {} in {key}", i + 1)),
            }
        }
    }

    for (key, slot) in [
        ("total_calories", &mut chart.total_calories),
        ("total_protein", &mut chart.total_protein),
    ] {
        match lookup(body, key, &mut warnings) {
            Some(v) => *slot = scalar_text(v),
            None => warnings.push(format!("missing {key}")),
        }
    }

    (Some(chart), warnings)
}

/// Exact key first, then a case-insensitive match (noted as a warning).
fn lookup<'a>(obj: &'a Map<String, Value>, key: &str, warnings: &mut Vec<String>) -> Option<&'a Value> {
    if let Some(v) = obj.get(key) {
        return Some(v);
    }
    let (found, v) = obj.iter().find(|(k, _)| k.eq_ignore_ascii_case(key))?;
    warnings.push(format!("accepted key {found:?} for {key}"));
    Some(v)
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three(name: &str) -> Value {
        json!([
            { "option": format!("{name} A"), "quantity": "1 bowl" },
            { "option": format!("{name} B"), "quantity": "2 pcs" },
            { "option": format!("{name} C"), "quantity": "150 g" }
        ])
    }

    #[test]
    fn well_formed_reply_has_no_warnings() {
        let doc = json!({ "diet_chart": {
            "Breakfast": three("b"), "Lunch": three("l"), "Snacks": three("s"), "Dinner": three("d"),
            "total_calories": "1850", "total_protein": "95"
        }});
        let (chart, warnings) = sanitize(&doc);
        let chart = chart.unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(chart.lunch[1].option, "l B");
        assert_eq!(chart.total_calories, "1850");
        // Typed deserialization agrees with the tolerant path on good input.
        let typed: DietChart = serde_json::from_value(doc["diet_chart"].clone()).unwrap();
        assert_eq!(typed, chart);
    }

    #[test]
    fn missing_diet_chart_means_no_chart() {
        let (chart, warnings) = sanitize(&json!({ "Breakfast": [] }));
        assert!(chart.is_none());
        assert_eq!(warnings, vec!["missing diet_chart key".to_string()]);
        assert!(sanitize(&json!({ "diet_chart": [1, 2] })).0.is_none());
    }

    #[test]
    fn short_and_missing_meals_degrade_with_warnings() {
        let doc = json!({ "diet_chart": {
            "Breakfast": [{ "option": "Idli", "quantity": "4 pcs" }],
            "Lunch": "rice",
            "total_calories": 1600
        }});
        let (chart, warnings) = sanitize(&doc);
        let chart = chart.unwrap();
        assert_eq!(chart.breakfast.len(), 1);
        assert!(chart.lunch.is_empty());
        assert!(chart.dinner.is_empty());
        assert_eq!(chart.total_calories, "1600");
        assert_eq!(chart.total_protein, "");
        assert!(warnings.iter().any(|w| w.contains("Breakfast has 1 options")));
        assert!(warnings.iter().any(|w| w == "meal Lunch is not a list"));
        assert!(warnings.iter().any(|w| w == "missing meal Dinner"));
        assert!(warnings.iter().any(|w| w == "missing total_protein"));
    }

    #[test]
    fn wrong_key_casing_is_accepted_and_reported() {
        let doc = json!({ "diet_chart": { "breakfast": three("b"), "TOTAL_PROTEIN": 80 } });
        let (chart, warnings) = sanitize(&doc);
        let chart = chart.unwrap();
        assert_eq!(chart.breakfast.len(), 3);
        assert_eq!(chart.total_protein, "80");
        assert!(warnings.iter().any(|w| w.contains("\"breakfast\"")));
    }

    #[test]
    fn odd_option_entries_are_defaulted_or_dropped() {
        let doc = json!({ "diet_chart": { "Snacks": [
            { "option": "Makhana" },
            "Banana",
            { "quantity": 2 }
        ]}});
        let (chart, warnings) = sanitize(&doc);
        let snacks = chart.unwrap().snacks;
        assert_eq!(snacks.len(), 2);
        assert_eq!(snacks[0], MealOption { option: "Makhana".into(), quantity: String::new() });
        assert_eq!(snacks[1].quantity, "2");
        assert!(warnings.iter().any(|w| w.contains("non-object option 2 in Snacks")));
    }
}
