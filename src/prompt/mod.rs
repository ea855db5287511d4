use std::fmt;

use crate::profile::UserProfile;
use crate::units;

/// Fully rendered instruction text for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt(String);

impl GenerationPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GenerationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn preamble() -> &'static str {
r#"Generate a personalized diet chart strictly in the following JSON format.
Do NOT include markdown, code fences, explanations, or extra keys.
Replace only the values inside quotes with the generated diet details.
Keep the JSON keys exactly the same as below.
For each meal (Breakfast, Lunch, Snacks, Dinner), provide three alternative options
- the user will eat only one option per meal
- and calculate total_calories and total_protein based on one option from each meal."#
}

fn chart_template() -> &'static str {
r#"{
  "diet_chart": {
    "Breakfast": [
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" }
    ],
    "Lunch": [
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" }
    ],
    "Snacks": [
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" }
    ],
    "Dinner": [
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" },
      { "option": "", "quantity": "" }
    ],
    "total_calories": "",
    "total_protein": ""
  }
}"#
}

fn rules() -> &'static str {
r#"Rules:
- Return ONLY the JSON shown above.
- Keep the keys exactly as in the template.
- Fill each "option" with the food item.
- Fill each "quantity" with the specific measurement.
- "total_calories" is the sum for the whole day.
- "total_protein" is the sum for the whole day in grams.
- No markdown, no backticks, no explanations."#
}

/// One line per profile field, in the order the model is shown them.
fn details(p: &UserProfile) -> String {
    let height_cm = units::height_to_cm(&p.height);
    let budget = match p.budget {
        Some(b) => format!("{} {}", b, p.budget_currency),
        None => "Not specified".to_string(),
    };
    let custom = p
        .custom_preferences
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("None");

    format!(
"Details to use for the diet chart:
Name: {name}
Gender: {gender}
Age: {age}
Height: {height_cm} cm
Weight: {weight} kg
Type: {diet}
Target Weight: {target} kg
Workout Type: {workout}
Transformation Timeframe: {time_frame}
Goal: {goal}
Preferred Cuisine: {cuisine}
Monthly Budget Except Home Food: {budget}
Custom Preferences: {custom}",
name = p.name.trim(),
gender = p.gender,
age = p.age,
height_cm = height_cm,
weight = p.weight,
diet = p.diet_type,
target = p.target_weight,
workout = p.workout_type,
time_frame = p.time_frame,
goal = p.goal,
cuisine = p.cuisine(),
budget = budget,
custom = custom)
}

/// Render the diet-chart instruction for `profile`. Pure: the same profile
/// always yields the same text.
pub fn diet_chart_prompt(profile: &UserProfile) -> GenerationPrompt {
    GenerationPrompt(format!(
        "{preamble}\n\n{template}\n\n{details}\n\n{rules}\n",
        preamble = preamble(),
        template = chart_template(),
        details = details(profile),
        rules = rules(),
    ))
}
