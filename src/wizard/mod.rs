use tracing::{debug, info, warn};

use crate::chart::{self, DietChart};
use crate::errors::{DietError, Result};
use crate::extract;
use crate::profile::{
    Cuisine, Currency, DietType, Gender, Goal, Height, TimeFrame, UserProfile, WorkoutType,
};
use crate::prompt::{self, GenerationPrompt};
use crate::provider::Provider;

/// Shown in place of a chart when generation fails.
pub const GENERATION_FAILED: &str = "Failed to generate diet chart. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightUnit {
    #[default]
    Centimeters,
    FeetInches,
}

/// Raw form contents as typed by the user. Nothing here is validated until
/// the wizard advances or submits.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub name: String,
    pub gender: Option<Gender>,
    pub age: String,
    pub height_unit: HeightUnit,
    pub height: String,
    pub feet: String,
    pub inches: String,
    pub weight: String,
    pub target_weight: String,
    pub time_frame: Option<TimeFrame>,
    pub diet_type: Option<DietType>,
    pub goal: Option<Goal>,
    pub workout_type: Option<WorkoutType>,
    pub preferred_cuisine: Option<Cuisine>,
    pub other_cuisine: String,
    pub budget: String,
    pub budget_currency: Currency,
    pub custom_preferences: String,
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

fn positive(s: &str) -> Option<f64> {
    non_empty(s)?.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn non_negative(s: &str) -> Option<f64> {
    non_empty(s)?.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// Step-one fields once they have passed validation.
struct Personal {
    name: String,
    gender: Gender,
    age: u32,
    height: Height,
    weight: f64,
    target_weight: f64,
}

impl FormState {
    /// Height under the active unit; feet/inches need both parts. Anything
    /// that rounds below one centimeter is rejected.
    pub fn height(&self) -> Option<Height> {
        let height = match self.height_unit {
            HeightUnit::Centimeters => Height::Centimeters { cm: positive(&self.height)? },
            HeightUnit::FeetInches => Height::FeetInches {
                feet: positive(&self.feet)?,
                inches: non_negative(&self.inches)?,
            },
        };
        height.is_valid().then_some(height)
    }

    fn personal(&self) -> Option<Personal> {
        Some(Personal {
            name: non_empty(&self.name)?.to_string(),
            gender: self.gender?,
            age: non_empty(&self.age)?.parse::<u32>().ok().filter(|a| *a > 0)?,
            height: self.height()?,
            weight: positive(&self.weight)?,
            target_weight: positive(&self.target_weight)?,
        })
    }

    pub fn personal_complete(&self) -> bool {
        self.personal().is_some()
    }

    /// The immutable profile, or `Validation` if any required field of
    /// either step is missing. Malformed optional budget is treated as absent.
    pub fn to_profile(&self) -> Result<UserProfile> {
        let p = self.personal().ok_or(DietError::Validation)?;
        let missing = || DietError::Validation;
        Ok(UserProfile {
            name: p.name,
            gender: p.gender,
            age: p.age,
            height: p.height,
            weight: p.weight,
            target_weight: p.target_weight,
            diet_type: self.diet_type.ok_or_else(missing)?,
            workout_type: self.workout_type.ok_or_else(missing)?,
            time_frame: self.time_frame.ok_or_else(missing)?,
            goal: self.goal.ok_or_else(missing)?,
            preferred_cuisine: self.preferred_cuisine.ok_or_else(missing)?,
            other_cuisine: non_empty(&self.other_cuisine).map(str::to_string),
            budget: non_negative(&self.budget),
            budget_currency: self.budget_currency,
            custom_preferences: non_empty(&self.custom_preferences).map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Personal,
    Preferences,
}

/// Outcome of the last submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Generated(String),
    Failed,
}

impl Answer {
    pub fn message(&self) -> &str {
        match self {
            Answer::Generated(raw) => raw,
            Answer::Failed => GENERATION_FAILED,
        }
    }
}

/// Two-step form controller for one session.
#[derive(Debug, Default)]
pub struct Wizard {
    pub form: FormState,
    step: Step,
    warning: bool,
    loading: bool,
    answer: Option<Answer>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The generic warning, if the last advance/submit was incomplete.
    pub fn warning(&self) -> Option<&'static str> {
        self.warning.then_some(crate::errors::REQUIRED_FIELDS_WARNING)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    /// Step one to step two; all-or-nothing.
    pub fn next(&mut self) -> Result<()> {
        if self.form.personal_complete() {
            self.step = Step::Preferences;
            self.warning = false;
            Ok(())
        } else {
            self.warning = true;
            debug!("step one incomplete");
            Err(DietError::Validation)
        }
    }

    pub fn back(&mut self) {
        self.step = Step::Personal;
    }

    /// Validate, synthesize and raise the loading flag. Fails with `Busy`
    /// while a request is outstanding.
    pub fn begin_submission(&mut self) -> Result<GenerationPrompt> {
        if self.loading {
            return Err(DietError::Busy);
        }
        let profile = self.form.to_profile().map_err(|e| {
            self.warning = true;
            e
        })?;
        self.warning = false;
        self.loading = true;
        self.answer = None;
        Ok(prompt::diet_chart_prompt(&profile))
    }

    /// Record the provider outcome and drop the loading flag.
    pub fn finish_submission(&mut self, outcome: Result<String>) -> &Answer {
        self.loading = false;
        let answer = match outcome {
            Ok(raw) => {
                info!(bytes = raw.len(), "diet chart generated");
                Answer::Generated(raw)
            }
            Err(e) => {
                warn!(error = %e, "diet chart generation failed");
                Answer::Failed
            }
        };
        self.answer.insert(answer)
    }

    /// One full submission: a single provider attempt, no retry.
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Answer> {
        let prompt = self.begin_submission()?;
        let outcome = provider.generate(&prompt).await;
        Ok(self.finish_submission(outcome))
    }

    /// Extract the chart for the chart view. Parse and shape problems only
    /// surface here, as `None`.
    pub fn view_chart(&self) -> Option<DietChart> {
        match &self.answer {
            Some(Answer::Generated(raw)) => parse_chart(raw),
            _ => None,
        }
    }
}

/// Raw model reply to typed chart, logging every schema deviation.
pub fn parse_chart(raw: &str) -> Option<DietChart> {
    let doc = extract::extract_json(raw)?;
    let (chart, warnings) = chart::sanitize(&doc);
    for w in &warnings {
        warn!(issue = %w, "diet chart deviates from template");
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(std::result::Result<&'static str, &'static str>);

    #[async_trait]
    impl Provider for Canned {
        async fn generate(&self, _prompt: &GenerationPrompt) -> Result<String> {
            match self.0 {
                Ok(s) => Ok(s.to_string()),
                Err(e) => Err(DietError::Transport(e.to_string())),
            }
        }
    }

    fn step_one(w: &mut Wizard) {
        w.form.name = "Ravi".into();
        w.form.gender = Some(Gender::Male);
        w.form.age = "28".into();
        w.form.height = "175".into();
        w.form.weight = "80".into();
        w.form.target_weight = "72".into();
    }

    fn step_two(w: &mut Wizard) {
        w.form.workout_type = Some(WorkoutType::Gym4);
        w.form.time_frame = Some(TimeFrame::ThreeMonths);
        w.form.diet_type = Some(DietType::Vegetarian);
        w.form.preferred_cuisine = Some(Cuisine::SouthIndian);
        w.form.goal = Some(Goal::StayFit);
    }

    #[test]
    fn incomplete_step_one_blocks_with_single_warning() {
        let mut w = Wizard::new();
        step_one(&mut w);
        w.form.target_weight.clear();
        assert!(matches!(w.next(), Err(DietError::Validation)));
        assert_eq!(w.step(), Step::Personal);
        assert_eq!(w.warning(), Some("Please fill out all the required fields."));

        w.form.target_weight = "72".into();
        w.next().unwrap();
        assert_eq!(w.step(), Step::Preferences);
        assert_eq!(w.warning(), None);
    }

    #[test]
    fn imperial_height_needs_both_parts() {
        let mut w = Wizard::new();
        step_one(&mut w);
        w.form.height.clear();
        w.form.height_unit = HeightUnit::FeetInches;
        w.form.feet = "5".into();
        assert!(w.next().is_err());
        w.form.inches = "0".into();
        assert!(w.next().is_ok());
        assert_eq!(w.form.height(), Some(Height::FeetInches { feet: 5.0, inches: 0.0 }));
    }

    #[test]
    fn height_rounding_to_zero_cm_is_incomplete() {
        let mut w = Wizard::new();
        step_one(&mut w);
        w.form.height = "0.4".into();
        assert_eq!(w.form.height(), None);
        assert!(w.next().is_err());
        w.form.height = "0.6".into();
        assert!(w.next().is_ok());
    }

    #[test]
    fn non_numeric_age_is_incomplete() {
        let mut w = Wizard::new();
        step_one(&mut w);
        w.form.age = "twenty".into();
        assert!(w.next().is_err());
    }

    #[test]
    fn back_keeps_form_contents() {
        let mut w = Wizard::new();
        step_one(&mut w);
        w.next().unwrap();
        w.back();
        assert_eq!(w.step(), Step::Personal);
        assert_eq!(w.form.name, "Ravi");
    }

    #[test]
    fn second_submission_while_loading_is_rejected() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        let prompt = w.begin_submission().unwrap();
        assert!(prompt.as_str().contains("Height: 175 cm"));
        assert!(w.is_loading());
        assert!(matches!(w.begin_submission(), Err(DietError::Busy)));

        w.finish_submission(Ok("{}".into()));
        assert!(!w.is_loading());
        assert!(w.begin_submission().is_ok());
    }

    #[test]
    fn missing_step_two_choice_fails_submission() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        w.form.goal = None;
        assert!(matches!(w.begin_submission(), Err(DietError::Validation)));
        assert!(!w.is_loading());
        assert!(w.warning().is_some());
    }

    #[test]
    fn optional_fields_map_to_profile() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        w.form.budget = "abc".into();
        w.form.custom_preferences = "  ".into();
        let p = w.form.to_profile().unwrap();
        assert_eq!(p.budget, None);
        assert_eq!(p.custom_preferences, None);
        w.form.budget = "2500".into();
        w.form.budget_currency = Currency::Usd;
        assert_eq!(w.form.to_profile().unwrap().budget, Some(2500.0));
    }

    #[tokio::test]
    async fn failed_generation_yields_fallback_and_no_chart() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        let answer = w.submit(&Canned(Err("connection refused"))).await.unwrap();
        assert_eq!(answer, &Answer::Failed);
        assert_eq!(answer.message(), GENERATION_FAILED);
        assert!(!w.is_loading());
        assert_eq!(w.view_chart(), None);
    }

    #[tokio::test]
    async fn unparseable_reply_surfaces_only_at_view_time() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        let answer = w.submit(&Canned(Ok("Sorry, I can't help with that."))).await.unwrap();
        assert!(matches!(answer, Answer::Generated(_)));
        assert_eq!(w.view_chart(), None);
    }

    #[tokio::test]
    async fn fenced_reply_becomes_chart() {
        let mut w = Wizard::new();
        step_one(&mut w);
        step_two(&mut w);
        let raw = "```json\n{\"diet_chart\":{\"Breakfast\":[{\"option\":\"Idli\",\"quantity\":\"4 pcs\"}],\"total_calories\":\"1800\",\"total_protein\":\"90\"}}\n```";
        w.submit(&Canned(Ok(raw))).await.unwrap();
        let chart = w.view_chart().unwrap();
        assert_eq!(chart.breakfast[0].option, "Idli");
        assert_eq!(chart.total_protein, "90");
    }

    #[test]
    fn view_before_any_submission_is_empty() {
        assert_eq!(Wizard::new().view_chart(), None);
    }
}
