use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::chart::DietChart;
use crate::errors::DietError;
use crate::profile::{Cuisine, Currency, DietType, Gender, Goal, TimeFrame, WorkoutType};
use crate::provider::Provider;
use crate::render;
use crate::wizard::{Answer, HeightUnit, Step, Wizard};

/// The two screens of a session. The chart travels with the transition and
/// is never stored anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Entry,
    Chart(Option<DietChart>),
}

/// Line-oriented terminal over any reader/writer pair.
pub struct Terminal<R, W> {
    input: R,
    out: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self { input: io::stdin().lock(), out: io::stdout() }
    }
}

/// Input closed; the session ends.
#[derive(Debug)]
pub struct Eof;

type Line<T> = std::result::Result<T, Eof>;

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, s: &str) {
        let _ = writeln!(self.out, "{s}");
    }

    fn read_line(&mut self) -> Line<String> {
        let _ = self.out.flush();
        let mut s = String::new();
        match self.input.read_line(&mut s) {
            Ok(0) | Err(_) => Err(Eof),
            Ok(_) => Ok(s.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    /// Free text; blank input keeps `current`.
    pub fn ask(&mut self, label: &str, current: &str) -> Line<String> {
        if current.is_empty() {
            let _ = write!(self.out, "{}: ", label.bold());
        } else {
            let _ = write!(self.out, "{} [{}]: ", label.bold(), current);
        }
        let v = self.read_line()?;
        Ok(if v.trim().is_empty() { current.to_string() } else { v.trim().to_string() })
    }

    /// Numbered menu; blank or out-of-range input keeps `current`.
    pub fn choose<T: Copy + PartialEq>(
        &mut self,
        label: &str,
        options: &[T],
        name: impl Fn(&T) -> &'static str,
        current: Option<T>,
    ) -> Line<Option<T>> {
        let _ = writeln!(self.out, "{}", label.bold());
        for (i, o) in options.iter().enumerate() {
            let mark = if current == Some(*o) { "*" } else { " " };
            let _ = writeln!(self.out, " {mark}{}. {}", i + 1, name(o));
        }
        let _ = write!(self.out, "> ");
        let v = self.read_line()?;
        let picked = v.trim().parse::<usize>().ok().and_then(|n| options.get(n.wrapping_sub(1)).copied());
        Ok(picked.or(current))
    }

    pub fn confirm(&mut self, prompt: &str) -> Line<bool> {
        let _ = write!(self.out, "{} [y/N]: ", prompt);
        let ans = self.read_line()?.trim().to_lowercase();
        Ok(ans == "y" || ans == "yes")
    }

    fn banner(&mut self) {
        let _ = writeln!(self.out, "\n{}", "Dietly".cyan().bold());
        let _ = writeln!(self.out, "{}", "Your AI-Powered Personal Diet Planner".cyan());
    }

    /// Step one fields.
    pub fn collect_personal(&mut self, w: &mut Wizard) -> Line<()> {
        let f = &mut w.form;
        f.name = self.ask("Name", &f.name)?;
        f.gender = self.choose("Gender", Gender::ALL, Gender::label, f.gender)?;
        f.age = self.ask("Age", &f.age)?;
        let unit = self.choose(
            "Height unit",
            &[HeightUnit::Centimeters, HeightUnit::FeetInches],
            |u| match u {
                HeightUnit::Centimeters => "Centimeters",
                HeightUnit::FeetInches => "Feet/Inches",
            },
            Some(f.height_unit),
        )?;
        f.height_unit = unit.unwrap_or_default();
        match f.height_unit {
            HeightUnit::Centimeters => f.height = self.ask("Height (cm)", &f.height)?,
            HeightUnit::FeetInches => {
                f.feet = self.ask("Feet", &f.feet)?;
                f.inches = self.ask("Inches", &f.inches)?;
            }
        }
        f.weight = self.ask("Current Weight (kg)", &f.weight)?;
        f.target_weight = self.ask("Target Weight (kg)", &f.target_weight)?;
        Ok(())
    }

    /// Step two fields.
    pub fn collect_preferences(&mut self, w: &mut Wizard) -> Line<()> {
        let f = &mut w.form;
        f.workout_type = self.choose("Workout Type", WorkoutType::ALL, WorkoutType::label, f.workout_type)?;
        f.time_frame = self.choose("Transformation Time", TimeFrame::ALL, TimeFrame::label, f.time_frame)?;
        f.diet_type = self.choose("Diet Type", DietType::ALL, DietType::label, f.diet_type)?;
        f.preferred_cuisine =
            self.choose("Preferred Cuisine", Cuisine::ALL, Cuisine::label, f.preferred_cuisine)?;
        if f.preferred_cuisine == Some(Cuisine::Other) {
            f.other_cuisine = self.ask("Enter your preferred cuisine or country name", &f.other_cuisine)?;
        }
        f.budget = self.ask("Monthly Budget Except Home Food (optional)", &f.budget)?;
        f.budget_currency = self
            .choose("Currency", Currency::ALL, Currency::label, Some(f.budget_currency))?
            .unwrap_or_default();
        f.goal = self.choose("Select Goal", Goal::ALL, Goal::label, f.goal)?;
        f.custom_preferences = self.ask(
            "Describe your preferences (e.g. mostly eggs, paneer, home-cooked only)",
            &f.custom_preferences,
        )?;
        Ok(())
    }

    /// Entry view: run the wizard until a generated answer is viewed.
    /// Returns the view to switch to.
    pub async fn entry_view(&mut self, w: &mut Wizard, provider: &dyn Provider) -> Line<View> {
        self.banner();
        loop {
            match w.step() {
                Step::Personal => {
                    self.collect_personal(w)?;
                    if w.next().is_err() {
                        if let Some(msg) = w.warning() {
                            self.say(&msg.red().to_string());
                        }
                    }
                }
                Step::Preferences => {
                    self.collect_preferences(w)?;
                    if !self.confirm("Generate Diet Plan? (n to go back)")? {
                        w.back();
                        continue;
                    }
                    let spinner = spinner("Generating Diet Plan...");
                    let result = w.submit(provider).await.map(|a| a.clone());
                    spinner.finish_and_clear();
                    match result {
                        Err(DietError::Validation) => {
                            if let Some(msg) = w.warning() {
                                self.say(&msg.red().to_string());
                            }
                        }
                        Err(e) => self.say(&e.to_string().red().to_string()),
                        Ok(Answer::Failed) => self.say(&Answer::Failed.message().red().to_string()),
                        Ok(Answer::Generated(_)) => {
                            self.say(&"Diet Chart Generated".cyan().bold().to_string());
                            if self.confirm("View Diet Chart?")? {
                                return Ok(View::Chart(w.view_chart()));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Chart view: render, then wait for the user to go back.
    pub fn chart_view(&mut self, chart: Option<&DietChart>) -> Line<View> {
        let _ = write!(self.out, "{}", render::render_chart(chart));
        let _ = write!(self.out, "Press Enter to go back ");
        self.read_line()?;
        Ok(View::Entry)
    }

    /// Alternate between the two views until input closes.
    pub async fn run(&mut self, provider: &dyn Provider) {
        let mut view = View::Entry;
        let mut wizard = Wizard::new();
        loop {
            let next = match &view {
                View::Entry => self.entry_view(&mut wizard, provider).await,
                View::Chart(chart) => {
                    let r = self.chart_view(chart.as_ref());
                    // Returning to entry starts a fresh form.
                    wizard = Wizard::new();
                    r
                }
            };
            match next {
                Ok(v) => view = v,
                Err(Eof) => {
                    self.say("");
                    return;
                }
            }
        }
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::prompt::GenerationPrompt;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct Fixed(&'static str);

    #[async_trait]
    impl Provider for Fixed {
        async fn generate(&self, _prompt: &GenerationPrompt) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn term(script: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn blank_answers_keep_current_values() {
        let mut t = term("\n\n7\n");
        assert_eq!(t.ask("Name", "Ravi").unwrap(), "Ravi");
        assert_eq!(t.choose("Goal", Goal::ALL, Goal::label, Some(Goal::StayFit)).unwrap(), Some(Goal::StayFit));
        assert_eq!(t.choose("Goal", Goal::ALL, Goal::label, None).unwrap(), None);
        assert!(t.ask("Name", "").is_err());
    }

    #[test]
    fn chart_view_without_state_shows_fallback_and_returns_to_entry() {
        let mut t = term("\n");
        assert_eq!(t.chart_view(None).unwrap(), View::Entry);
        let out = String::from_utf8(t.out).unwrap();
        assert!(out.contains("No Diet Chart Found"));
        assert!(out.contains("Go Back"));
    }

    #[tokio::test]
    async fn entry_view_walks_both_steps_to_chart() {
        let script = [
            "", // name missing: step one rejected
            "1", "28", "1", "175", "80", "72",
            "Ravi", "", "", "", "", "", "", // second pass keeps earlier answers
            "2", "3", "1", "2", "", "", "3", "", // step two
            "y", // generate
            "y", // view chart
        ]
        .join("\n")
            + "\n";
        let mut t = term(&script);
        let mut w = Wizard::new();
        let raw = r#"{"diet_chart":{"Breakfast":[{"option":"Idli","quantity":"4 pcs"}]}}"#;
        let view = t.entry_view(&mut w, &Fixed(raw)).await.unwrap();
        let View::Chart(Some(chart)) = view else { panic!("expected a chart view") };
        assert_eq!(chart.breakfast.len(), 1);
        assert_eq!(w.form.to_profile().unwrap().workout_type, WorkoutType::Gym5);
        let out = String::from_utf8(t.out).unwrap();
        assert_eq!(out.matches("Please fill out all the required fields.").count(), 1);
        assert!(out.contains("Diet Chart Generated"));
    }
}
