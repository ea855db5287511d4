use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DietError, Result};

/// Declares a closed choice list: serde/Display use the value sent to the
/// model, `label()` is what the form shows.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal, $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(&self) -> &'static str {
                match self { $($name::$variant => $value),+ }
            }

            pub fn label(&self) -> &'static str {
                match self { $($name::$variant => $label),+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

choice_enum!(Gender {
    Male => "male", "Male",
    Female => "female", "Female",
});

choice_enum!(DietType {
    Vegetarian => "vegetarian", "Vegetarian",
    NonVegetarian => "non-vegetarian", "Non-Vegetarian",
    Eggetarian => "Eggetarian", "Eggetarian",
});

choice_enum!(WorkoutType {
    Gym6 => "6 days a week gym", "6 Days a Week Gym",
    Gym5 => "5 days a week gym", "5 Days a Week Gym",
    Gym4 => "4 days a week gym", "4 Days a Week Gym",
    Gym3 => "3 days a week gym", "3 Days a Week Gym",
    Home => "home exercise", "Home Exercise",
    Sportsperson => "sportsperson", "Sportsperson",
    NoWorkout => "no workout", "No Workout",
});

choice_enum!(TimeFrame {
    OneMonth => "1 month", "1 Month",
    ThreeMonths => "3 months", "3 Months",
    FiveMonths => "5 months", "5 Months",
    SixMonths => "6 months", "6 Months",
    NineMonths => "9 months", "9 Months",
    TwelveMonths => "12 months", "12 Months",
});

choice_enum!(Goal {
    BuildMuscle => "build muscle", "Build Muscular Body",
    WomenFitness => "women fitness", "Women Fitness",
    StayFit => "stay fit", "Stay Fit",
});

choice_enum!(
    /// `Other` is a sentinel: the real cuisine lives in `UserProfile::other_cuisine`.
    Cuisine {
        NorthIndian => "North Indian", "North Indian",
        SouthIndian => "South Indian", "South Indian",
        Gujarati => "Gujarati", "Gujarati",
        Rajasthani => "Rajasthani", "Rajasthani",
        Bengali => "Bengali", "Bengali",
        Punjabi => "Punjabi", "Punjabi",
        Kashmiri => "Kashmiri", "Kashmiri",
        Maharashtrian => "Maharashtrian", "Maharashtrian",
        Goan => "Goan", "Goan",
        NorthEastern => "North Eastern", "North Eastern",
        MixedIndian => "Mixed Indian", "Mixed Indian",
        Other => "Other", "Other (type below)",
    }
);

choice_enum!(Currency {
    Inr => "INR", "₹ INR",
    Usd => "USD", "$ USD",
});

impl Default for Currency {
    fn default() -> Self {
        Currency::Inr
    }
}

/// Height in exactly one representation; the variant is the unit flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum Height {
    #[serde(rename = "cm")]
    Centimeters { cm: f64 },
    #[serde(rename = "ft-in")]
    FeetInches { feet: f64, inches: f64 },
}

impl Height {
    /// Finite, positive, and at least one whole centimeter once rounded.
    /// Zero inches is allowed; zero feet is not.
    pub fn is_valid(&self) -> bool {
        let parts_ok = match *self {
            Height::Centimeters { cm } => cm.is_finite() && cm > 0.0,
            Height::FeetInches { feet, inches } => {
                feet.is_finite() && feet > 0.0 && inches.is_finite() && inches >= 0.0
            }
        };
        parts_ok && crate::units::height_to_cm(self) >= 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub height: Height,
    pub weight: f64,
    pub target_weight: f64,
    pub diet_type: DietType,
    pub workout_type: WorkoutType,
    pub time_frame: TimeFrame,
    pub goal: Goal,
    pub preferred_cuisine: Cuisine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub budget_currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_preferences: Option<String>,
}

impl UserProfile {
    /// Cuisine as it should be described to the model, with the `Other`
    /// sentinel replaced by the free-text override.
    pub fn cuisine(&self) -> &str {
        match self.preferred_cuisine {
            Cuisine::Other => self
                .other_cuisine
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Any"),
            c => c.value(),
        }
    }

    /// Profiles that did not come through the form (e.g. TOML files) get the
    /// same field rules the form enforces.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(DietError::Profile(msg.to_string()));
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if self.name.trim().is_empty() {
            return bad("name is empty");
        }
        if self.age == 0 {
            return bad("age must be positive");
        }
        if !self.height.is_valid() {
            return bad("height must resolve to at least 1 cm");
        }
        if !positive(self.weight) {
            return bad("weight must be positive");
        }
        if !positive(self.target_weight) {
            return bad("target_weight must be positive");
        }
        if self.budget.is_some_and(|b| !b.is_finite() || b < 0.0) {
            return bad("budget must not be negative");
        }
        Ok(())
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        let profile: Self = toml::from_str(src).map_err(|e| DietError::Profile(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }
}
