use colored::Colorize;
use std::fmt::Write;

use crate::chart::{DietChart, Meal, MealOption};

pub const NOT_FOUND_TITLE: &str = "No Diet Chart Found";
pub const GO_BACK: &str = "Go Back";

/// Render the chart view. `None` is the fallback screen.
pub fn render_chart(chart: Option<&DietChart>) -> String {
    match chart {
        Some(c) => render_found(c),
        None => render_not_found(),
    }
}

fn render_not_found() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", NOT_FOUND_TITLE.bold());
    let _ = writeln!(out, "[{}]", GO_BACK.bright_cyan().bold());
    out
}

fn render_found(chart: &DietChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Your Personalized Diet Chart".cyan().bold());
    for meal in Meal::ALL {
        out.push_str(&meal_card(meal.key(), chart.meal(meal)));
    }
    let _ = writeln!(
        out,
        "\n{}: {} kcal   {}: {} g",
        "Total Calories".cyan().bold(),
        chart.total_calories,
        "Total Protein".cyan().bold(),
        chart.total_protein
    );
    out
}

/// One section; lists whatever options the chart holds, however many.
fn meal_card(title: &str, items: &[MealOption]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}  {}", title.cyan().bold(), format!("({} options)", items.len()).dimmed());
    if items.is_empty() {
        let _ = writeln!(out, "  {}", "(none)".dimmed());
        return out;
    }
    let width = items.iter().map(|i| i.option.chars().count()).max().unwrap_or(0);
    for item in items {
        let pad = width - item.option.chars().count();
        let _ = writeln!(
            out,
            "  - {}{}  {}",
            item.option.bold(),
            " ".repeat(pad),
            item.quantity.dimmed()
        );
    }
    out
}
