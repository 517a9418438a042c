//! Built-in name lists

use serde::{Deserialize, Serialize};

use dw_core::{WheelError, WheelResult};

/// Initial list of a fresh session
pub const DEFAULT_NAMES: [&str; 8] = [
    "Alice", "Bob", "Charlie", "Diana", "Ethan", "Fatima", "George", "Hanna",
];

/// List installed by "reset to defaults"
pub const RESET_NAMES: [&str; 4] = ["Alice", "Bob", "Charlie", "Diana"];

/// Named quick-start list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTemplate {
    pub name: String,
    pub names: Vec<String>,
}

fn template(name: &str, names: &[&str]) -> NameTemplate {
    NameTemplate {
        name: name.to_string(),
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

/// Get all built-in templates
pub fn all_templates() -> Vec<NameTemplate> {
    vec![
        template("Team Meeting", &["Alice", "Bob", "Charlie", "Diana", "Emma"]),
        template(
            "Classroom",
            &["Student 1", "Student 2", "Student 3", "Student 4", "Student 5"],
        ),
        template(
            "Family Game Night",
            &["Mom", "Dad", "Sister", "Brother", "Grandma"],
        ),
        template(
            "Restaurant Choice",
            &["Italian", "Chinese", "Mexican", "American", "Indian"],
        ),
        template(
            "Movie Night",
            &["Action", "Comedy", "Drama", "Horror", "Sci-Fi"],
        ),
    ]
}

/// Look up a built-in template by display name
pub fn find_template(name: &str) -> WheelResult<NameTemplate> {
    all_templates()
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| WheelError::validation(format!("unknown template '{}'", name)))
}
