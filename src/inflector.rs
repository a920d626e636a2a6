//! English inflection for resource and model names.
//!
//! Only the rules the plugins need: pluralizing a model name into a remote
//! resource path, and classifying a controller name back into the model the
//! paginator keyed its counters by.

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "media",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("knife", "knives"),
    ("life", "lives"),
    ("man", "men"),
    ("movie", "movies"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("wife", "wives"),
    ("woman", "women"),
];

/// Words ending in `us` whose plural is `uses`.
const US_WORDS: &[&str] = &["bonus", "bus", "campus", "census", "focus", "status", "virus"];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Replaces a trailing `suffix` (ASCII case-insensitive) with `replacement`.
fn replace_suffix(word: &str, suffix: &str, replacement: &str) -> Option<String> {
    let lower = word.to_ascii_lowercase();
    if lower.len() > suffix.len() && lower.ends_with(suffix) {
        Some(format!("{}{}", &word[..word.len() - suffix.len()], replacement))
    } else {
        None
    }
}

/// Keeps the leading capital of `original` on an irregular replacement.
fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

/// Returns the plural form of an English word.
///
/// # Examples
///
/// ```
/// use json_api_plugins::inflector::pluralize;
///
/// assert_eq!(pluralize("task"), "tasks");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("status"), "statuses");
/// assert_eq!(pluralize("person"), "people");
/// ```
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR
        .iter()
        .find(|(singular, plural)| *singular == lower || *plural == lower)
    {
        return match_case(word, plural);
    }
    if lower.ends_with("quiz") {
        return format!("{word}zes");
    }
    if ["ss", "us", "x", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }
    if lower.ends_with('s') {
        return word.to_string();
    }
    let mut tail = lower.chars().rev();
    if let (Some('y'), Some(before)) = (tail.next(), tail.next()) {
        if !is_vowel(before) || lower.ends_with("quy") {
            if let Some(plural) = replace_suffix(word, "y", "ies") {
                return plural;
            }
        }
    }
    if let Some(plural) = replace_suffix(word, "lf", "lves") {
        return plural;
    }
    format!("{word}s")
}

/// Returns the singular form of an English word.
///
/// # Examples
///
/// ```
/// use json_api_plugins::inflector::singularize;
///
/// assert_eq!(singularize("tasks"), "task");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("boxes"), "box");
/// ```
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR
        .iter()
        .find(|(singular, plural)| *plural == lower || *singular == lower)
    {
        return match_case(word, singular);
    }
    if let Some(singular) = replace_suffix(word, "quizzes", "quiz") {
        return singular;
    }
    if let Some(singular) =
        replace_suffix(word, "ies", "y").or_else(|| replace_suffix(word, "lves", "lf"))
    {
        return singular;
    }
    if US_WORDS
        .iter()
        .any(|us| lower.ends_with(us) || lower.ends_with(&format!("{us}es")))
    {
        return replace_suffix(word, "uses", "us").unwrap_or_else(|| word.to_string());
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if let Some(singular) = replace_suffix(word, suffix, &suffix[..suffix.len() - 2]) {
            return singular;
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") {
        return word.to_string();
    }
    replace_suffix(word, "s", "").unwrap_or_else(|| word.to_string())
}

/// Converts `lower_case_underscored` into `CamelCase`.
pub fn camelize(word: &str) -> String {
    word.to_case(Case::Pascal)
}

/// Converts a table or controller name into its model class name.
///
/// # Examples
///
/// ```
/// use json_api_plugins::inflector::classify;
///
/// assert_eq!(classify("tasks"), "Task");
/// assert_eq!(classify("task_items"), "TaskItem");
/// ```
pub fn classify(name: &str) -> String {
    camelize(&singularize(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_regular_words() {
        assert_eq!(pluralize("task"), "tasks");
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("church"), "churches");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("case"), "cases");
        assert_eq!(pluralize("wolf"), "wolves");
        assert_eq!(pluralize("quiz"), "quizzes");
    }

    #[test]
    fn pluralize_leaves_plurals_and_uncountables_alone() {
        assert_eq!(pluralize("tasks"), "tasks");
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn pluralize_keeps_capitalization_of_irregulars() {
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("Child"), "Children");
    }

    #[test]
    fn singularize_reverses_pluralize() {
        for word in ["task", "category", "box", "church", "class", "status", "knife", "wolf", "person", "quiz"] {
            assert_eq!(singularize(&pluralize(word)), word, "round trip of {word}");
        }
    }

    #[test]
    fn singularize_does_not_overstrip() {
        assert_eq!(singularize("cases"), "case");
        assert_eq!(singularize("houses"), "house");
        assert_eq!(singularize("archives"), "archive");
        assert_eq!(singularize("sizes"), "size");
    }

    #[test]
    fn singularize_leaves_singulars_alone() {
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("task"), "task");
    }

    #[test]
    fn camelize_and_classify() {
        assert_eq!(camelize("task_items"), "TaskItems");
        assert_eq!(camelize("tasks"), "Tasks");
        assert_eq!(classify("categories"), "Category");
        assert_eq!(classify("people"), "Person");
        assert_eq!(classify("task_lists"), "TaskList");
        assert_eq!(classify("TaskLists"), "TaskList");
    }
}
