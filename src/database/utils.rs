use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?").unwrap());

/// Collapse whitespace and rewrite `?` placeholders to PostgreSQL's `$n`.
pub fn sql(query: &str) -> String {
    let cleaned = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let mut param_index = 0;
    PLACEHOLDER
        .replace_all(&cleaned, |_: &regex::Captures| {
            param_index += 1;
            format!("${}", param_index)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_placeholders_in_order() {
        let query = sql(r#"
            INSERT INTO attendance (team_code, location, notes)
            VALUES (?, ?, ?)
        "#);
        assert_eq!(
            query,
            "INSERT INTO attendance (team_code, location, notes) VALUES ($1, $2, $3)"
        );
    }

    #[test]
    fn query_without_placeholders_is_only_cleaned() {
        assert_eq!(sql("SELECT   1\n FROM teams"), "SELECT 1 FROM teams");
    }
}
