use std::sync::OnceLock;

use regex::Regex;

/// Column names of the form `YYYY-MM`, e.g. `2023-05`.
fn month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}$").expect("static pattern is valid"))
}

/// Whether a column holds one month of sales.
pub fn is_time_bucket(name: &str) -> bool {
    month_pattern().is_match(name)
}

/// The monthly time-bucket columns among `columns`, in source order.
///
/// Run this against the table actually being summarised: the set of
/// buckets depends on the loaded file and is never cached.
pub fn time_bucket_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| is_time_bucket(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn keeps_month_columns_in_order() {
        let cols = names(&["2023-01", "Category1", "2023-02"]);
        assert_eq!(time_bucket_columns(&cols), names(&["2023-01", "2023-02"]));
    }

    #[test]
    fn classifier_is_idempotent() {
        let cols = names(&["2023-03", "QuantityOnHand", "2022-12", "PropOrder"]);
        let once = time_bucket_columns(&cols);
        assert_eq!(time_bucket_columns(&once), once);
        assert_eq!(once, names(&["2023-03", "2022-12"]));
    }

    #[test]
    fn rejects_near_misses() {
        for bad in ["2023-5", "23-05", "2023-05-01", "2023/05", " 2023-05", "2023-05 ", "abcd-ef"] {
            assert!(!is_time_bucket(bad), "{bad} should not match");
        }
        assert!(is_time_bucket("1999-99"));
    }

    #[test]
    fn no_month_columns_gives_empty_list() {
        assert!(time_bucket_columns(&names(&["ProductLine", "3MCov"])).is_empty());
    }
}
