use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Reduce a raw query to an FTS5 MATCH expression: strip punctuation
/// (FTS5 treats it as syntax), OR-join the remaining terms. Returns None
/// when nothing searchable is left.
pub(crate) fn fts_match_expr(query: &str) -> Option<String> {
    let sanitized: String = query
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
        .collect();
    let terms: Vec<&str> = sanitized.split_whitespace().collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

pub(crate) fn format_epoch(epoch: u64) -> String {
    let days = epoch / crate::constants::SECS_PER_DAY as u64;
    let mut year = 1970i64;
    let mut remaining = days as i64;
    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if remaining < days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }
    let days_in_months: [i64; 12] = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 0usize;
    for (i, &dim) in days_in_months.iter().enumerate() {
        if remaining < dim {
            month = i;
            break;
        }
        remaining -= dim;
    }
    format!("{:04}-{:02}-{:02}", year, month + 1, remaining + 1)
}

fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(0), "1970-01-01");
        assert_eq!(format_epoch(86400), "1970-01-02");
        assert_eq!(format_epoch(1704067200), "2024-01-01");
        assert_eq!(format_epoch(951782400), "2000-02-29");
    }

    #[test]
    fn test_epoch_now_is_recent() {
        // 2024-01-01 as a floor; catches a zeroed clock
        assert!(epoch_now() > 1_704_067_200);
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let s = "héllo wörld";
        let out = truncate(s, 6);
        assert!(out.ends_with("..."));
        assert_eq!(out, "héllo ...");
    }

    #[test]
    fn test_fts_match_expr_joins_terms() {
        assert_eq!(fts_match_expr("async rust"), Some("async OR rust".to_string()));
    }

    #[test]
    fn test_fts_match_expr_strips_punctuation() {
        assert_eq!(
            fts_match_expr("what's \"FTS5\"?"),
            Some("what OR s OR FTS5".to_string())
        );
    }

    #[test]
    fn test_fts_match_expr_empty() {
        assert_eq!(fts_match_expr(""), None);
        assert_eq!(fts_match_expr("?!* -- ''"), None);
    }
}
