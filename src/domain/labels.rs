//! Coded filter values and their display text.

use crate::domain::model::FilterKey;

/// Option shown at the top of every listing filter meaning "no constraint".
pub const ALL_OPTION: &str = "全部";

pub const LOCATIONS: &[(&str, &str)] = &[
    ("selangor", "雪兰莪"),
    ("johor", "柔佛"),
    ("penang", "槟城"),
    ("kuala_lumpur", "吉隆坡"),
    ("kuching", "古晋"),
    ("sarawak", "砂拉越"),
    ("perak", "霹雳"),
];

pub const LEVELS: &[(&str, &str)] = &[
    ("foundation", "预科"),
    ("diploma", "专科"),
    ("degree", "本科"),
    ("master", "硕士"),
    ("phd", "博士"),
    ("certificate", "证书"),
];

pub const INTAKES: &[(&str, &str)] = &[
    ("1", "1月"),
    ("2", "2月"),
    ("3", "3月"),
    ("4", "4月"),
    ("5", "5月"),
    ("6", "6月"),
    ("7", "7月"),
    ("8", "8月"),
    ("9", "9月"),
    ("10", "10月"),
    ("11", "11月"),
    ("12", "12月"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
}

pub fn location_label(code: &str) -> Option<&'static str> {
    lookup(LOCATIONS, code)
}

pub fn level_label(code: &str) -> Option<&'static str> {
    lookup(LEVELS, code)
}

pub fn intake_label(code: &str) -> Option<&'static str> {
    lookup(INTAKES, code)
}

/// Static dictionary for a filter. Universities come from the API, so they
/// have none.
pub fn table(key: FilterKey) -> &'static [(&'static str, &'static str)] {
    match key {
        FilterKey::Location => LOCATIONS,
        FilterKey::Level => LEVELS,
        FilterKey::Intake => INTAKES,
        FilterKey::University => &[],
    }
}

/// Display text for `code`, falling back to the code itself.
pub fn display(key: FilterKey, code: &str) -> String {
    lookup(table(key), code).unwrap_or(code).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_resolve() {
        assert_eq!(location_label("penang"), Some("槟城"));
        assert_eq!(level_label("phd"), Some("博士"));
        assert_eq!(intake_label("12"), Some("12月"));
        assert_eq!(location_label("london"), None);
    }

    #[test]
    fn test_display_falls_back_to_code() {
        assert_eq!(display(FilterKey::Level, "master"), "硕士");
        assert_eq!(display(FilterKey::Level, "postdoc"), "postdoc");
        assert_eq!(display(FilterKey::University, "42"), "42");
    }

    #[test]
    fn test_intake_table_covers_every_month() {
        assert_eq!(INTAKES.len(), 12);
    }
}
