//! Parsers for the free-text fields of a case.

/// Outcome of parsing a free-text list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecParse<T> {
    /// Nothing was specified.
    Empty,
    Parsed(Vec<T>),
    Malformed(String),
}

/// Token meaning "none" in the disability field.
pub const NONE_TOKEN: &str = "无";

/// ASCII spelling of [`NONE_TOKEN`], matched case-insensitively.
pub const ASCII_NONE_TOKEN: &str = "none";

/// One person the victim supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub age: u32,
    pub support_count: u32,
}

/// Parses `"5级,8级"` style lists into levels 1..=10.
///
/// A token outside 1..=10 or not numeric rejects the whole list. Blank tokens are
/// skipped, so `",;"` parses to an empty list rather than [`SpecParse::Empty`].
pub fn parse_disability_levels(raw: &str) -> SpecParse<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NONE_TOKEN || trimmed.eq_ignore_ascii_case(ASCII_NONE_TOKEN)
    {
        return SpecParse::Empty;
    }

    let mut levels = Vec::new();
    for token in trimmed.split([',', ';', '，', '；', '、']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let digits = token.strip_suffix('级').unwrap_or(token).trim();
        match digits.parse::<u8>() {
            Ok(level) if (1..=10).contains(&level) => levels.push(level),
            Ok(level) => return SpecParse::Malformed(format!("伤残等级{level}超出1-10级范围")),
            Err(_) => return SpecParse::Malformed(format!("无法识别的伤残等级“{token}”")),
        }
    }

    SpecParse::Parsed(levels)
}

/// Parses `"10,1;70,2"` style lists of `age[,support_count]` entries.
///
/// A missing or non-positive support count is treated as 1.
pub fn parse_dependents(raw: &str) -> SpecParse<Dependent> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SpecParse::Empty;
    }

    let mut dependents = Vec::new();
    for entry in trimmed.split([';', '；']) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let mut parts = entry.split([',', '，']).map(str::trim);
        let age_token = parts.next().unwrap_or_default();
        let age_digits = age_token.strip_suffix('岁').unwrap_or(age_token).trim();
        let age = match age_digits.parse::<u32>() {
            Ok(age) => age,
            Err(_) => return SpecParse::Malformed(format!("无法识别的年龄“{age_token}”")),
        };

        let support_count = match parts.next().filter(|token| !token.is_empty()) {
            Some(token) => {
                let digits = token.strip_suffix('人').unwrap_or(token).trim();
                match digits.parse::<i64>() {
                    Ok(count) if count >= 1 => u32::try_from(count).unwrap_or(u32::MAX),
                    Ok(_) => 1,
                    Err(_) => {
                        return SpecParse::Malformed(format!("无法识别的扶养人数“{token}”"))
                    }
                }
            }
            None => 1,
        };

        dependents.push(Dependent { age, support_count });
    }

    if dependents.is_empty() {
        SpecParse::Empty
    } else {
        SpecParse::Parsed(dependents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disability_none_and_blank_are_empty() {
        assert_eq!(parse_disability_levels(""), SpecParse::Empty);
        assert_eq!(parse_disability_levels("  无 "), SpecParse::Empty);
        assert_eq!(parse_disability_levels("none"), SpecParse::Empty);
        assert_eq!(parse_disability_levels(" None "), SpecParse::Empty);
        assert!(matches!(parse_disability_levels("nothing"), SpecParse::Malformed(_)));
    }

    #[test]
    fn disability_accepts_mixed_separators_and_suffix() {
        assert_eq!(
            parse_disability_levels("5级，8级;9；10"),
            SpecParse::Parsed(vec![5, 8, 9, 10])
        );
        assert_eq!(
            parse_disability_levels("5级,5级"),
            SpecParse::Parsed(vec![5, 5])
        );
    }

    #[test]
    fn disability_rejects_out_of_range_tokens() {
        assert!(matches!(
            parse_disability_levels("5级,11级"),
            SpecParse::Malformed(_)
        ));
        assert!(matches!(
            parse_disability_levels("0"),
            SpecParse::Malformed(_)
        ));
        assert!(matches!(
            parse_disability_levels("重度"),
            SpecParse::Malformed(_)
        ));
    }

    #[test]
    fn disability_separator_only_input_parses_to_nothing() {
        assert_eq!(parse_disability_levels(",;，"), SpecParse::Parsed(Vec::new()));
    }

    #[test]
    fn dependents_default_and_clamp_support_count() {
        assert_eq!(
            parse_dependents("10;70,2；30岁，0"),
            SpecParse::Parsed(vec![
                Dependent { age: 10, support_count: 1 },
                Dependent { age: 70, support_count: 2 },
                Dependent { age: 30, support_count: 1 },
            ])
        );
    }

    #[test]
    fn dependents_reject_bad_numbers() {
        assert!(matches!(parse_dependents("ten,1"), SpecParse::Malformed(_)));
        assert!(matches!(parse_dependents("-3,1"), SpecParse::Malformed(_)));
        assert!(matches!(parse_dependents("10,two"), SpecParse::Malformed(_)));
    }

    #[test]
    fn dependents_blank_entries_are_empty() {
        assert_eq!(parse_dependents(" ; ；"), SpecParse::Empty);
    }
}
