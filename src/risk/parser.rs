//! Parser for the compact risk list used in report query strings
//!
//! Format: `name|probability|impact` items joined by `,`, for example
//! `Scope creep|4|3,Staff turnover|2|5`. Items that do not have exactly
//! three fields, or whose probability/impact is not an integer, are
//! skipped; the remaining items are returned in order.

use super::scoring::{RiskItem, DEFAULT_RISK_NAME};

pub const ITEM_SEPARATOR: char = ',';
pub const FIELD_SEPARATOR: char = '|';

/// Parse a risk list, skipping malformed items
pub fn parse_risk_list(raw: &str) -> Vec<RiskItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(ITEM_SEPARATOR)
        .enumerate()
        .filter_map(|(index, item)| match parse_item(item) {
            Some(risk) => Some(risk),
            None => {
                log::warn!("Skipping malformed risk item #{}: '{}'", index + 1, item);
                None
            }
        })
        .collect()
}

fn parse_item(item: &str) -> Option<RiskItem> {
    let fields: Vec<&str> = item.split(FIELD_SEPARATOR).collect();
    let [name, probability, impact] = fields.as_slice() else {
        return None;
    };

    let probability = probability.trim().parse::<i64>().ok()?;
    let impact = impact.trim().parse::<i64>().ok()?;

    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_RISK_NAME } else { name };

    Some(RiskItem::new(name, probability, impact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let risks = parse_risk_list("Scope creep|4|3,Staff turnover|2|5");
        assert_eq!(
            risks,
            vec![RiskItem::new("Scope creep", 4, 3), RiskItem::new("Staff turnover", 2, 5)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_risk_list("").is_empty());
        assert!(parse_risk_list("   ").is_empty());
    }

    #[test]
    fn test_wrong_field_count_skipped() {
        let risks = parse_risk_list("Missing impact|3,Good|2|2,Too|many|1|1");
        assert_eq!(risks, vec![RiskItem::new("Good", 2, 2)]);
    }

    #[test]
    fn test_non_integer_fields_skipped() {
        let risks = parse_risk_list("Bad|x|2,Half|2.5|1,Ok| 3 | 4 ");
        assert_eq!(risks, vec![RiskItem::new("Ok", 3, 4)]);
    }

    #[test]
    fn test_trailing_separator_and_blank_name() {
        let risks = parse_risk_list("|1|5,");
        assert_eq!(risks, vec![RiskItem::new(DEFAULT_RISK_NAME, 1, 5)]);
    }
}
