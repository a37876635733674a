use compare_core::ParsedPrice;

/// Formats an amount with Indian digit grouping, e.g. `1,23,456.5`.
///
/// At most two fraction digits are kept and trailing zeros are dropped.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let grouped = group_indian(int_part);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Last three digits form one group, every earlier pair another.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_price(price: Option<ParsedPrice>) -> String {
    match price {
        Some(ParsedPrice::Amount(amount)) => format!("₹{}", format_inr(amount)),
        Some(ParsedPrice::Unavailable) | None => compare_core::NOT_AVAILABLE.to_string(),
    }
}
