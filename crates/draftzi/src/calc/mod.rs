//! Deterministic legal calculations over numbers found in free text.
//!
//! The formula is picked by the first matching keyword family in
//! `CALCULATION_ROUTES`. Numbers are extracted in order of appearance; for
//! late fees, anchor words (`$`, `days`, `%`) take precedence over position
//! when assigning principal and days late.

use std::sync::LazyLock;
use thiserror::Error;

// ASCII digits only; `\d` would also match digits `f64::from_str` rejects.
static NUMBER_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"[0-9]+\.?[0-9]*").expect("number regex is valid")
});
static PERCENT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"([0-9]+)%").expect("percent regex is valid")
});
static DAYS_SUFFIX_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\s*days?\b").expect("days suffix regex is valid")
});

pub const DEFAULT_LATE_FEE_RATE: f64 = 5.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAMAGES_MULTIPLIER: f64 = 1.5;

pub const LATE_FEE_GUIDANCE: &str = "❌ Please specify rent amount and days late for calculation";
pub const PERCENTAGE_GUIDANCE: &str =
    "❌ Please specify percentage and amount (e.g., '15% of 2000')";
pub const DAMAGES_GUIDANCE: &str = "❌ Please specify base amount for damages calculation";
pub const GENERIC_GUIDANCE: &str = "❌ Please provide numbers for calculation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationKind {
    LateFee,
    Percentage,
    Damages,
    GenericSum,
}

/// Keyword families in priority order. Anything unmatched is a generic sum.
/// Word keywords match at the start of a word, so "calculate" is not "late".
pub const CALCULATION_ROUTES: &[(&[&str], CalculationKind)] = &[
    (&["late", "fee", "rent"], CalculationKind::LateFee),
    (&["%", "percent", "percentage"], CalculationKind::Percentage),
    (&["damage", "compensation", "award"], CalculationKind::Damages),
];

#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("could not parse number '{0}'")]
    InvalidNumber(String),

    #[error("{0} is not a finite amount")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberToken {
    pub value: f64,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub kind: CalculationKind,
    pub tokens: Vec<NumberToken>,
}

impl CalculationRequest {
    pub fn parse(query: &str) -> Result<Self, CalculationError> {
        Ok(Self {
            kind: route(query),
            tokens: extract_tokens(query)?,
        })
    }

    pub fn numbers(&self) -> Vec<f64> {
        self.tokens.iter().map(|t| t.value).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LateFee {
    pub principal: f64,
    pub days_late: f64,
    pub rate: f64,
    pub daily_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Percentage {
    pub percentage: f64,
    pub amount: f64,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Damages {
    pub base: f64,
    pub estimated: f64,
    pub total_award: f64,
}

pub fn route(query: &str) -> CalculationKind {
    let query_lower = query.to_lowercase();
    CALCULATION_ROUTES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| mentions(&query_lower, k)))
        .map(|(_, kind)| *kind)
        .unwrap_or(CalculationKind::GenericSum)
}

fn mentions(query_lower: &str, keyword: &str) -> bool {
    if keyword.chars().all(char::is_alphabetic) {
        query_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.starts_with(keyword))
    } else {
        query_lower.contains(keyword)
    }
}

pub fn extract_tokens(text: &str) -> Result<Vec<NumberToken>, CalculationError> {
    NUMBER_RE
        .find_iter(text)
        .map(|m| {
            let value = m
                .as_str()
                .parse::<f64>()
                .map_err(|_| CalculationError::InvalidNumber(m.as_str().to_string()))?;
            Ok(NumberToken {
                value,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// All decimal numbers in `text`, in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// First `<digits>%` token in the text, if any.
pub fn percent_override(text: &str) -> Option<f64> {
    PERCENT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Late fee from the non-percent numbers in `text`. Percent tokens are the
/// rate, never principal or days. Each token fills at most one role.
pub fn late_fee(text: &str, tokens: &[NumberToken]) -> Option<LateFee> {
    let is_percent = |t: &NumberToken| text[t.end..].starts_with('%');
    let is_days = |t: &NumberToken| DAYS_SUFFIX_RE.is_match(&text[t.end..]);
    let is_dollar = |t: &NumberToken| text[..t.start].trim_end().ends_with('$');

    let candidates: Vec<&NumberToken> = tokens.iter().filter(|t| !is_percent(*t)).collect();
    if candidates.len() < 2 {
        return None;
    }

    let mut used = vec![false; candidates.len()];
    let principal = match take_first(&candidates, &mut used, &is_dollar) {
        Some(value) => value,
        None => match take_first(&candidates, &mut used, &|t: &NumberToken| !is_days(t)) {
            Some(value) => value,
            None => take_first(&candidates, &mut used, &|_: &NumberToken| true)?,
        },
    };
    let days_late = match take_first(&candidates, &mut used, &is_days) {
        Some(value) => value,
        None => take_first(&candidates, &mut used, &|_: &NumberToken| true)?,
    };

    let rate = percent_override(text).unwrap_or(DEFAULT_LATE_FEE_RATE);
    let daily_fee = principal * rate / 100.0 / DAYS_PER_MONTH;
    let total = daily_fee * days_late;

    Some(LateFee {
        principal,
        days_late,
        rate,
        daily_fee,
        total,
    })
}

/// Claim the first unused candidate accepted by `wanted`.
fn take_first(
    candidates: &[&NumberToken],
    used: &mut [bool],
    wanted: &dyn Fn(&NumberToken) -> bool,
) -> Option<f64> {
    let i = (0..candidates.len()).find(|&i| !used[i] && wanted(candidates[i]))?;
    used[i] = true;
    Some(candidates[i].value)
}

pub fn percentage(numbers: &[f64]) -> Option<Percentage> {
    match numbers {
        [percentage, amount, ..] => Some(Percentage {
            percentage: *percentage,
            amount: *amount,
            result: percentage / 100.0 * amount,
        }),
        _ => None,
    }
}

pub fn damages(numbers: &[f64]) -> Option<Damages> {
    let base = *numbers.first()?;
    Some(Damages {
        base,
        estimated: base * DAMAGES_MULTIPLIER,
        total_award: base * (1.0 + DAMAGES_MULTIPLIER),
    })
}

#[derive(Debug, Clone, Default)]
pub struct LegalCalculator;

impl LegalCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Run the calculation the query asks for. Always returns displayable text;
    /// faults are reported as a calculation error message.
    pub fn calculate(&self, query: &str) -> String {
        match self.try_calculate(query) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "[Calculator] Calculation failed");
                format!("❌ Calculation error: {}", e)
            }
        }
    }

    fn try_calculate(&self, query: &str) -> Result<String, CalculationError> {
        let request = CalculationRequest::parse(query)?;
        let numbers = request.numbers();

        match request.kind {
            CalculationKind::LateFee => match late_fee(query, &request.tokens) {
                Some(fee) => render_late_fee(&fee),
                None => Ok(LATE_FEE_GUIDANCE.to_string()),
            },
            CalculationKind::Percentage => match percentage(&numbers) {
                Some(p) => render_percentage(&p),
                None => Ok(PERCENTAGE_GUIDANCE.to_string()),
            },
            CalculationKind::Damages => match damages(&numbers) {
                Some(d) => render_damages(&d),
                None => Ok(DAMAGES_GUIDANCE.to_string()),
            },
            CalculationKind::GenericSum => render_sum(&numbers),
        }
    }
}

pub fn calculate(query: &str) -> String {
    LegalCalculator::new().calculate(query)
}

fn finite(value: f64, what: &'static str) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFinite(what))
    }
}

fn render_late_fee(fee: &LateFee) -> Result<String, CalculationError> {
    Ok(format!(
        "🧮 **Late Fee Calculation**:\n\n\
         - Rent Amount: ${}\n\
         - Days Late: {}\n\
         - Late Fee Rate: {}% monthly\n\
         - Daily Late Fee: ${}\n\
         - **Total Late Fee: ${}**\n\n\
         💡 **Legal Note**: Many jurisdictions cap late fees at 5-10% of monthly rent",
        money(finite(fee.principal, "rent amount")?),
        plain(fee.days_late),
        plain(fee.rate),
        money(finite(fee.daily_fee, "daily late fee")?),
        money(finite(fee.total, "total late fee")?),
    ))
}

fn render_percentage(p: &Percentage) -> Result<String, CalculationError> {
    Ok(format!(
        "🧮 **Percentage Calculation**:\n\n\
         - Percentage: {}%\n\
         - Amount: ${}\n\
         - **Result: ${}**\n\n\
         💼 **Common Legal Uses**: Commission, royalties, late fees, discounts",
        plain(p.percentage),
        money(finite(p.amount, "amount")?),
        money(finite(p.result, "result")?),
    ))
}

fn render_damages(d: &Damages) -> Result<String, CalculationError> {
    Ok(format!(
        "⚖️ **Damages Estimation**:\n\n\
         - Base Amount: ${}\n\
         - Estimated Damages ({}x): ${}\n\
         - **Total Potential Award: ${}**\n\n\
         ⚠️ **Legal Disclaimer**: Actual damages depend on contract terms and jurisdiction",
        money(finite(d.base, "base amount")?),
        DAMAGES_MULTIPLIER,
        money(finite(d.estimated, "estimated damages")?),
        money(finite(d.total_award, "total award")?),
    ))
}

fn render_sum(numbers: &[f64]) -> Result<String, CalculationError> {
    if numbers.is_empty() {
        return Ok(GENERIC_GUIDANCE.to_string());
    }
    let total = finite(numbers.iter().sum(), "sum")?;
    let listed: Vec<String> = numbers.iter().map(|n| plain(*n)).collect();

    Ok(format!(
        "🧮 **General Calculation**:\n\n\
         - Numbers: {}\n\
         - **Sum: {}**\n\n\
         💡 Use specific terms like 'late fee' or 'percentage' for legal calculations",
        listed.join(", "),
        money(total),
    ))
}

/// Two decimals with thousands separators: `1234.5` → `"1,234.50"`.
pub fn money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Whole numbers without a fractional part, everything else as-is.
fn plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_priority() {
        assert_eq!(route("late fee of 5%"), CalculationKind::LateFee);
        assert_eq!(route("15% of 2000"), CalculationKind::Percentage);
        assert_eq!(route("compensation award 100"), CalculationKind::Damages);
        assert_eq!(route("1 and 2"), CalculationKind::GenericSum);
    }

    #[test]
    fn test_late_fee_scenario() {
        let query = "Calculate late fee on $2000 rent for 15 days at 5%";
        assert_eq!(extract_numbers(query), vec![2000.0, 15.0, 5.0]);
        assert_eq!(percent_override(query), Some(5.0));

        let fee = late_fee(query, &extract_tokens(query).unwrap()).unwrap();
        assert_eq!(fee.principal, 2000.0);
        assert_eq!(fee.days_late, 15.0);
        assert_eq!(fee.rate, 5.0);
        assert_eq!(money(fee.daily_fee), "3.33");
        assert_eq!(money(fee.total), "50.00");

        let text = calculate(query);
        assert!(text.contains("Rent Amount: $2,000.00"));
        assert!(text.contains("Daily Late Fee: $3.33"));
        assert!(text.contains("**Total Late Fee: $50.00**"));
    }

    #[test]
    fn test_late_fee_anchors_override_position() {
        // Positionally the rate would be read as principal; anchors fix that.
        let query = "Calculate 5% late fee on $2000 rent for 15 days";
        let fee = late_fee(query, &extract_tokens(query).unwrap()).unwrap();
        assert_eq!(fee.principal, 2000.0);
        assert_eq!(fee.days_late, 15.0);
        assert_eq!(fee.rate, 5.0);
    }

    #[test]
    fn test_late_fee_positional_without_anchors() {
        let query = "late fee 1200 10";
        let fee = late_fee(query, &extract_tokens(query).unwrap()).unwrap();
        assert_eq!(fee.principal, 1200.0);
        assert_eq!(fee.days_late, 10.0);
        assert_eq!(fee.rate, DEFAULT_LATE_FEE_RATE);
        assert_eq!(money(fee.total), "20.00");
    }

    #[test]
    fn test_late_fee_needs_two_numbers() {
        assert_eq!(calculate("late fee on 2000"), LATE_FEE_GUIDANCE);
    }

    #[test]
    fn test_late_fee_never_reuses_a_token() {
        // the percent is the rate, leaving a single number for two roles
        let query = "late fee 15% of 2000";
        assert_eq!(late_fee(query, &extract_tokens(query).unwrap()), None);
        assert_eq!(calculate(query), LATE_FEE_GUIDANCE);

        let query = "late fee of 5% on 1000 for 10";
        let fee = late_fee(query, &extract_tokens(query).unwrap()).unwrap();
        assert_eq!((fee.principal, fee.days_late, fee.rate), (1000.0, 10.0, 5.0));
    }

    #[test]
    fn test_late_fee_all_days_anchored() {
        let query = "late fee 30 days then 12 days";
        let fee = late_fee(query, &extract_tokens(query).unwrap()).unwrap();
        assert_eq!(fee.principal, 30.0);
        assert_eq!(fee.days_late, 12.0);
    }

    #[test]
    fn test_route_matches_word_starts() {
        assert_eq!(route("Calculate damages of 10000"), CalculationKind::Damages);
        assert_eq!(route("Calculate 15% of 2000"), CalculationKind::Percentage);
        assert_eq!(route("current value 3 and 4"), CalculationKind::GenericSum);
        assert_eq!(route("rental late fees"), CalculationKind::LateFee);
        assert!(calculate("Calculate 15% of 2000").contains("**Result: $300.00**"));
        assert!(calculate("Calculate damages of 10000").contains("$25,000.00"));
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        assert!(extract_tokens("\u{661}\u{662}\u{663} and 4").is_ok());
        assert_eq!(extract_numbers("\u{661}\u{662}\u{663} and 4"), vec![4.0]);
        let text = calculate("add \u{661}\u{662}\u{663} and 2");
        assert!(text.contains("Numbers: 2\n"));
    }

    #[test]
    fn test_percentage_scenario() {
        let p = percentage(&extract_numbers("15% of 2000")).unwrap();
        assert_eq!(money(p.result), "300.00");
        assert!(calculate("15% of 2000").contains("**Result: $300.00**"));
        assert_eq!(calculate("what percent is it"), PERCENTAGE_GUIDANCE);
    }

    #[test]
    fn test_damages_scenario() {
        let d = damages(&extract_numbers("damages of 10000")).unwrap();
        assert_eq!(money(d.estimated), "15,000.00");
        assert_eq!(money(d.total_award), "25,000.00");
        assert_eq!(d.estimated, 15000.0);
        assert_eq!(d.total_award, 25000.0);
        assert_eq!(calculate("damages please"), DAMAGES_GUIDANCE);
    }

    #[test]
    fn test_generic_sum() {
        let text = calculate("add 1.5 and 2 and 3");
        assert!(text.contains("Numbers: 1.5, 2, 3"));
        assert!(text.contains("**Sum: 6.50**"));
        assert_eq!(calculate("nothing numeric"), GENERIC_GUIDANCE);
    }

    #[test]
    fn test_non_finite_is_reported_not_raised() {
        let huge = format!("{} and 1", "9".repeat(400));
        let text = calculate(&huge);
        assert!(text.starts_with("❌ Calculation error:"));
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.999), "1,000.00");
        assert_eq!(money(1234567.891), "1,234,567.89");
        assert_eq!(money(-1500.0), "-1,500.00");
    }
}
