//! User-facing message builders

use crate::config::Locale;
use crate::format::format_amount;
use crate::models::CategoryAnalysis;

/// What investing a category's savings in an asset would have yielded
pub fn investment_message(
    locale: Locale,
    currency: &str,
    category: &str,
    saved: f64,
    asset: &str,
    trend: f64,
    estimated_gain: f64,
) -> String {
    match locale {
        Locale::Tr => format!(
            "{} harcamandan artırdığın {} {}'yi '{}' fonuna yatırsaydın, şu an %{} değer kazanabilirdin (Tahmini kazanç: {} {}).",
            category,
            format_amount(saved),
            currency,
            asset,
            trend,
            format_amount(estimated_gain),
            currency
        ),
        Locale::En => format!(
            "If you had invested the {} {} you overspent on {} in '{}', it could have gained {}% (Estimated gain: {} {}).",
            format_amount(saved),
            currency,
            category,
            asset,
            trend,
            format_amount(estimated_gain),
            currency
        ),
    }
}

/// Overall summary of an analysis
pub fn summary_message(excessive_count: usize, total_savings: f64, currency: &str) -> String {
    if excessive_count == 0 {
        return "✅ Great job! Your spending is within normal patterns this month.".to_string();
    }

    let categories = if excessive_count == 1 {
        "1 category".to_string()
    } else {
        format!("{} categories", excessive_count)
    };

    format!(
        "⚠️ Excessive consumption detected in {}. Total potential savings: {} {}",
        categories,
        format_amount(total_savings),
        currency
    )
}

/// One-line advice for an excessive category
pub fn category_advice(analysis: &CategoryAnalysis, currency: &str) -> String {
    format!(
        "You spent {} {} on {} ({:.1}% above your average of {} {}). Potential saving: {} {}.",
        format_amount(analysis.current_month_spending),
        currency,
        analysis.category,
        analysis.percentage_change,
        format_amount(analysis.average_monthly_spending),
        currency,
        format_amount(analysis.potential_savings),
        currency
    )
}
