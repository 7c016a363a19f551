use super::clock;
use super::escape_html;
use super::number::grouped;
use crate::core::config::{RateConfig, RateStyle};
use crate::core::{CurrencyInfo, ExchangeRate};

/// Renders an exchange rate, e.g. `💱 日元兌港元匯率：¥1 = HK$0.0523 🇯🇵→🇭🇰`.
pub fn format_rate(rate: &ExchangeRate, config: &RateConfig) -> String {
    let base = CurrencyInfo::lookup(&rate.base);
    let target = CurrencyInfo::lookup(&rate.target);

    let mut headline = format!(
        "💱 {}兌{}匯率：{}1 = {}{}",
        base.name,
        target.name,
        base.symbol,
        target.symbol,
        grouped(rate.rate, config.decimals)
    );
    if !base.flag.is_empty() && !target.flag.is_empty() {
        headline.push_str(&format!(" {}→{}", base.flag, target.flag));
    }

    if config.style == RateStyle::Compact {
        return headline;
    }

    let mut lines = vec![headline];
    if let Some(inverse) = rate.inverse() {
        lines.push(format!(
            "🔁 反向匯率　　：{}1 = {}{}",
            target.symbol,
            base.symbol,
            grouped(inverse, 4)
        ));
    }
    if let Some(provider) = &rate.provider {
        lines.push(format!("🌐 資料來源　　：{}", escape_html(provider)));
    }
    if let Some(updated) = &rate.last_update {
        // Already in the display offset; the fetcher converts it.
        lines.push(format!(
            "🕐 更新時間　　：{} ({})",
            clock::format_display(updated),
            clock::DISPLAY_ZONE_LABEL
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn jpy_hkd(rate: f64) -> ExchangeRate {
        ExchangeRate {
            base: "JPY".to_string(),
            target: "HKD".to_string(),
            rate,
            provider: Some("https://www.exchangerate-api.com".to_string()),
            last_update: Some(clock::to_display(
                &DateTime::parse_from_rfc2822("Fri, 27 Mar 2020 00:02:31 +0000").unwrap(),
            )),
        }
    }

    fn config(decimals: usize, style: RateStyle) -> RateConfig {
        RateConfig {
            decimals,
            style,
            ..RateConfig::default()
        }
    }

    #[test]
    fn test_compact_four_decimals() {
        let text = format_rate(&jpy_hkd(0.0523), &config(4, RateStyle::Compact));
        assert_eq!(text, "💱 日元兌港元匯率：¥1 = HK$0.0523 🇯🇵→🇭🇰");
    }

    #[test]
    fn test_compact_six_decimals() {
        let text = format_rate(&jpy_hkd(0.0523), &config(6, RateStyle::Compact));
        assert!(text.contains("¥1 = HK$0.052300"));
    }

    #[test]
    fn test_extended_includes_inverse_provider_and_time() {
        let text = format_rate(&jpy_hkd(0.0523), &config(6, RateStyle::Extended));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "💱 日元兌港元匯率：¥1 = HK$0.052300 🇯🇵→🇭🇰",
                "🔁 反向匯率　　：HK$1 = ¥19.1205",
                "🌐 資料來源　　：https://www.exchangerate-api.com",
                "🕐 更新時間　　：2020年03月27日 08:02:31 (台北時間)",
            ]
        );
    }

    #[test]
    fn test_unknown_currency_has_no_flags() {
        let rate = ExchangeRate {
            target: "CHF".to_string(),
            ..jpy_hkd(0.0061)
        };
        let text = format_rate(&rate, &config(4, RateStyle::Compact));
        assert_eq!(text, "💱 日元兌CHF匯率：¥1 = CHF0.0061");
    }

    #[test]
    fn test_extended_skips_missing_details() {
        let rate = ExchangeRate {
            provider: None,
            last_update: None,
            ..jpy_hkd(0.0)
        };
        let text = format_rate(&rate, &config(4, RateStyle::Extended));
        assert_eq!(text, "💱 日元兌港元匯率：¥1 = HK$0.0000 🇯🇵→🇭🇰");
    }
}
