use super::clock;
use super::escape_html;
use super::number::{grouped, signed};
use crate::core::currency::{CurrencyInfo, metal_name};
use crate::core::PriceQuote;

/// Renders a spot quote as the multi-line gold report.
pub fn format_quote(quote: &PriceQuote) -> String {
    let metal = metal_name(&quote.metal);
    let unit = CurrencyInfo::lookup(&quote.currency).name;
    let per_ounce = |value: f64| format!("{} {unit}/盎司", grouped(value, 3));

    let mut lines = vec![format!(
        "【{metal}即時報價 ({}/{})】",
        quote.metal, quote.currency
    )];

    match clock::from_epoch(quote.timestamp) {
        Some(updated) => lines.push(format!(
            "🕐 更新時間　　：{} ({})",
            clock::format_display(&updated),
            clock::DISPLAY_ZONE_LABEL
        )),
        None => lines.push("🕐 更新時間　　：N/A".to_string()),
    }
    if let Some(opened) = quote.open_time.and_then(clock::from_epoch) {
        lines.push(format!(
            "🕘 開盤時間　　：{} ({})",
            clock::format_display(&opened),
            clock::DISPLAY_ZONE_LABEL
        ));
    }

    lines.push(format!("🌐 資料來源　　：{}", escape_html(&quote.exchange)));
    lines.push(format!("💰 當前價格　　：{}", per_ounce(quote.price)));
    lines.push(format!("📈 今日開盤　　：{}", per_ounce(quote.open_price)));
    lines.push(format!("🔺 今日最高　　：{}", per_ounce(quote.high_price)));
    lines.push(format!("🔻 今日最低　　：{}", per_ounce(quote.low_price)));
    if let Some(previous_close) = quote.previous_close {
        lines.push(format!("📊 前日收盤　　：{}", per_ounce(previous_close)));
    }

    let trend = if quote.change < 0.0 { "📉" } else { "📈" };
    lines.push(format!(
        "{trend} 漲　　跌　　：{} {unit} ({}%)",
        signed(quote.change, 3),
        signed(quote.change_percent, 2)
    ));
    lines.push(format!("🛒 買　　價　　：{} {unit}", grouped(quote.ask, 3)));
    lines.push(format!("📤 賣　　價　　：{} {unit}", grouped(quote.bid, 3)));

    lines.push(String::new());
    lines.push(format!("【各純度{metal}每公克價格（{unit}）】"));
    for (karat, fineness, price) in quote.gram.rows() {
        lines.push(format!("{karat} ({fineness})　：{}", grouped(price, 4)));
    }

    lines.join("\n")
}
