use chrono::NaiveDateTime;
use rust_decimal::Decimal;

const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const TRILLION: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Price with a magnitude suffix, e.g. `$1.25M`. Zero reads as "N/A".
pub fn price(value: Decimal) -> String {
    if value <= Decimal::ZERO {
        return "N/A".to_string();
    }
    let (scaled, suffix) = if value >= TRILLION {
        (value / TRILLION, "T")
    } else if value >= BILLION {
        (value / BILLION, "B")
    } else if value >= MILLION {
        (value / MILLION, "M")
    } else {
        (value, "")
    };
    format!("${:.2}{suffix}", scaled.round_dp(2))
}

pub fn date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

pub fn market_status(live: bool) -> &'static str {
    if live {
        "Live"
    } else {
        "Closed"
    }
}
