use crate::shared::icons::icon;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;

fn format_value(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { currency } => {
            let int_part = val as i64;
            let frac = ((val.abs() - (int_part.abs() as f64)) * 100.0).round() as i64;
            let s = format_thousands(int_part);
            if frac == 0 {
                format!("{} {}", s, currency)
            } else {
                format!("{},{:02} {}", s, frac, currency)
            }
        }
        ValueFormat::Number { decimals } => {
            format!("{:.prec$}", val, prec = *decimals as usize).replace('.', ",")
        }
        ValueFormat::Integer => format_thousands(val as i64),
    }
}

// Разряды через неразрывный пробел
fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Карточка метрики дашборда.
#[component]
pub fn StatCard(
    /// Подпись над значением
    label: String,
    /// Имя иконки из icon()
    icon_name: String,
    /// Значение (None = ещё грузится)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// Формат значения
    format: ValueFormat,
    /// Цветовой статус карточки
    #[prop(into)]
    status: Signal<IndicatorStatus>,
    /// Подзаголовок под значением
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let format_clone = format.clone();

    let status_class = move || match status.get() {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Warning => "stat-card stat-card--warning",
        IndicatorStatus::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, &format_clone),
        None => "\u{2014}".to_string(),
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1234567), "1\u{00a0}234\u{00a0}567");
        assert_eq!(format_thousands(-4200), "-4\u{00a0}200");
    }

    #[test]
    fn test_format_money() {
        let fmt = ValueFormat::Money { currency: "₽".to_string() };
        assert_eq!(format_value(1500.0, &fmt), "1\u{00a0}500 ₽");
        assert_eq!(format_value(99.5, &fmt), "99,50 ₽");
    }

    #[test]
    fn test_format_number_and_integer() {
        assert_eq!(format_value(3.14159, &ValueFormat::Number { decimals: 2 }), "3,14");
        assert_eq!(format_value(12000.9, &ValueFormat::Integer), "12\u{00a0}000");
    }
}
