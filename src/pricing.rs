//! Quote arithmetic and the WhatsApp message built from it.

use crate::config::{
    whatsapp_base_url, AREA_DEFAULT, AREA_MAX, AREA_MIN, AREA_RANGE_MAX, CURRENCY, EXTRA_PRICE_DEFAULT,
    REPAIR_PRICE_DEFAULT,
};
use crate::utils::{parse_int, parse_int_or};

const NOT_SELECTED: &str = "Не выбран";
const NO_EXTRAS: &str = "Нет";

#[derive(Clone, Debug, PartialEq)]
pub struct RepairChoice {
    pub label: String,
    pub price_per_m2: i64,
}

impl RepairChoice {
    /// Builds a choice from the raw `data-label` / `data-price` attributes.
    pub fn from_attrs(label: Option<&str>, price: Option<&str>) -> Self {
        Self {
            label: label.unwrap_or_default().to_string(),
            price_per_m2: price.and_then(parse_int).unwrap_or(REPAIR_PRICE_DEFAULT),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtraChoice {
    pub title: Option<String>,
    pub price: i64,
}

impl ExtraChoice {
    pub fn from_attrs(title: Option<&str>, price: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            price: parse_int_or(price, EXTRA_PRICE_DEFAULT),
        }
    }
}

/// Everything the calculator form currently says.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub repair: Option<RepairChoice>,
    pub area: i64,
    pub extras: Vec<ExtraChoice>,
}

impl Selection {
    pub fn price_per_m2(&self) -> i64 {
        self.repair
            .as_ref()
            .map_or(REPAIR_PRICE_DEFAULT, |repair| repair.price_per_m2)
    }

    pub fn extras_total(&self) -> i64 {
        self.extras
            .iter()
            .fold(0i64, |sum, extra| sum.saturating_add(extra.price))
    }

    /// Saturates instead of overflowing: the area field is not clamped, so
    /// any number of digits can reach this point.
    pub fn total(&self) -> i64 {
        self.price_per_m2()
            .saturating_mul(self.area)
            .saturating_add(self.extras_total())
    }

    pub fn repair_label(&self) -> &str {
        match &self.repair {
            Some(repair) if !repair.label.is_empty() => &repair.label,
            _ => NOT_SELECTED,
        }
    }

    pub fn extras_line(&self) -> String {
        let titles: Vec<&str> = self
            .extras
            .iter()
            .filter_map(|extra| extra.title.as_deref())
            .filter(|title| !title.is_empty())
            .collect();
        if titles.is_empty() {
            NO_EXTRAS.to_string()
        } else {
            titles.join(", ")
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Здравствуйте! Хочу узнать стоимость ремонта.\n\n\
             Тип ремонта: {}\n\
             Площадь: {} м²\n\
             Доп. работы: {}\n\
             Примерная стоимость: {}",
            self.repair_label(),
            self.area,
            self.extras_line(),
            format_price(self.total()),
        )
    }

    pub fn whatsapp_link(&self) -> String {
        format!("{}?text={}", whatsapp_base_url(), urlencoding::encode(&self.message()))
    }
}

/// Area used for pricing: the field as typed, `50` when empty or zero.
pub fn area_from_field(raw: &str) -> i64 {
    parse_int_or(Some(raw), AREA_DEFAULT)
}

/// Value mirrored into the range slider after the field is edited.
pub fn range_from_field(raw: &str) -> i64 {
    parse_int_or(Some(raw), AREA_MIN)
        .clamp(AREA_MIN, AREA_MAX)
        .min(AREA_RANGE_MAX)
}

/// `1234567` → `"1 234 567 сом"`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped.push(' ');
    grouped.push_str(CURRENCY);
    grouped
}

/// `"от 3 000 сом/м²"` for a repair type card.
pub fn per_m2_label(price: i64) -> String {
    format!("от {}/м²", format_price(price))
}

/// `"+15 000 сом"` for an extra work card.
pub fn extra_label(price: i64) -> String {
    format!("+{}", format_price(price))
}

/// Quote that the form shows and sends.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub total: i64,
    pub display: String,
    pub link: String,
}

impl From<&Selection> for Quote {
    fn from(selection: &Selection) -> Self {
        let total = selection.total();
        Self {
            total,
            display: format_price(total),
            link: selection.whatsapp_link(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital() -> RepairChoice {
        RepairChoice::from_attrs(Some("Капитальный"), Some("5000"))
    }

    fn extra(title: &str, price: &str) -> ExtraChoice {
        ExtraChoice::from_attrs(Some(title), Some(price))
    }

    #[test]
    fn test_format_price_groups() {
        assert_eq!(format_price(1000), "1 000 сом");
        assert_eq!(format_price(50000), "50 000 сом");
        assert_eq!(format_price(999), "999 сом");
        assert_eq!(format_price(0), "0 сом");
        assert_eq!(format_price(1234567), "1 234 567 сом");
        assert_eq!(format_price(100000), "100 000 сом");
    }

    #[test]
    fn test_format_price_negative_has_no_leading_separator() {
        assert_eq!(format_price(-1000), "-1 000 сом");
        assert_eq!(format_price(-999), "-999 сом");
    }

    #[test]
    fn test_range_mirror_clamps() {
        for area in 10..=500 {
            assert_eq!(range_from_field(&area.to_string()), area.min(200));
        }
        assert_eq!(range_from_field("3"), 10);
        assert_eq!(range_from_field(""), 10);
        assert_eq!(range_from_field("9000"), 200);
    }

    #[test]
    fn test_area_uses_unclamped_field() {
        assert_eq!(area_from_field("350"), 350);
        assert_eq!(area_from_field("1000"), 1000);
        assert_eq!(area_from_field(""), 50);
        assert_eq!(area_from_field("0"), 50);
        assert_eq!(area_from_field("abc"), 50);
    }

    #[test]
    fn test_total_formula() {
        let selection = Selection {
            repair: Some(capital()),
            area: 60,
            extras: vec![extra("Демонтаж", "15000"), extra("Электрика", "25000")],
        };
        assert_eq!(selection.total(), 5000 * 60 + 15000 + 25000);
    }

    #[test]
    fn test_total_defaults() {
        let selection = Selection {
            repair: None,
            area: area_from_field(""),
            extras: vec![ExtraChoice::from_attrs(Some("Уборка"), Some("бесплатно"))],
        };
        assert_eq!(selection.total(), 4000 * 50);

        let broken = RepairChoice::from_attrs(Some("Дизайнерский"), None);
        assert_eq!(broken.price_per_m2, 4000);
    }

    #[test]
    fn test_message_layout() {
        let selection = Selection {
            repair: Some(capital()),
            area: 45,
            extras: vec![extra("Демонтаж", "15000"), extra("Сантехника", "30000")],
        };
        assert_eq!(
            selection.message(),
            "Здравствуйте! Хочу узнать стоимость ремонта.\n\n\
             Тип ремонта: Капитальный\n\
             Площадь: 45 м²\n\
             Доп. работы: Демонтаж, Сантехника\n\
             Примерная стоимость: 270 000 сом"
        );
    }

    #[test]
    fn test_message_placeholders() {
        let selection = Selection {
            repair: None,
            area: 50,
            extras: Vec::new(),
        };
        let message = selection.message();
        assert!(message.contains("Тип ремонта: Не выбран\n"));
        assert!(message.contains("Доп. работы: Нет\n"));

        let untitled = Selection {
            repair: Some(RepairChoice::from_attrs(Some(""), Some("3000"))),
            area: 50,
            extras: vec![ExtraChoice::from_attrs(None, Some("1000"))],
        };
        let message = untitled.message();
        assert!(message.contains("Тип ремонта: Не выбран\n"));
        assert!(message.contains("Доп. работы: Нет\n"));
        assert!(message.ends_with("151 000 сом"));
    }

    #[test]
    fn test_toggling_extra_changes_quote() {
        let mut selection = Selection {
            repair: Some(capital()),
            area: 50,
            extras: vec![extra("Демонтаж", "15000")],
        };
        let with_extra = Quote::from(&selection);
        selection.extras.clear();
        let without = Quote::from(&selection);

        assert_eq!(with_extra.total - without.total, 15000);
        assert_ne!(with_extra.display, without.display);
        let decoded = urlencoding::decode(without.link.split("text=").nth(1).unwrap()).unwrap();
        assert!(decoded.contains("Доп. работы: Нет"));
    }

    #[test]
    fn test_huge_area_does_not_overflow() {
        let selection = Selection {
            repair: Some(capital()),
            area: area_from_field("99999999999999999999"),
            extras: vec![extra("Демонтаж", "15000")],
        };
        let quote = Quote::from(&selection);
        assert_eq!(quote.total, i64::MAX);
        assert!(!quote.display.starts_with('-'));
        assert!(quote.link.starts_with("https://wa.me/"));
    }

    #[test]
    fn test_extras_total_saturates() {
        let selection = Selection {
            repair: None,
            area: 1,
            extras: vec![extra("A", "9223372036854775807"), extra("B", "9223372036854775807")],
        };
        assert_eq!(selection.extras_total(), i64::MAX);
        assert_eq!(selection.total(), i64::MAX);
    }

    #[test]
    fn test_card_price_labels() {
        assert_eq!(per_m2_label(3000), "от 3 000 сом/м²");
        assert_eq!(extra_label(15000), "+15 000 сом");
        assert_eq!(extra_label(800), "+800 сом");
    }

    #[test]
    fn test_whatsapp_link_round_trips_message() {
        let selection = Selection {
            repair: Some(capital()),
            area: 12,
            extras: Vec::new(),
        };
        let link = selection.whatsapp_link();
        assert!(link.starts_with("https://wa.me/996500245780?text="));
        let encoded = link.trim_start_matches("https://wa.me/996500245780?text=");
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert_eq!(urlencoding::decode(encoded).unwrap(), selection.message());
    }
}
