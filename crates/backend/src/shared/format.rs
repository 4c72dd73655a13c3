/// Размер тела ответа с разделителями тысяч (точками) для лога запросов.
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(14832), "14.832");
/// assert_eq!(format_number(512), "512");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut reversed = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push('.');
        }
        reversed.push(ch);
    }
    reversed.chars().rev().collect()
}

/// Форматирует цену в рупиях: кроры от 1e7, лакхи от 1e5, иначе как есть.
///
/// # Примеры
/// ```
/// use backend::shared::format::format_price_rupee;
/// assert_eq!(format_price_rupee(12_000_000.0), "₹1.20 Cr");
/// assert_eq!(format_price_rupee(8_500_000.0), "₹85.00 L");
/// assert_eq!(format_price_rupee(95_000.0), "₹95000");
/// ```
pub fn format_price_rupee(v: f64) -> String {
    if v >= 1e7 {
        format!("₹{:.2} Cr", v / 1e7)
    } else if v >= 1e5 {
        format!("₹{:.2} L", v / 1e5)
    } else {
        format!("₹{}", v as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_price_crore_tier() {
        assert_eq!(format_price_rupee(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_price_rupee(12_345_678.0), "₹1.23 Cr");
    }

    #[test]
    fn test_format_price_lakh_tier() {
        assert_eq!(format_price_rupee(100_000.0), "₹1.00 L");
        assert_eq!(format_price_rupee(9_950_000.0), "₹99.50 L");
    }

    #[test]
    fn test_format_price_plain_rupees() {
        assert_eq!(format_price_rupee(0.0), "₹0");
        assert_eq!(format_price_rupee(99_999.0), "₹99999");
    }
}
