/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let with_commas = group_thousands(&format!("{:.2}", val.abs()));
    if val < 0.0 && with_commas != "0.00" {
        format!("-${with_commas}")
    } else {
        format!("${with_commas}")
    }
}

/// Plain two-decimal dollar amount without separators: $1234.56
pub fn dollars(val: f64) -> String {
    let s = format!("{:.2}", val.abs());
    if val < 0.0 && s != "0.00" {
        format!("-${s}")
    } else {
        format!("${s}")
    }
}

/// Whole-number percentage, rounding half away from zero: 37.6 -> "38%"
pub fn percent(val: f64) -> String {
    format!("{}%", val.round() as i64)
}

fn group_thousands(fixed: &str) -> String {
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed, "00"));
    let mut out = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    let int_part: String = out.chars().rev().collect();
    format!("{int_part}.{dec_part}")
}
