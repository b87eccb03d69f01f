// src/noyau/format.rs
//
// Affichage “écran” : entiers, décimaux tronqués, scientifique façon calculatrice,
// radicaux a√b, fractions p/q, paires complexes.

use std::fmt;

use super::normalise::{entier_proche, normalize, DisplayMode, NormalizedValue};

/* ------------------------ Helpers numériques ------------------------ */

/// x avec `chiffres` décimales, puis zéros finaux et point final retirés.
pub fn format_decimal(x: f64, chiffres: usize) -> String {
    let s = format!("{x:.chiffres$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Notation scientifique à exposant signé sur deux chiffres minimum : 1.23456789e+10
pub fn format_scientifique(x: f64, chiffres: usize) -> String {
    let s = format!("{x:.chiffres$e}");
    match s.split_once('e') {
        Some((mantisse, exp)) => {
            let e: i32 = exp.parse().unwrap_or(0);
            let signe = if e < 0 { '-' } else { '+' };
            format!("{mantisse}e{signe}{:02}", e.abs())
        }
        None => s,
    }
}

fn format_sqrt_of_int(n: i64) -> String {
    format!("√{n}")
}

/// a·√b -> a√b ; √b si a=1 ; -√b si a=-1 ; a si b=1
fn format_coeff_sqrt(a: i64, b: i64) -> String {
    if a == 0 || b == 0 {
        return "0".to_string();
    }
    if b == 1 {
        return format!("{a}");
    }
    match a {
        1 => format_sqrt_of_int(b),
        -1 => format!("-{}", format_sqrt_of_int(b)),
        _ => format!("{a}{}", format_sqrt_of_int(b)),
    }
}

fn format_reel(x: f64) -> String {
    normalize(x, DisplayMode::Decimal).to_string()
}

/// re ± im·i ; partie nulle omise, coefficient 1 omis devant i.
pub fn format_complexe(re: f64, im: f64) -> String {
    let im_txt = |v: f64| match entier_proche(v) {
        Some(1) => String::new(),
        Some(-1) => "-".to_string(),
        _ => format_reel(v),
    };

    if entier_proche(im) == Some(0) {
        return format_reel(re);
    }
    if entier_proche(re) == Some(0) {
        return format!("{}i", im_txt(im));
    }

    let re_txt = format_reel(re);
    if im < 0.0 {
        format!("{re_txt}-{}i", im_txt(-im))
    } else {
        format!("{re_txt}+{}i", im_txt(im))
    }
}

/* ------------------------ Affichage NormalizedValue ------------------------ */

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Integer(n) => write!(f, "{n}"),
            NormalizedValue::Decimal(s) | NormalizedValue::Scientific(s) => f.write_str(s),
            NormalizedValue::Radical { coeff, radicand } => {
                f.write_str(&format_coeff_sqrt(*coeff, *radicand))
            }
            NormalizedValue::Fraction { num, den } => write!(f, "{num}/{den}"),
            NormalizedValue::Complex { re, im } => f.write_str(&format_complexe(*re, *im)),
            NormalizedValue::Sentinel(s) => f.write_str(s),
        }
    }
}

/// Liste “(a, b, c)” pour solutions et racines.
pub fn format_liste<T: fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_tronque() {
        assert_eq!(format_decimal(2.5, 10), "2.5");
        assert_eq!(format_decimal(3.0, 10), "3");
        assert_eq!(format_decimal(-0.00000000001, 10), "0");
        assert_eq!(format_decimal(0.1234567890123, 10), "0.123456789");
    }

    #[test]
    fn scientifique_signe() {
        assert_eq!(format_scientifique(1e-8, 8), "1.00000000e-08");
        assert_eq!(format_scientifique(-2.5e15, 8), "-2.50000000e+15");
        assert_eq!(format_scientifique(6.02214076e23, 8), "6.02214076e+23");
        assert_eq!(format_scientifique(1.5e100, 2), "1.50e+100");
    }

    #[test]
    fn radicaux() {
        let r = |coeff, radicand| NormalizedValue::Radical { coeff, radicand }.to_string();
        assert_eq!(r(1, 2), "√2");
        assert_eq!(r(-1, 3), "-√3");
        assert_eq!(r(2, 3), "2√3");
        assert_eq!(r(5, 1), "5");
    }

    #[test]
    fn complexes() {
        assert_eq!(format_complexe(0.0, 1.0), "i");
        assert_eq!(format_complexe(-0.0, -1.0), "-i");
        assert_eq!(format_complexe(1.0, 2.0), "1+2i");
        assert_eq!(format_complexe(-0.5, -1.5), "-0.5-1.5i");
        assert_eq!(format_complexe(3.0, 0.0), "3");
    }

    #[test]
    fn liste() {
        let v = vec![NormalizedValue::Integer(1), NormalizedValue::Integer(2)];
        assert_eq!(format_liste(&v), "(1, 2)");
    }
}
