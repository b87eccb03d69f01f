// src/noyau/normalise.rs
//
// Normalisation d’un résultat flottant en forme “calculatrice”
// -----------------------------------------------------------
// Ordre des tests (le premier qui s’applique gagne) :
// 1) entier déjà exact           -> Integer
// 2) NaN / ±inf                  -> Sentinel (jamais analysé plus loin)
// 3) |x - round(x)| < EPS_ENTIER -> Integer
// 4) mode Decimal   : scientifique (|x| ≥ 1e10 ou 0 < |x| < 1e-6) sinon décimal ≤ 10 chiffres
//    mode Simplified: “irrationnel” -> a√b si x² ≈ entier, sinon règles Decimal
//                     “rationnel”   -> p/q réduit
//
// Seuils uniques pour tout le noyau (les variantes historiques divergeaient).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use super::format::{format_decimal, format_scientifique};
use super::radical;

/// Écart max à l’entier le plus proche pour afficher un entier.
pub const EPS_ENTIER: f64 = 1e-10;

/// Écart (relatif à max(1,|x|)) toléré entre x et sa meilleure approximation p/q.
pub const TOLERANCE_RATIONNEL: f64 = 1e-15;

/// Écart toléré entre x² et l’entier k pour reconnaître √k.
pub const TOLERANCE_RADICAL: f64 = 1e-9;

/// Radicande max pour a√b.
pub const RADICANDE_MAX: f64 = 1e6;

/// Dénominateur max des approximations rationnelles.
pub const DENOMINATEUR_MAX: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Decimal,
    Simplified,
}

/// Valeur brute à normaliser : un entier exact traverse sans modification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Brut {
    Entier(i64),
    Reel(f64),
}

impl From<i64> for Brut {
    fn from(n: i64) -> Self {
        Brut::Entier(n)
    }
}

impl From<i32> for Brut {
    fn from(n: i32) -> Self {
        Brut::Entier(n as i64)
    }
}

impl From<f64> for Brut {
    fn from(x: f64) -> Self {
        Brut::Reel(x)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedValue {
    Integer(i64),
    /// ≤ 10 chiffres après la virgule, zéros et point finaux retirés
    Decimal(String),
    /// 8 chiffres de mantisse après la virgule : 1.23456789e+10
    Scientific(String),
    /// coeff·√radicand (coeff signé)
    Radical { coeff: i64, radicand: i64 },
    /// num/den réduit, den > 1
    Fraction { num: i64, den: i64 },
    Complex { re: f64, im: f64 },
    /// "nan", "inf", "-inf"
    Sentinel(String),
}

impl NormalizedValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NormalizedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Normalise une valeur brute pour l’affichage.
pub fn normalize(valeur: impl Into<Brut>, mode: DisplayMode) -> NormalizedValue {
    let x = match valeur.into() {
        Brut::Entier(n) => return NormalizedValue::Integer(n),
        Brut::Reel(x) => x,
    };

    if let Some(s) = sentinelle(x) {
        return NormalizedValue::Sentinel(s);
    }

    if let Some(n) = entier_proche(x) {
        return NormalizedValue::Integer(n);
    }

    match mode {
        DisplayMode::Decimal => normalise_decimal(x),
        DisplayMode::Simplified => normalise_simplifie(x),
    }
}

fn sentinelle(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("nan".to_string())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

/// Some(n) si x est à moins de EPS_ENTIER d’un entier représentable en i64.
pub fn entier_proche(x: f64) -> Option<i64> {
    let r = x.round();
    if (x - r).abs() < EPS_ENTIER && r.abs() < 9.2e18 {
        Some(r as i64)
    } else {
        None
    }
}

fn normalise_decimal(x: f64) -> NormalizedValue {
    let a = x.abs();
    if a >= 1e10 || (a > 0.0 && a < 1e-6) {
        NormalizedValue::Scientific(format_scientifique(x, 8))
    } else {
        NormalizedValue::Decimal(format_decimal(x, 10))
    }
}

fn normalise_simplifie(x: f64) -> NormalizedValue {
    let approx = rationnel_proche(x, DENOMINATEUR_MAX);

    match approx {
        Some(r) if !est_irrationnel(x, &r) => {
            match (r.numer().to_i64(), r.denom().to_i64()) {
                (Some(num), Some(1)) => NormalizedValue::Integer(num),
                (Some(num), Some(den)) => NormalizedValue::Fraction { num, den },
                // numérateur hors i64 : on retombe sur le décimal
                _ => normalise_decimal(x),
            }
        }
        _ => radical_proche(x).unwrap_or_else(|| normalise_decimal(x)),
    }
}

/// Vrai si la meilleure approximation p/q s’écarte de x au-delà de la tolérance.
fn est_irrationnel(x: f64, approx: &BigRational) -> bool {
    match approx.to_f64() {
        Some(v) => (v - x).abs() > TOLERANCE_RATIONNEL * x.abs().max(1.0),
        None => true,
    }
}

/// x ≈ ±a√b ?
fn radical_proche(x: f64) -> Option<NormalizedValue> {
    let carre = x * x;
    let k = carre.round();
    if k <= 0.0 || k >= RADICANDE_MAX || (k - carre).abs() >= TOLERANCE_RADICAL {
        return None;
    }

    let (a, b) = radical::simplify(k as i64);
    let coeff = if x < 0.0 { -a } else { a };
    if b == 1 {
        return Some(NormalizedValue::Integer(coeff));
    }
    Some(NormalizedValue::Radical { coeff, radicand: b })
}

/// Meilleure approximation rationnelle de x de dénominateur ≤ max_den
/// (fractions continues, avec les bornes semi-convergentes).
/// None si x n’est pas fini.
pub fn rationnel_proche(x: f64, max_den: u64) -> Option<BigRational> {
    let exact = BigRational::from_f64(x)?;
    let max = BigInt::from(max_den.max(1));

    if exact.denom() <= &max {
        return Some(exact);
    }

    let negatif = exact.is_negative();
    let exact = exact.abs();

    let mut p0 = BigInt::zero();
    let mut q0 = BigInt::from(1);
    let mut p1 = BigInt::from(1);
    let mut q1 = BigInt::zero();

    let mut n = exact.numer().clone();
    let mut d = exact.denom().clone();

    while !d.is_zero() {
        let a = &n / &d;
        let q2 = &q0 + &a * &q1;
        if q2 > max {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);

        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    let k = (&max - &q0) / &q1;
    let borne1 = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let borne2 = BigRational::new(p1, q1);

    let choix = if (&borne2 - &exact).abs() <= (&borne1 - &exact).abs() {
        borne2
    } else {
        borne1
    };

    Some(if negatif { -choix } else { choix })
}
