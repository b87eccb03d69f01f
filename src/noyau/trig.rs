// src/noyau/trig.rs
//
// Trig “calculatrice” selon le mode d’angle
// -----------------------------------------
// - Entrée convertie en radians par l’AngleContext
// - Angles spéciaux (multiples de π/12, n ∈ {1,2,3,4,6}) : valeurs exactes de table,
//   ainsi sin(30°) vaut exactement 0.5 et tan(90°) est reconnu indéfini
// - Hors table : libm, tan indéfini si |cos| < 1e-12
// - Trig inverse : résultat ré-exprimé dans l’unité courante

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use super::angle::AngleContext;
use super::erreur::ErreurNoyau;

/// Seuil sous lequel cos(a) est considéré nul pour tan.
const EPS_COS_NUL: f64 = 1e-12;

/// Écart toléré à un multiple entier de π/12.
const EPS_ANGLE_SPECIAL: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrigOutcome {
    Valeur(f64),
    Indefini,
}

/// Reconnaît les angles spéciaux (en radians) pour sin/cos/tan.
///
/// Retour:
/// - Some(Valeur(v)) si reconnu
/// - Some(Indefini) si indéfini (tan(π/2), tan(3π/2))
/// - None si non reconnu
pub fn trig_special(rad: f64, f: TrigFn) -> Option<TrigOutcome> {
    // 1) coefficient de π/12
    let m = rad / PI * 12.0;
    if !m.is_finite() || m.abs() > 1e12 {
        return None;
    }
    let r = m.round();
    if (m - r).abs() > EPS_ANGLE_SPECIAL * m.abs().max(1.0) {
        return None;
    }

    // 2) réduire modulo 2π puis en k/n irréductible
    let k12 = (r as i64).rem_euclid(24);
    let g = gcd_i64(k12, 12);
    let (k, n) = (k12 / g, 12 / g);
    if ![1, 2, 3, 4, 6].contains(&n) {
        return None;
    }

    let sqrt3 = 3f64.sqrt();
    let sqrt3_over_2 = sqrt3 / 2.0;
    let sqrt3_over_3 = sqrt3 / 3.0;
    let v = TrigOutcome::Valeur;

    let a = (k, n);

    let out = match f {
        TrigFn::Sin => match a {
            (0, _) | (1, 1) => v(0.0),
            (1, 6) | (5, 6) => v(0.5),
            (7, 6) | (11, 6) => v(-0.5),
            (1, 4) | (3, 4) => v(FRAC_1_SQRT_2),
            (5, 4) | (7, 4) => v(-FRAC_1_SQRT_2),
            (1, 3) | (2, 3) => v(sqrt3_over_2),
            (4, 3) | (5, 3) => v(-sqrt3_over_2),
            (1, 2) => v(1.0),
            (3, 2) => v(-1.0),
            _ => return None,
        },

        TrigFn::Cos => match a {
            (0, _) => v(1.0),
            (1, 1) => v(-1.0),
            (1, 6) | (11, 6) => v(sqrt3_over_2),
            (5, 6) | (7, 6) => v(-sqrt3_over_2),
            (1, 4) | (7, 4) => v(FRAC_1_SQRT_2),
            (3, 4) | (5, 4) => v(-FRAC_1_SQRT_2),
            (1, 3) | (5, 3) => v(0.5),
            (2, 3) | (4, 3) => v(-0.5),
            (1, 2) | (3, 2) => v(0.0),
            _ => return None,
        },

        TrigFn::Tan => match a {
            (0, _) | (1, 1) => v(0.0),
            (1, 6) | (7, 6) => v(sqrt3_over_3),
            (5, 6) | (11, 6) => v(-sqrt3_over_3),
            (1, 4) | (5, 4) => v(1.0),
            (3, 4) | (7, 4) => v(-1.0),
            (1, 3) | (4, 3) => v(sqrt3),
            (2, 3) | (5, 3) => v(-sqrt3),
            (1, 2) | (3, 2) => TrigOutcome::Indefini,
            _ => return None,
        },
    };

    Some(out)
}

/// sin/cos/tan dans l’unité courante. tan indéfini -> erreur de domaine.
pub fn evalue_trig(angle: &AngleContext, f: TrigFn, x: f64) -> Result<f64, ErreurNoyau> {
    let rad = angle.to_radians(x);

    let issue = trig_special(rad, f).unwrap_or_else(|| match f {
        TrigFn::Sin => TrigOutcome::Valeur(rad.sin()),
        TrigFn::Cos => TrigOutcome::Valeur(rad.cos()),
        TrigFn::Tan if rad.cos().abs() < EPS_COS_NUL => TrigOutcome::Indefini,
        TrigFn::Tan => TrigOutcome::Valeur(rad.tan()),
    });

    match issue {
        TrigOutcome::Valeur(v) => Ok(v),
        TrigOutcome::Indefini => Err(ErreurNoyau::domaine(format!(
            "tan({x} {}) indéfini",
            angle.unit()
        ))),
    }
}

pub fn asin(angle: &AngleContext, x: f64) -> Result<f64, ErreurNoyau> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(ErreurNoyau::domaine("asin hors de [-1, 1]"));
    }
    Ok(angle.from_radians(x.asin()))
}

pub fn acos(angle: &AngleContext, x: f64) -> Result<f64, ErreurNoyau> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(ErreurNoyau::domaine("acos hors de [-1, 1]"));
    }
    Ok(angle.from_radians(x.acos()))
}

pub fn atan(angle: &AngleContext, x: f64) -> f64 {
    angle.from_radians(x.atan())
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::angle::AngleUnit;
    use crate::noyau::erreur::ErrorKind;

    fn deg() -> AngleContext {
        AngleContext::new(AngleUnit::Degrees)
    }

    #[test]
    fn angles_speciaux_exacts() {
        let c = deg();
        assert_eq!(evalue_trig(&c, TrigFn::Sin, 30.0).unwrap(), 0.5);
        assert_eq!(evalue_trig(&c, TrigFn::Cos, 60.0).unwrap(), 0.5);
        assert_eq!(evalue_trig(&c, TrigFn::Cos, 90.0).unwrap(), 0.0);
        assert_eq!(evalue_trig(&c, TrigFn::Tan, 45.0).unwrap(), 1.0);
        assert_eq!(evalue_trig(&c, TrigFn::Sin, -30.0).unwrap(), -0.5);
        assert_eq!(evalue_trig(&c, TrigFn::Sin, 390.0).unwrap(), 0.5);
    }

    #[test]
    fn tan_indefini() {
        let c = deg();
        let e = evalue_trig(&c, TrigFn::Tan, 90.0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Domain);
        assert!(evalue_trig(&c, TrigFn::Tan, 270.0).is_err());

        let r = AngleContext::new(AngleUnit::Radians);
        assert!(evalue_trig(&r, TrigFn::Tan, PI / 2.0).is_err());

        let g = AngleContext::new(AngleUnit::Gradians);
        assert!(evalue_trig(&g, TrigFn::Tan, 100.0).is_err());
    }

    #[test]
    fn hors_table() {
        let r = AngleContext::new(AngleUnit::Radians);
        assert!((evalue_trig(&r, TrigFn::Sin, 1.0).unwrap() - 1f64.sin()).abs() < 1e-15);
        assert_eq!(trig_special(1.0, TrigFn::Sin), None);
    }

    #[test]
    fn inverses_selon_le_mode() {
        assert!((asin(&deg(), 0.5).unwrap() - 30.0).abs() < 1e-9);
        assert!((acos(&AngleContext::new(AngleUnit::Gradians), 0.0).unwrap() - 100.0).abs() < 1e-9);
        assert!((atan(&AngleContext::new(AngleUnit::Radians), 1.0) - PI / 4.0).abs() < 1e-15);
        assert_eq!(asin(&deg(), 1.5).unwrap_err().kind(), ErrorKind::Domain);
    }
}
