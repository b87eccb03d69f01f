// src/noyau/fonctions.rs
//
// Opérations directes de la calculatrice (touches √, ˣ√, log, ln, hyp...)
// Chaque domaine est vérifié AVANT le calcul : jamais de NaN silencieux.

use super::angle::AngleContext;
use super::erreur::ErreurNoyau;
use super::expr::Fonction;
use super::trig::{self, TrigFn};

/// Aiguillage de la table fermée de l’évaluateur.
pub fn applique(f: Fonction, args: &[f64], angle: &AngleContext) -> Result<f64, ErreurNoyau> {
    match (f, args) {
        (Fonction::Sin, [x]) => trig::evalue_trig(angle, TrigFn::Sin, *x),
        (Fonction::Cos, [x]) => trig::evalue_trig(angle, TrigFn::Cos, *x),
        (Fonction::Tan, [x]) => trig::evalue_trig(angle, TrigFn::Tan, *x),
        (Fonction::Asin, [x]) => trig::asin(angle, *x),
        (Fonction::Acos, [x]) => trig::acos(angle, *x),
        (Fonction::Atan, [x]) => Ok(trig::atan(angle, *x)),
        (Fonction::Sqrt, [x]) => sqrt(*x),
        (Fonction::Ln, [x]) => ln(*x),
        (Fonction::Log, [x]) => log_base(10.0, *x),
        (Fonction::Log, [b, x]) => log_base(*b, *x),
        _ => Err(ErreurNoyau::evaluation(format!(
            "{} n’accepte pas {} argument(s)",
            f.nom(),
            args.len()
        ))),
    }
}

pub fn sqrt(x: f64) -> Result<f64, ErreurNoyau> {
    if x < 0.0 {
        return Err(ErreurNoyau::domaine("racine carrée d’un négatif"));
    }
    Ok(x.sqrt())
}

/// Racine `degre`-ième réelle.
/// - degré nul ou non entier : mode invalide
/// - degré pair et base négative : domaine
/// - degré négatif : inverse (résultat nul -> domaine)
pub fn nth_root(base: f64, degre: f64) -> Result<f64, ErreurNoyau> {
    if degre == 0.0 || degre.fract() != 0.0 || !degre.is_finite() {
        return Err(ErreurNoyau::InvalidMode(format!(
            "degré de racine invalide : {degre}"
        )));
    }

    let n = degre.abs();
    let pair = n % 2.0 == 0.0;

    let r = if base < 0.0 {
        if pair {
            return Err(ErreurNoyau::domaine(
                "racine de degré pair d’un nombre négatif",
            ));
        }
        -(-base).powf(1.0 / n)
    } else {
        base.powf(1.0 / n)
    };

    // ³√27 = 3 exactement quand c’est possible
    let r = raffine_racine(r, base, n);

    if degre < 0.0 {
        if r == 0.0 {
            return Err(ErreurNoyau::domaine("inverse de zéro"));
        }
        return Ok(1.0 / r);
    }
    Ok(r)
}

fn raffine_racine(r: f64, base: f64, n: f64) -> f64 {
    let arrondi = r.round();
    if arrondi != 0.0 && (r - arrondi).abs() < 1e-9 && arrondi.powf(n) == base {
        arrondi
    } else {
        r
    }
}

/// log en base quelconque : base > 0, base ≠ 1, x > 0.
pub fn log_base(base: f64, x: f64) -> Result<f64, ErreurNoyau> {
    if base <= 0.0 || base == 1.0 {
        return Err(ErreurNoyau::domaine("la base doit être > 0 et ≠ 1"));
    }
    if x <= 0.0 {
        return Err(ErreurNoyau::domaine("log d’un nombre ≤ 0"));
    }
    if base == 10.0 {
        return Ok(x.log10());
    }
    Ok(x.ln() / base.ln())
}

pub fn ln(x: f64) -> Result<f64, ErreurNoyau> {
    if x <= 0.0 {
        return Err(ErreurNoyau::domaine("ln d’un nombre ≤ 0"));
    }
    Ok(x.ln())
}

/* ------------------------ Hyperboliques ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hyperbolique {
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
}

impl Hyperbolique {
    pub const TOUTES: [Hyperbolique; 6] = [
        Hyperbolique::Sinh,
        Hyperbolique::Cosh,
        Hyperbolique::Tanh,
        Hyperbolique::Asinh,
        Hyperbolique::Acosh,
        Hyperbolique::Atanh,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Hyperbolique::Sinh => "sinh",
            Hyperbolique::Cosh => "cosh",
            Hyperbolique::Tanh => "tanh",
            Hyperbolique::Asinh => "asinh",
            Hyperbolique::Acosh => "acosh",
            Hyperbolique::Atanh => "atanh",
        }
    }
}

/// Hyperboliques (indépendantes du mode d’angle).
pub fn hyperbolique(h: Hyperbolique, x: f64) -> Result<f64, ErreurNoyau> {
    let v = match h {
        Hyperbolique::Sinh => x.sinh(),
        Hyperbolique::Cosh => x.cosh(),
        Hyperbolique::Tanh => x.tanh(),
        Hyperbolique::Asinh => x.asinh(),
        Hyperbolique::Acosh => {
            if x < 1.0 {
                return Err(ErreurNoyau::domaine("acosh d’un nombre < 1"));
            }
            x.acosh()
        }
        Hyperbolique::Atanh => {
            if x <= -1.0 || x >= 1.0 {
                return Err(ErreurNoyau::domaine("atanh hors de ]-1, 1["));
            }
            x.atanh()
        }
    };

    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurNoyau::domaine("dépassement de capacité"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::angle::AngleUnit;
    use crate::noyau::erreur::ErrorKind;

    #[test]
    fn racines() {
        assert_eq!(sqrt(16.0).unwrap(), 4.0);
        assert_eq!(sqrt(-1.0).unwrap_err().kind(), ErrorKind::Domain);

        assert_eq!(nth_root(27.0, 3.0).unwrap(), 3.0);
        assert_eq!(nth_root(-8.0, 3.0).unwrap(), -2.0);
        assert_eq!(nth_root(16.0, -2.0).unwrap(), 0.25);
        assert_eq!(nth_root(-16.0, 2.0).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(nth_root(8.0, 0.0).unwrap_err().kind(), ErrorKind::InvalidMode);
        assert_eq!(nth_root(8.0, 1.5).unwrap_err().kind(), ErrorKind::InvalidMode);
        assert_eq!(nth_root(0.0, -3.0).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn logarithmes() {
        assert_eq!(log_base(10.0, 1000.0).unwrap(), 3.0);
        assert!((log_base(2.0, 8.0).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(log_base(1.0, 5.0).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(log_base(-2.0, 5.0).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(log_base(2.0, 0.0).unwrap_err().kind(), ErrorKind::Domain);
        assert!((ln(std::f64::consts::E).unwrap() - 1.0).abs() < 1e-15);
        assert_eq!(ln(-1.0).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn hyperboliques() {
        assert_eq!(hyperbolique(Hyperbolique::Sinh, 0.0).unwrap(), 0.0);
        assert_eq!(hyperbolique(Hyperbolique::Cosh, 0.0).unwrap(), 1.0);
        assert_eq!(hyperbolique(Hyperbolique::Acosh, 1.0).unwrap(), 0.0);
        assert!(hyperbolique(Hyperbolique::Acosh, 0.5).is_err());
        assert!(hyperbolique(Hyperbolique::Atanh, 1.0).is_err());
        assert!(hyperbolique(Hyperbolique::Cosh, 1000.0).is_err());
    }

    #[test]
    fn aiguillage() {
        let deg = AngleContext::new(AngleUnit::Degrees);
        assert_eq!(applique(Fonction::Log, &[100.0], &deg).unwrap(), 2.0);
        assert_eq!(applique(Fonction::Sin, &[30.0], &deg).unwrap(), 0.5);
        assert!(applique(Fonction::Sin, &[1.0, 2.0], &deg).is_err());
    }
}
