//! Tests scientifiques (campagne) : propriétés du noyau, exemples de référence, limites.
//!
//! - propriétés aléatoires (proptest) : aller-retour d’angle, entiers stables,
//!   radicaux, factorisation
//! - exemples fixes : polynômes, systèmes, prétraitement, genres d’erreur
//! - sessions isolées : chaque session a son propre mode d’angle

use proptest::prelude::*;

use super::angle::{AngleContext, AngleUnit};
use super::erreur::ErrorKind;
use super::eval::Evaluateur;
use super::issue::Outcome;
use super::normalise::{normalize, DisplayMode, NormalizedValue};
use super::polynome;
use super::premiers::factorize;
use super::pretraitement::preprocess;
use super::radical;
use super::systeme::{self, SystemSolution};

fn sans_facteur_carre(b: i64) -> bool {
    let mut p = 2;
    while p * p <= b {
        if b % (p * p) == 0 {
            return false;
        }
        p += 1;
    }
    true
}

fn racines(coeffs: &[f64], complexe: bool) -> String {
    match polynome::solve(coeffs, complexe).unwrap() {
        Outcome::Solved(r) => r.to_string(),
        autre => format!("{autre:?}"),
    }
}

/* ------------------------ Propriétés ------------------------ */

proptest! {
    #[test]
    fn sci_aller_retour_angle(v in -1.0e6f64..1.0e6, i in 0usize..3) {
        let ctx = AngleContext::new(AngleUnit::TOUTES[i]);
        let r = ctx.to_radians(ctx.from_radians(v));
        prop_assert!((r - v).abs() <= 1e-9 * v.abs().max(1.0), "{v} -> {r}");
    }

    #[test]
    fn sci_entier_stable(n in -1_000_000_000_000i64..1_000_000_000_000) {
        for mode in [DisplayMode::Decimal, DisplayMode::Simplified] {
            prop_assert_eq!(normalize(n, mode), NormalizedValue::Integer(n));
            prop_assert_eq!(normalize(n as f64, mode), NormalizedValue::Integer(n));
        }
    }

    #[test]
    fn sci_radical_decomposition(n in 1i64..1_000_000) {
        let (a, b) = radical::simplify(n);
        prop_assert_eq!(a * a * b, n);
        prop_assert!(sans_facteur_carre(b), "{n} -> ({a}, {b})");
    }

    #[test]
    fn sci_factorisation_produit(n in 2u64..10_000_000_000) {
        let f = factorize(n);
        let produit: u64 = f.iter().map(|&(p, e)| p.pow(e)).product();
        prop_assert_eq!(produit, n);
        prop_assert!(f.windows(2).all(|w| w[0].0 < w[1].0));
    }
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn sci_radicaux_connus() {
    for (n, attendu) in [
        (4, (2, 1)),
        (8, (2, 2)),
        (12, (2, 3)),
        (18, (3, 2)),
        (72, (6, 2)),
        (100, (10, 1)),
    ] {
        assert_eq!(radical::simplify(n), attendu, "n={n}");
    }
}

#[test]
fn sci_factorisations_connues() {
    assert_eq!(factorize(12), vec![(2, 2), (3, 1)]);
    assert_eq!(factorize(60), vec![(2, 2), (3, 1), (5, 1)]);
    assert_eq!(factorize(97), vec![(97, 1)]);
    assert_eq!(factorize(100), vec![(2, 2), (5, 2)]);
}

#[test]
fn sci_second_degre() {
    assert_eq!(racines(&[1.0, -3.0, 2.0], false), "(1, 2)");
    assert_eq!(racines(&[1.0, 2.0, 1.0], false), "(-1)");
    assert_eq!(racines(&[1.0, 0.0, 1.0], true), "(i, -i)");
    assert_eq!(
        polynome::solve(&[1.0, 0.0, 1.0], false).unwrap(),
        Outcome::NoRealSolution
    );
}

#[test]
fn sci_troisieme_degre_trois_racines() {
    let r = polynome::solve(&[1.0, -6.0, 11.0, -6.0], false).unwrap();
    let r = r.solved().unwrap();
    assert_eq!(r.branch, polynome::Branch::ThreeDistinctReal);
    assert_eq!(r.to_string(), "(1, 2, 3)");
}

#[test]
fn sci_quatrieme_degre_non_implemente() {
    let e = polynome::solve(&[1.0, 0.0, 0.0, 0.0, -1.0], false).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Unimplemented);
}

#[test]
fn sci_systemes() {
    let r = systeme::solve_two(1.0, 1.0, 3.0, 2.0, -1.0, 0.0).unwrap();
    assert_eq!(r.solved().and_then(SystemSolution::entiers), Some(vec![1, 2]));
    assert_eq!(
        systeme::solve_two(1.0, 2.0, 3.0, 2.0, 4.0, 5.0).unwrap(),
        Outcome::NoSolution
    );
    assert_eq!(
        systeme::solve_two(1.0, 2.0, 3.0, 3.0, 6.0, 9.0).unwrap(),
        Outcome::InfiniteSolutions
    );

    let lignes = [
        [1.0, 1.0, 1.0, 6.0],
        [0.0, 2.0, 5.0, -4.0],
        [2.0, 5.0, -1.0, 27.0],
    ];
    let r = systeme::solve_three(&lignes).unwrap();
    assert_eq!(r.solved().and_then(SystemSolution::entiers), Some(vec![5, 3, -2]));
}

#[test]
fn sci_pretraitement() {
    assert_eq!(preprocess("2sin(30)"), "2*sin(30)");
    assert_eq!(preprocess("3(x+1)"), "3*(x+1)");
    assert_eq!(preprocess("(x+1)2"), "(x+1)*2");
}

#[test]
fn sci_genres_d_erreur() {
    let mut ev = Evaluateur::default();
    let genre = |ev: &Evaluateur, s: &str| ev.evaluate(s, true).unwrap_err().kind();

    assert_eq!(genre(&ev, "log(0)"), ErrorKind::Domain);
    assert_eq!(genre(&ev, "log(1, 5)"), ErrorKind::Domain);
    assert_eq!(genre(&ev, "ln(-1)"), ErrorKind::Domain);
    assert_eq!(genre(&ev, "tan(90)"), ErrorKind::Domain);
    assert_eq!(genre(&ev, "2+"), ErrorKind::Parse);
    assert_eq!(genre(&ev, "foo(2)"), ErrorKind::Evaluation);
    assert_eq!(ev.set_mode("TOURS").unwrap_err().kind(), ErrorKind::InvalidMode);
    assert_eq!(ev.angle().unit(), AngleUnit::Degrees);
}

/* ------------------------ Sessions isolées ------------------------ */

#[test]
fn sci_sessions_independantes() {
    std::thread::scope(|s| {
        let deg = s.spawn(|| {
            let ev = Evaluateur::new(AngleUnit::Degrees, DisplayMode::Decimal);
            (0..200).map(|_| ev.calc("sin(90)")).collect::<Vec<_>>()
        });
        let rad = s.spawn(|| {
            let ev = Evaluateur::new(AngleUnit::Radians, DisplayMode::Decimal);
            (0..200).map(|_| ev.calc("sin(π/2)")).collect::<Vec<_>>()
        });
        for sortie in [deg.join().unwrap(), rad.join().unwrap()] {
            assert!(sortie.iter().all(|r| r == "1"));
        }
    });
}
