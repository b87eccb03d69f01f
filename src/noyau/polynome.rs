// src/noyau/polynome.rs
//
// Équations polynomiales de degré 1 à 3 (degré 4 : non implémenté)
// ----------------------------------------------------------------
// Coefficients du plus haut degré au terme constant.
// Coefficient dominant nul => degré inférieur (3 -> 2 -> 1).
//
// Degré 3 : forme réduite t³ + pt + q = 0 (x = t - b/3a), Δ = (q/2)² + (p/3)³
// - |Δ| ≤ EPS_DELTA_CUBIQUE·max((q/2)², |p/3|³) : racine multiple (testé AVANT le signe de Δ)
// - Δ > 0                   : Cardano, racine cubique réelle signée (f64::cbrt)
// - Δ < 0                   : trois racines réelles, forme trigonométrique (acos)

use std::f64::consts::PI;
use std::fmt;

use super::erreur::ErreurNoyau;
use super::format::format_liste;
use super::issue::Outcome;
use super::normalise::{entier_proche, normalize, DisplayMode, NormalizedValue};

/// Seuil relatif de Δ (cubique) sous lequel la racine est traitée comme multiple.
/// Relatif aux deux termes de Δ : indépendant de l’échelle des racines.
const EPS_DELTA_CUBIQUE: f64 = 1e-12;

/// Seuil relatif de Δ nul pour le second degré : quelques ulps de b² - 4ac.
const EPS_DELTA_QUADRATIQUE: f64 = 4.0 * f64::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Root {
    Real(f64),
    Complex { re: f64, im: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Linear,
    TwoReal,
    DoubleRoot,
    ComplexPair,
    OneRealCubic,
    OneRealTwoComplex,
    RepeatedReal,
    ThreeDistinctReal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootSet {
    pub branch: Branch,
    pub roots: Vec<Root>,
    pub mode: DisplayMode,
}

impl RootSet {
    fn new(branch: Branch, roots: Vec<Root>, mode: DisplayMode) -> Self {
        tracing::debug!(branche = ?branch, racines = roots.len(), "polynôme résolu");
        Self {
            branch,
            roots,
            mode,
        }
    }

    fn reelles(branch: Branch, mut xs: Vec<f64>, mode: DisplayMode) -> Self {
        xs.sort_by(f64::total_cmp);
        Self::new(branch, xs.into_iter().map(Root::Real).collect(), mode)
    }

    /// Racines réelles seulement (dans l’ordre).
    pub fn reels(&self) -> Vec<f64> {
        self.roots
            .iter()
            .filter_map(|r| match r {
                Root::Real(x) => Some(*x),
                Root::Complex { .. } => None,
            })
            .collect()
    }

    pub fn rendus(&self) -> Vec<NormalizedValue> {
        self.roots
            .iter()
            .map(|r| match *r {
                Root::Real(x) => normalize(x, self.mode),
                Root::Complex { re, im } => NormalizedValue::Complex { re, im },
            })
            .collect()
    }
}

impl fmt::Display for RootSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_liste(&self.rendus()))
    }
}

pub type Solution = Result<Outcome<RootSet>, ErreurNoyau>;

fn verifie_finis(coeffs: &[f64]) -> Result<(), ErreurNoyau> {
    if coeffs.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(ErreurNoyau::domaine("coefficient non fini"))
    }
}

/// a·x + b = 0
pub fn solve_linear(a: f64, b: f64) -> Solution {
    verifie_finis(&[a, b])?;
    if a == 0.0 {
        return Ok(if b == 0.0 {
            Outcome::InfiniteSolutions
        } else {
            Outcome::NoSolution
        });
    }
    let x = -b / a;
    Ok(Outcome::Solved(RootSet::new(
        Branch::Linear,
        vec![Root::Real(x)],
        DisplayMode::Simplified,
    )))
}

/// a·x² + b·x + c = 0
pub fn solve_quadratic(a: f64, b: f64, c: f64, complexe: bool) -> Solution {
    verifie_finis(&[a, b, c])?;
    if a == 0.0 {
        return solve_linear(b, c);
    }

    let mode = DisplayMode::Simplified;
    let delta = b * b - 4.0 * a * c;
    let echelle = (b * b).max((4.0 * a * c).abs());

    if delta.abs() <= EPS_DELTA_QUADRATIQUE * echelle {
        let x = -b / (2.0 * a);
        return Ok(Outcome::Solved(RootSet::new(
            Branch::DoubleRoot,
            vec![Root::Real(x)],
            mode,
        )));
    }

    if delta > 0.0 {
        // forme stable : pas de soustraction de quantités voisines
        let s = delta.sqrt();
        let q = -(b + b.signum() * s) / 2.0;
        let (x1, x2) = if b == 0.0 {
            (s / (2.0 * a), -s / (2.0 * a))
        } else {
            (q / a, c / q)
        };
        return Ok(Outcome::Solved(RootSet::reelles(
            Branch::TwoReal,
            vec![x1, x2],
            mode,
        )));
    }

    if !complexe {
        tracing::debug!(delta, "second degré : pas de racine réelle");
        return Ok(Outcome::NoRealSolution);
    }

    let re = -b / (2.0 * a);
    let im = (-delta).sqrt() / (2.0 * a.abs());
    Ok(Outcome::Solved(RootSet::new(
        Branch::ComplexPair,
        vec![Root::Complex { re, im }, Root::Complex { re, im: -im }],
        mode,
    )))
}

/// a·x³ + b·x² + c·x + d = 0
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64, complexe: bool) -> Solution {
    verifie_finis(&[a, b, c, d])?;
    if a == 0.0 {
        return solve_quadratic(b, c, d, complexe);
    }

    let mode = DisplayMode::Decimal;
    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);
    let (terme_q, terme_p) = ((q / 2.0).powi(2), (p / 3.0).powi(3));
    let delta = terme_q + terme_p;
    let decalage = b / (3.0 * a);

    // p = q = 0 : échelle nulle, Δ nul, racine triple
    if delta.abs() <= EPS_DELTA_CUBIQUE * terme_q.max(terme_p.abs()) {
        let u = (-q / 2.0).cbrt();
        let x1 = 2.0 * u - decalage;
        let x2 = -u - decalage;

        // racine triple : x1 et x2 coïncident, on la donne une fois
        let xs = if memes(x1, x2) { vec![x1] } else { vec![x1, x2] };
        return Ok(Outcome::Solved(RootSet::reelles(Branch::RepeatedReal, xs, mode)));
    }

    if delta > 0.0 {
        let s = delta.sqrt();
        let u = (-q / 2.0 + s).cbrt();
        let v = (-q / 2.0 - s).cbrt();
        let x1 = u + v - decalage;

        if !complexe {
            return Ok(Outcome::Solved(RootSet::new(
                Branch::OneRealCubic,
                vec![Root::Real(x1)],
                mode,
            )));
        }

        let re = -(u + v) / 2.0 - decalage;
        let im = ((u - v) * 3f64.sqrt() / 2.0).abs();
        return Ok(Outcome::Solved(RootSet::new(
            Branch::OneRealTwoComplex,
            vec![
                Root::Real(x1),
                Root::Complex { re, im },
                Root::Complex { re, im: -im },
            ],
            mode,
        )));
    }

    // Δ < 0 donc p < 0 : casus irreducibilis
    let r = (-p / 3.0).sqrt();
    let cos_phi = (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0);
    let phi = cos_phi.acos();
    let xs = (0..3)
        .map(|k| 2.0 * r * ((phi + 2.0 * PI * k as f64) / 3.0).cos() - decalage)
        .collect();
    Ok(Outcome::Solved(RootSet::reelles(
        Branch::ThreeDistinctReal,
        xs,
        mode,
    )))
}

pub fn solve_quartic(_a: f64, _b: f64, _c: f64, _d: f64, _e: f64) -> Solution {
    Err(ErreurNoyau::Unimplemented(
        "équation de degré 4".into(),
    ))
}

/// Aiguillage par nombre de coefficients (2 -> degré 1, ..., 5 -> degré 4).
pub fn solve(coeffs: &[f64], complexe: bool) -> Solution {
    match *coeffs {
        [a, b] => solve_linear(a, b),
        [a, b, c] => solve_quadratic(a, b, c, complexe),
        [a, b, c, d] => solve_cubic(a, b, c, d, complexe),
        [a, b, c, d, e] => solve_quartic(a, b, c, d, e),
        _ => Err(ErreurNoyau::InvalidMode(format!(
            "{} coefficients : degré 1 à 4 attendu",
            coeffs.len()
        ))),
    }
}

fn memes(x: f64, y: f64) -> bool {
    match (entier_proche(x), entier_proche(y)) {
        (Some(a), Some(b)) => a == b,
        _ => (x - y).abs() <= 1e-9 * x.abs().max(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;

    fn racines(o: Outcome<RootSet>) -> RootSet {
        match o {
            Outcome::Solved(r) => r,
            autre => panic!("racines attendues, obtenu {autre:?}"),
        }
    }

    fn rendu(coeffs: &[f64], complexe: bool) -> String {
        racines(solve(coeffs, complexe).unwrap()).to_string()
    }

    #[test]
    fn premier_degre() {
        assert_eq!(rendu(&[2.0, -4.0], false), "(2)");
        assert_eq!(rendu(&[2.0, 1.0], false), "(-1/2)");
        assert_eq!(solve(&[0.0, 0.0], false).unwrap(), Outcome::InfiniteSolutions);
        assert_eq!(solve(&[0.0, 3.0], false).unwrap(), Outcome::NoSolution);
    }

    #[test]
    fn second_degre() {
        let r = racines(solve(&[1.0, -3.0, 2.0], false).unwrap());
        assert_eq!(r.branch, Branch::TwoReal);
        assert_eq!(r.to_string(), "(1, 2)");

        let r = racines(solve(&[1.0, 2.0, 1.0], false).unwrap());
        assert_eq!(r.branch, Branch::DoubleRoot);
        assert_eq!(r.to_string(), "(-1)");

        let r = racines(solve(&[1.0, 0.0, 1.0], true).unwrap());
        assert_eq!(r.branch, Branch::ComplexPair);
        assert_eq!(r.to_string(), "(i, -i)");

        assert_eq!(solve(&[1.0, 0.0, 1.0], false).unwrap(), Outcome::NoRealSolution);
    }

    #[test]
    fn second_degre_affichage_simplifie() {
        assert_eq!(rendu(&[1.0, 0.0, -2.0], false), "(-√2, √2)");
        assert_eq!(rendu(&[2.0, -1.0, 0.0], false), "(0, 1/2)");
        assert_eq!(rendu(&[1.0, -2.0, 5.0], true), "(1+2i, 1-2i)");
    }

    #[test]
    fn second_degre_racines_voisines_distinctes() {
        // x² - 2x + (1 - 1e-13) : 1 ± 3.16e-7, visibles à 10 chiffres
        let r = racines(solve(&[1.0, -2.0, 1.0 - 1e-13], false).unwrap());
        assert_eq!(r.branch, Branch::TwoReal);
        let xs = r.reels();
        assert_eq!(xs.len(), 2);
        assert!(xs[0] < 1.0 && xs[1] > 1.0, "{xs:?}");
        assert!(((xs[1] - xs[0]) / 2.0 - 1e-13f64.sqrt()).abs() < 1e-9);
        assert_eq!(r.to_string(), "(0.9999996837, 1.0000003163)");
    }

    #[test]
    fn second_degre_coefficient_nul() {
        let r = racines(solve(&[0.0, 2.0, -6.0], false).unwrap());
        assert_eq!(r.branch, Branch::Linear);
        assert_eq!(r.reels(), vec![3.0]);
    }

    #[test]
    fn troisieme_degre_trois_reelles() {
        // (x-1)(x-2)(x-3)
        let r = racines(solve(&[1.0, -6.0, 11.0, -6.0], false).unwrap());
        assert_eq!(r.branch, Branch::ThreeDistinctReal);
        assert_eq!(r.to_string(), "(1, 2, 3)");
    }

    #[test]
    fn troisieme_degre_racine_multiple() {
        // (x-1)²(x-2)
        let r = racines(solve(&[1.0, -4.0, 5.0, -2.0], false).unwrap());
        assert_eq!(r.branch, Branch::RepeatedReal);
        assert_eq!(r.to_string(), "(1, 2)");

        // (x-1)³
        let r = racines(solve(&[1.0, -3.0, 3.0, -1.0], false).unwrap());
        assert_eq!(r.branch, Branch::RepeatedReal);
        assert_eq!(r.to_string(), "(1)");
    }

    #[test]
    fn troisieme_degre_petites_racines_distinctes() {
        // x³ - 1e-6·x = x(x - 0.001)(x + 0.001)
        let r = racines(solve(&[1.0, 0.0, -1e-6, 0.0], false).unwrap());
        assert_eq!(r.branch, Branch::ThreeDistinctReal);
        assert_eq!(r.roots.len(), 3);
        let xs = r.reels();
        for (x, attendu) in xs.iter().zip([-0.001, 0.0, 0.001]) {
            assert!((x - attendu).abs() < 1e-12, "{xs:?}");
        }
    }

    #[test]
    fn troisieme_degre_une_reelle() {
        // x³ + 8 = 0 : cbrt signée
        let r = racines(solve(&[1.0, 0.0, 0.0, 8.0], false).unwrap());
        assert_eq!(r.branch, Branch::OneRealCubic);
        assert_eq!(r.to_string(), "(-2)");

        // x³ - 1 = 0 en mode complexe : 1, -1/2 ± (√3/2)i
        let r = racines(solve(&[1.0, 0.0, 0.0, -1.0], true).unwrap());
        assert_eq!(r.branch, Branch::OneRealTwoComplex);
        assert_eq!(r.roots.len(), 3);
        assert_eq!(r.reels(), vec![1.0]);
        match r.roots[1] {
            Root::Complex { re, im } => {
                assert!((re + 0.5).abs() < 1e-12);
                assert!((im - 3f64.sqrt() / 2.0).abs() < 1e-12);
            }
            Root::Real(_) => panic!("paire complexe attendue"),
        }
    }

    #[test]
    fn troisieme_degre_descend_au_second() {
        let r = racines(solve(&[0.0, 1.0, -3.0, 2.0], false).unwrap());
        assert_eq!(r.branch, Branch::TwoReal);
    }

    #[test]
    fn quatrieme_degre_et_arite() {
        let e = solve(&[1.0, 0.0, 0.0, 0.0, -1.0], false).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Unimplemented);
        assert_eq!(solve(&[1.0], false).unwrap_err().kind(), ErrorKind::InvalidMode);
        assert_eq!(
            solve(&[1.0, f64::NAN], false).unwrap_err().kind(),
            ErrorKind::Domain
        );
    }
}
