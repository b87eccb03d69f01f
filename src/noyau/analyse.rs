// src/noyau/analyse.rs
//
// Replis numériques quand aucun moteur CAS ne répond
// --------------------------------------------------
// - d/dx en un point : différence centrée à 5 points
// - ∫ de a à b       : Gauss–Kronrod G7K15 adaptatif (sous-intervalle de plus grande erreur d’abord)
// - Σ / Π            : itération directe sur des bornes entières
//
// La fonction à traiter est une fermeture faillible : toute erreur de domaine
// rencontrée en un nœud remonte telle quelle.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::erreur::ErreurNoyau;

/// Nombre de termes max pour Σ / Π.
pub const TERMES_MAX: u64 = 1_000_000;

const TOLERANCE_ABS: f64 = 1e-10;
const TOLERANCE_REL: f64 = 1e-10;
const SUBDIVISIONS_MAX: usize = 500;

/* ------------------------ Dérivée ------------------------ */

/// f'(x) ≈ (-f(x+2h) + 8f(x+h) - 8f(x-h) + f(x-2h)) / 12h, h = 1e-3·max(1, |x|)
pub fn derivee<F>(f: F, x: f64) -> Result<f64, ErreurNoyau>
where
    F: Fn(f64) -> Result<f64, ErreurNoyau>,
{
    let h = 1e-3 * x.abs().max(1.0);
    let d = (-f(x + 2.0 * h)? + 8.0 * f(x + h)? - 8.0 * f(x - h)? + f(x - 2.0 * h)?) / (12.0 * h);
    fini(d)
}

/* ------------------------ Intégrale ------------------------ */

// G7K15 : nœuds positifs (0 compris) et poids, symétriques
const NOEUDS_KRONROD: [f64; 8] = [
    0.0,
    0.207784955007898467600689403773245,
    0.405845151377397166906606412076961,
    0.586087235467691130294144838258730,
    0.741531185599394439863864773280788,
    0.864864423359769072789712788640926,
    0.949107912342758524526189684047851,
    0.991455371120812639206854697526329,
];

const POIDS_KRONROD: [f64; 8] = [
    0.209482141084727828012999174891714,
    0.204432940075298892414161999234649,
    0.190350578064785409913256402421014,
    0.169004726639267902826583426598550,
    0.140653259715525918745189590510238,
    0.104790010322250183839876322541518,
    0.063092092629978553290700663189204,
    0.022935322010529224963732008058970,
];

// Nœuds de Gauss = indices pairs des nœuds de Kronrod
const POIDS_GAUSS: [f64; 4] = [
    0.417959183673469387755102040816327,
    0.381830050505118944950369775488975,
    0.279705391489276667901467771423780,
    0.129484966168869693270611432679082,
];

#[derive(Clone, Copy, Debug)]
struct Morceau {
    a: f64,
    b: f64,
    valeur: f64,
    erreur: f64,
}

impl PartialEq for Morceau {
    fn eq(&self, other: &Self) -> bool {
        self.erreur == other.erreur
    }
}

impl Eq for Morceau {}

impl PartialOrd for Morceau {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Morceau {
    fn cmp(&self, other: &Self) -> Ordering {
        // tas max : plus grande erreur d’abord
        self.erreur.total_cmp(&other.erreur)
    }
}

fn g7k15<F>(f: &F, a: f64, b: f64) -> Result<Morceau, ErreurNoyau>
where
    F: Fn(f64) -> Result<f64, ErreurNoyau>,
{
    let milieu = (a + b) / 2.0;
    let demi = (b - a) / 2.0;

    let f0 = f(milieu)?;
    let mut kronrod = POIDS_KRONROD[0] * f0;
    let mut gauss = POIDS_GAUSS[0] * f0;

    for i in 1..NOEUDS_KRONROD.len() {
        let dx = demi * NOEUDS_KRONROD[i];
        let s = f(milieu - dx)? + f(milieu + dx)?;
        kronrod += POIDS_KRONROD[i] * s;
        if i % 2 == 0 {
            gauss += POIDS_GAUSS[i / 2] * s;
        }
    }

    let valeur = demi * kronrod;
    let erreur = (demi * (kronrod - gauss)).abs();
    Ok(Morceau {
        a,
        b,
        valeur,
        erreur,
    })
}

/// ∫_a^b f ; bornes inversées -> signe opposé. Non-convergence -> erreur de domaine.
pub fn integrale<F>(f: F, a: f64, b: f64) -> Result<f64, ErreurNoyau>
where
    F: Fn(f64) -> Result<f64, ErreurNoyau>,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(ErreurNoyau::domaine("bornes d’intégration non finies"));
    }
    if a == b {
        return Ok(0.0);
    }
    if a > b {
        return integrale(f, b, a).map(|v| -v);
    }

    let initial = g7k15(&f, a, b)?;
    let mut total = initial.valeur;
    let mut erreur = initial.erreur;

    let mut tas = BinaryHeap::new();
    tas.push(initial);

    let mut iterations = 0;
    while erreur > tolerance(total) && iterations < SUBDIVISIONS_MAX {
        iterations += 1;

        let Some(pire) = tas.pop() else {
            break;
        };
        total -= pire.valeur;
        erreur -= pire.erreur;

        let milieu = (pire.a + pire.b) / 2.0;
        let gauche = g7k15(&f, pire.a, milieu)?;
        let droite = g7k15(&f, milieu, pire.b)?;

        total += gauche.valeur + droite.valeur;
        erreur += gauche.erreur + droite.erreur;
        tas.push(gauche);
        tas.push(droite);
    }

    if erreur > tolerance(total) {
        tracing::warn!(erreur, morceaux = tas.len(), "intégrale non convergente");
        return Err(ErreurNoyau::domaine("intégrale non convergente"));
    }

    tracing::debug!(erreur, morceaux = tas.len(), "intégrale G7K15");
    fini(total)
}

fn tolerance(total: f64) -> f64 {
    TOLERANCE_ABS.max(TOLERANCE_REL * total.abs())
}

/* ------------------------ Σ / Π ------------------------ */

/// Bornes de Σ / Π : entières (sinon mode invalide), quel que soit le moteur.
pub fn bornes_entieres(bas: f64, haut: f64) -> Result<(i64, i64), ErreurNoyau> {
    let entier = |x: f64| x.fract() == 0.0 && x.abs() < 9e15;
    if !entier(bas) || !entier(haut) {
        return Err(ErreurNoyau::InvalidMode(
            "les bornes de Σ / Π doivent être entières".into(),
        ));
    }
    Ok((bas as i64, haut as i64))
}

/// Bornes entières, vide si haut < bas.
fn bornes(bas: f64, haut: f64) -> Result<Option<(i64, i64)>, ErreurNoyau> {
    let (bas, haut) = bornes_entieres(bas, haut)?;
    if haut < bas {
        return Ok(None);
    }
    if (haut - bas) as u64 + 1 > TERMES_MAX {
        return Err(ErreurNoyau::domaine(format!(
            "plus de {TERMES_MAX} termes"
        )));
    }
    Ok(Some((bas, haut)))
}

/// Σ_{i=bas}^{haut} f(i) ; intervalle vide -> 0
pub fn somme<F>(f: F, bas: f64, haut: f64) -> Result<f64, ErreurNoyau>
where
    F: Fn(f64) -> Result<f64, ErreurNoyau>,
{
    let Some((bas, haut)) = bornes(bas, haut)? else {
        return Ok(0.0);
    };
    let mut s = 0.0;
    for i in bas..=haut {
        s += f(i as f64)?;
    }
    fini(s)
}

/// Π_{i=bas}^{haut} f(i) ; intervalle vide -> 1
pub fn produit<F>(f: F, bas: f64, haut: f64) -> Result<f64, ErreurNoyau>
where
    F: Fn(f64) -> Result<f64, ErreurNoyau>,
{
    let Some((bas, haut)) = bornes(bas, haut)? else {
        return Ok(1.0);
    };
    let mut p = 1.0;
    for i in bas..=haut {
        p *= f(i as f64)?;
        if p == 0.0 {
            break;
        }
    }
    fini(p)
}

fn fini(v: f64) -> Result<f64, ErreurNoyau> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurNoyau::domaine("dépassement de capacité"))
    }
}
