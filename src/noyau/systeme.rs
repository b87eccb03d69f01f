// src/noyau/systeme.rs
//
// Systèmes linéaires 2×2 et 3×3 (a·x + b·y [+ c·z] = d)
// ----------------------------------------------------
// Les coefficients sont convertis en rationnels exacts (BigRational) avant tout calcul :
// Cramer exact, aucune comparaison flottante à zéro.
//
// D ≠ 0 : solution unique (Dx/D, Dy/D[, Dz/D])
// D = 0 : rang(A) == rang([A|d]) -> infinité de solutions, sinon aucune
//
// Prédiction entière : deux équations à trois inconnues, z balayé sur un intervalle.

use std::fmt;

use num_rational::BigRational;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use super::analyse::TERMES_MAX;
use super::erreur::ErreurNoyau;
use super::format::format_liste;
use super::issue::Outcome;
use super::normalise::{normalize, rationnel_proche, DisplayMode, NormalizedValue, DENOMINATEUR_MAX};

type Matrice = Vec<Vec<BigRational>>;

/// Solution unique d’un système, composantes exactes.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemSolution {
    pub valeurs: Vec<BigRational>,
    pub mode: DisplayMode,
}

impl SystemSolution {
    pub fn avec_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn reels(&self) -> Vec<f64> {
        self.valeurs
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// Some(..) si toutes les composantes sont entières.
    pub fn entiers(&self) -> Option<Vec<i64>> {
        self.valeurs.iter().map(entier_exact).collect()
    }

    pub fn rendus(&self) -> Vec<NormalizedValue> {
        self.valeurs
            .iter()
            .map(|v| match entier_exact(v) {
                Some(n) => NormalizedValue::Integer(n),
                None => normalize(v.to_f64().unwrap_or(f64::NAN), self.mode),
            })
            .collect()
    }
}

impl fmt::Display for SystemSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_liste(&self.rendus()))
    }
}

pub type Resolution = Result<Outcome<SystemSolution>, ErreurNoyau>;

fn entier_exact(v: &BigRational) -> Option<i64> {
    if v.is_integer() {
        v.to_integer().to_i64()
    } else {
        None
    }
}

/// Coefficient -> rationnel : la fraction courte (0.1 -> 1/10) seulement si elle
/// redonne exactement le même flottant, sinon la valeur binaire exacte du flottant.
fn exact(x: f64) -> Result<BigRational, ErreurNoyau> {
    let binaire =
        BigRational::from_f64(x).ok_or_else(|| ErreurNoyau::domaine("coefficient non fini"))?;
    Ok(match rationnel_proche(x, DENOMINATEUR_MAX) {
        Some(court) if court.to_f64() == Some(x) => court,
        _ => binaire,
    })
}

/// a1·x + b1·y = c1 ; a2·x + b2·y = c2
pub fn solve_two(a1: f64, b1: f64, c1: f64, a2: f64, b2: f64, c2: f64) -> Resolution {
    let lignes = [[a1, b1, c1], [a2, b2, c2]];
    resout(&lignes.iter().map(|l| l.as_slice()).collect::<Vec<_>>())
}

/// Chaque ligne : [a, b, c, d] pour a·x + b·y + c·z = d
pub fn solve_three(lignes: &[[f64; 4]; 3]) -> Resolution {
    resout(&lignes.iter().map(|l| l.as_slice()).collect::<Vec<_>>())
}

/// Lignes augmentées n × (n+1), n ∈ {2, 3}.
fn resout(lignes: &[&[f64]]) -> Resolution {
    let n = lignes.len();
    let mut augmentee: Matrice = Vec::with_capacity(n);
    for ligne in lignes {
        augmentee.push(ligne.iter().map(|&x| exact(x)).collect::<Result<Vec<_>, _>>()?);
    }

    let a: Matrice = augmentee.iter().map(|l| l[..n].to_vec()).collect();
    let d: Vec<BigRational> = augmentee.iter().map(|l| l[n].clone()).collect();

    let det = determinant(&a);
    if det.is_zero() {
        let (ra, raug) = (rang(a), rang(augmentee));
        tracing::debug!(inconnues = n, rang = ra, rang_augmente = raug, "système dégénéré");
        return Ok(if ra == raug {
            Outcome::InfiniteSolutions
        } else {
            Outcome::NoSolution
        });
    }

    let valeurs = (0..n)
        .map(|k| determinant(&remplace_colonne(&a, k, &d)) / &det)
        .collect();
    tracing::debug!(inconnues = n, "système résolu (Cramer)");

    Ok(Outcome::Solved(SystemSolution {
        valeurs,
        mode: DisplayMode::Decimal,
    }))
}

fn remplace_colonne(a: &Matrice, k: usize, d: &[BigRational]) -> Matrice {
    a.iter()
        .zip(d)
        .map(|(ligne, di)| {
            let mut l = ligne.clone();
            l[k] = di.clone();
            l
        })
        .collect()
}

/// Développement par la première ligne (n ≤ 3 ici).
fn determinant(m: &Matrice) -> BigRational {
    match m.len() {
        0 => BigRational::from_integer(1.into()),
        1 => m[0][0].clone(),
        2 => &m[0][0] * &m[1][1] - &m[0][1] * &m[1][0],
        n => {
            let mut det = BigRational::zero();
            for j in 0..n {
                if m[0][j].is_zero() {
                    continue;
                }
                let mineur: Matrice = m[1..]
                    .iter()
                    .map(|l| {
                        l.iter()
                            .enumerate()
                            .filter(|&(c, _)| c != j)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                let terme = &m[0][j] * determinant(&mineur);
                if j % 2 == 0 {
                    det += terme;
                } else {
                    det -= terme;
                }
            }
            det
        }
    }
}

/// Rang par élimination de Gauss exacte.
fn rang(mut m: Matrice) -> usize {
    let lignes = m.len();
    let colonnes = m.first().map_or(0, Vec::len);
    let mut r = 0;

    for c in 0..colonnes {
        if r == lignes {
            break;
        }
        let Some(pivot) = (r..lignes).find(|&i| !m[i][c].is_zero()) else {
            continue;
        };
        m.swap(r, pivot);
        for i in (r + 1)..lignes {
            if m[i][c].is_zero() {
                continue;
            }
            let facteur = &m[i][c] / &m[r][c];
            for j in c..colonnes {
                let v = &facteur * &m[r][j];
                m[i][j] -= v;
            }
        }
        r += 1;
    }
    r
}

/* ------------------------ Prédiction entière ------------------------ */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Critere {
    /// x, y ∈ ℤ
    Entiers,
    /// x, y ∈ ℕ
    #[default]
    Naturels,
}

/// Deux équations [a, b, c, d] (a·x + b·y + c·z = d) : pour chaque z entier de bas à haut,
/// résout le système 2×2 restant et garde les (x, y, z) qui satisfont le critère.
/// Les z qui rendent le système dégénéré sont ignorés.
pub fn predict_integer_solutions(
    eq1: [f64; 4],
    eq2: [f64; 4],
    bas: i64,
    haut: i64,
    critere: Critere,
) -> Result<Vec<[i64; 3]>, ErreurNoyau> {
    if haut < bas {
        return Ok(Vec::new());
    }
    if haut.abs_diff(bas) >= TERMES_MAX {
        return Err(ErreurNoyau::domaine(format!("plus de {TERMES_MAX} valeurs de z")));
    }

    let mut trouvees = Vec::new();
    for z in bas..=haut {
        let zf = z as f64;
        let issue = solve_two(
            eq1[0],
            eq1[1],
            eq1[3] - eq1[2] * zf,
            eq2[0],
            eq2[1],
            eq2[3] - eq2[2] * zf,
        )?;
        let Some([x, y]) = issue
            .solved()
            .and_then(SystemSolution::entiers)
            .and_then(|v| <[i64; 2]>::try_from(v).ok())
        else {
            continue;
        };
        if critere == Critere::Naturels && (x < 0 || y < 0) {
            continue;
        }
        trouvees.push([x, y, z]);
    }

    tracing::debug!(bas, haut, ?critere, trouvees = trouvees.len(), "prédiction entière");
    Ok(trouvees)
}
