// src/noyau/premiers.rs
//
// Crible + factorisation par divisions successives
// ------------------------------------------------
// - crible booléen jusqu’à LIMITE_CRIBLE (couvre n ≤ ~1e10)
// - au-delà, on continue par impairs : le résultat reste exact pour tout u64
// - crible par défaut calculé une fois (OnceLock)

use std::sync::OnceLock;

/// Limite du crible par défaut.
pub const LIMITE_CRIBLE: usize = 100_000;

/// Nombres premiers ≤ limit, croissants.
pub fn sieve(limit: usize) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let mut compose = vec![false; limit + 1];
    let mut premiers = Vec::new();

    for i in 2..=limit {
        if compose[i] {
            continue;
        }
        premiers.push(i as u64);

        let mut j = i.saturating_mul(i);
        while j <= limit {
            compose[j] = true;
            j += i;
        }
    }

    premiers
}

#[derive(Clone, Debug)]
pub struct Crible {
    premiers: Vec<u64>,
}

impl Crible {
    pub fn new(limit: usize) -> Self {
        Self {
            premiers: sieve(limit),
        }
    }

    /// (premier, exposant) par premier croissant. n < 2 -> vide.
    pub fn factorize(&self, n: u64) -> Vec<(u64, u32)> {
        let mut out = Vec::new();
        if n < 2 {
            return out;
        }

        let mut reste = n;

        for &p in &self.premiers {
            if p > reste / p {
                break;
            }
            let e = retire_facteur(&mut reste, p);
            if e > 0 {
                out.push((p, e));
            }
        }

        // Au-delà du crible : impairs (n > LIMITE² seulement)
        if let Some(&dernier) = self.premiers.last() {
            let mut d = dernier + 2;
            while reste > 1 && d <= reste / d {
                let e = retire_facteur(&mut reste, d);
                if e > 0 {
                    out.push((d, e));
                }
                d += 2;
            }
        }

        if reste > 1 {
            out.push((reste, 1));
        }

        out
    }
}

fn retire_facteur(reste: &mut u64, p: u64) -> u32 {
    let mut e = 0;
    while *reste % p == 0 {
        *reste /= p;
        e += 1;
    }
    e
}

static CRIBLE_DEFAUT: OnceLock<Crible> = OnceLock::new();

/// Crible partagé (immutable après construction).
pub fn crible_defaut() -> &'static Crible {
    CRIBLE_DEFAUT.get_or_init(|| Crible::new(LIMITE_CRIBLE))
}

/// Factorisation via le crible par défaut.
pub fn factorize(n: u64) -> Vec<(u64, u32)> {
    crible_defaut().factorize(n)
}

/// Rendu “FACT” : 2^2×3×5
pub fn format_factorisation(facteurs: &[(u64, u32)]) -> String {
    facteurs
        .iter()
        .map(|&(p, e)| if e == 1 { format!("{p}") } else { format!("{p}^{e}") })
        .collect::<Vec<_>>()
        .join("×")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produit(f: &[(u64, u32)]) -> u64 {
        f.iter().map(|&(p, e)| p.pow(e)).product()
    }

    #[test]
    fn sieve_petits() {
        assert_eq!(sieve(1), Vec::<u64>::new());
        assert_eq!(sieve(2), vec![2]);
        assert_eq!(sieve(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(sieve(100_000).len(), 9592);
    }

    #[test]
    fn factorize_exemples() {
        assert_eq!(factorize(12), vec![(2, 2), (3, 1)]);
        assert_eq!(factorize(60), vec![(2, 2), (3, 1), (5, 1)]);
        assert_eq!(factorize(97), vec![(97, 1)]);
        assert_eq!(factorize(100), vec![(2, 2), (5, 2)]);
        assert!(factorize(1).is_empty());
        assert!(factorize(0).is_empty());
    }

    #[test]
    fn factorize_grand_premier_reste() {
        // 2 * 9_999_999_967 (premier > limite du crible)
        let n = 2 * 9_999_999_967u64;
        assert_eq!(factorize(n), vec![(2, 1), (9_999_999_967, 1)]);
    }

    #[test]
    fn factorize_au_dela_de_la_couverture_du_crible() {
        // 100_003 et 100_019 sont premiers, tous deux > LIMITE_CRIBLE
        let n = 100_003u64 * 100_019u64;
        let f = factorize(n);
        assert_eq!(f, vec![(100_003, 1), (100_019, 1)]);
        assert_eq!(produit(&f), n);
    }

    #[test]
    fn petit_crible_reste_exact() {
        let c = Crible::new(10);
        let f = c.factorize(13 * 13 * 17);
        assert_eq!(f, vec![(13, 2), (17, 1)]);
    }

    #[test]
    fn rendu() {
        assert_eq!(format_factorisation(&factorize(60)), "2^2×3×5");
        assert_eq!(format_factorisation(&factorize(97)), "97");
    }
}
