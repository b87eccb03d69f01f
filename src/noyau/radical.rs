// src/noyau/radical.rs
//
// √n -> a√b : extraction des carrés parfaits (n = a²·b, b sans facteur carré).

use super::premiers::factorize;

/// Renvoie (a, b) avec n = a²·b et b sans facteur carré.
///
/// - n = 0 -> (1, 0), n = 1 -> (1, 1)
/// - n < 0 -> (1, n) : aucune simplification réelle, le cas complexe reste à l’appelant
pub fn simplify(n: i64) -> (i64, i64) {
    if n < 0 {
        return (1, n);
    }
    if n < 2 {
        return (1, n);
    }

    let mut a: i64 = 1;
    let mut b: i64 = 1;

    for (p, e) in factorize(n as u64) {
        // p ≤ n ≤ i64::MAX : la conversion est sûre
        let p = p as i64;
        a *= p.pow(e / 2);
        if e % 2 == 1 {
            b *= p;
        }
    }

    (a, b)
}
