//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants : jamais de panique, toute erreur est typée,
//!   un résultat Ok ne s’affiche jamais "nan" / "inf"

use std::time::{Duration, Instant};

use super::angle::AngleUnit;
use super::erreur::ErrorKind;
use super::eval::Evaluateur;
use super::normalise::DisplayMode;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }

    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => rng.pick(10).to_string(),
        1 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        2 => rng.choix(&["π", "pi", "e"]).to_string(),
        3 => rng.choix(&["A", "B", "x", "M"]).to_string(),
        4 => rng.choix(&["30", "45", "60", "90", "180", "270"]).to_string(),
        _ => format!("-{}", rng.pick(5)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }
    let sous = |rng: &mut Rng| gen_expr(rng, depth - 1);

    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", sous(rng), sous(rng)),
        2 => format!("({}-{})", sous(rng), sous(rng)),
        3 => format!("{}*{}", sous(rng), sous(rng)),
        4 => format!("({})/({})", sous(rng), sous(rng)),
        5 => format!("({})^{}", sous(rng), rng.pick(4)),
        6 => {
            let f = rng.choix(&["sin", "cos", "tan", "asin", "acos", "atan"]);
            format!("{f}({})", sous(rng))
        }
        7 => {
            let f = rng.choix(&["sqrt", "ln", "log", "√"]);
            format!("{f}({})", sous(rng))
        }
        8 => format!("log({},{})", sous(rng), sous(rng)),
        // multiplication implicite
        9 => format!("{}({})", rng.pick(9) + 1, sous(rng)),
        _ => format!("({}){}", sous(rng), rng.pick(9) + 1),
    }
}

/// Texte quelconque : caractères valides et invalides mélangés.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "1", "2", ".", "+", "-", "*", "/", "^", "(", ")", ",", "sin", "log", "π", "√", "e", "E",
        "x", "z", "?", "#", " ", "**", "×", "÷", "é",
    ];
    let n = rng.pick(12) + 1;
    (0..n).map(|_| rng.choix(ALPHABET)).collect()
}

fn session() -> Evaluateur {
    let mut ev = Evaluateur::new(AngleUnit::Degrees, DisplayMode::Decimal);
    ev.memoire_mut().ecrire("A", 2.0).unwrap();
    ev.memoire_mut().ecrire("B", -0.5).unwrap();
    ev
}

fn passe(ev: &Evaluateur, expr: &str) -> Result<String, ErrorKind> {
    match ev.evaluate(expr, true) {
        Ok(r) => {
            let s = r.resultat.to_string();
            assert!(
                !s.contains("nan") && !s.contains("inf"),
                "sentinelle affichée: expr={expr:?} -> {s}"
            );
            Ok(s)
        }
        Err(e) => {
            assert!(!e.detail().is_empty(), "erreur sans diagnostic: expr={expr:?}");
            Err(e.kind())
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        items = items
            .chunks(2)
            .map(|c| match c {
                [a, b] => format!("({a}+{b})"),
                [a] => a.clone(),
                _ => unreachable!(),
            })
            .collect();
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);
    let ev = session();

    let tirage = |seed: u64| {
        let mut rng = Rng::new(seed);
        (0..150)
            .map(|_| {
                budget(t0, max);
                let expr = gen_expr(&mut rng, 4);
                passe(&ev, &expr)
            })
            .collect::<Vec<_>>()
    };

    // Même seed => mêmes expressions => mêmes sorties
    let a = tirage(0xC0FFEE_u64);
    let b = tirage(0xC0FFEE_u64);
    assert_eq!(a, b);

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    let ok = a.iter().filter(|r| r.is_ok()).count();
    assert!(ok > 10, "trop peu de succès: {ok}");
    assert!(
        a.iter().any(|r| r == &Err(ErrorKind::Domain)),
        "aucune erreur de domaine vue: fuzz trop “sage”"
    );
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);
    let ev = session();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);
        let texte = gen_bruit(&mut rng);
        if let Err(k) = passe(&ev, &texte) {
            // le bruit n’atteint jamais les solveurs ni les modes
            assert!(
                matches!(k, ErrorKind::Parse | ErrorKind::Evaluation | ErrorKind::Domain),
                "genre inattendu {k:?} pour {texte:?}"
            );
        }
    }
}

#[test]
fn fuzz_safe_angles_speciaux() {
    let ev = session();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..100 {
        let k = rng.pick(48) as i64 - 24;
        let angle = 15 * k;
        for f in ["sin", "cos"] {
            let r = passe(&ev, &format!("{f}({angle})"));
            assert!(r.is_ok(), "{f}({angle}) -> {r:?}");
        }
        // tan indéfini exactement aux multiples impairs de 90°
        let r = passe(&ev, &format!("tan({angle})"));
        if angle.rem_euclid(180) == 90 {
            assert_eq!(r, Err(ErrorKind::Domain), "tan({angle})");
        } else {
            assert!(r.is_ok(), "tan({angle}) -> {r:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    assert_eq!(passe(&session(), &expr), Ok("400".to_string()));
}
