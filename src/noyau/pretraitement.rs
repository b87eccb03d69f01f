// src/noyau/pretraitement.rs
//
// Réécriture “saisie calculatrice” -> expression sans multiplication implicite
// ---------------------------------------------------------------------------
// Passes (ordre significatif, chacune sur la sortie de la précédente) :
// 1) espaces retirés
// 2) chiffre suivi d’une lettre ou de '('          : 2x -> 2*x, 2(  -> 2*(
// 3) lettre/chiffre/')' suivi de '('                : x(  -> x*(, )( -> )*(
//    (un nom de fonction connu garde sa parenthèse : sin( reste sin()
// 4) ')' suivi d’une lettre ou d’un chiffre         : )2 -> )*2
//
// Aucune validation ici : une saisie mal formée échoue plus loin (tokenize / RPN).

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::expr::Fonction;

static RE_CHIFFRE_LETTRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])([A-Za-zπ√(])").expect("valid regex literal"));

static RE_AVANT_PARENTHESE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(π|[A-Za-z_][A-Za-z0-9_]*|[0-9]|\))\(").expect("valid regex literal")
});

static RE_APRES_PARENTHESE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)([A-Za-z0-9π√])").expect("valid regex literal"));

pub fn preprocess(texte: &str) -> String {
    let s: String = texte.chars().filter(|c| !c.is_whitespace()).collect();

    let s = RE_CHIFFRE_LETTRE.replace_all(&s, "$1*$2");

    let s = RE_AVANT_PARENTHESE.replace_all(&s, |c: &Captures| {
        let avant = &c[1];
        if Fonction::depuis_nom(avant).is_some() {
            format!("{avant}(")
        } else {
            format!("{avant}*(")
        }
    });

    RE_APRES_PARENTHESE.replace_all(&s, ")*$1").into_owned()
}
