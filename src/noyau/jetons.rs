// src/noyau/jetons.rs

use super::erreur::ErreurNoyau;
use super::format::format_decimal;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Fonctions, constante e, emplacements mémoire : tout nom qui n’est pas pi.
    // La casse est conservée (E = mémoire, e = constante) ; RPN->Expr tranche.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    LPar,
    RPar,
    Virgule,

    // Produits par to_rpn seulement
    Neg,
    Appel(String, usize),
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (12, 12.5, .5)
/// - opérateurs + - * / ^ **
/// - parenthèses ( ) et virgule d’arguments
/// - π ou pi (insensible à la casse)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '×' => Some(Tok::Star),
            '÷' => Some(Tok::Slash),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c == '*' {
            if chars.get(i + 1) == Some(&'*') {
                out.push(Tok::Caret);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            if word.eq_ignore_ascii_case("pi") {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(word));
            }
            continue;
        }

        // Nombre décimal : chiffres [ . chiffres ]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut points = 0;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    points += 1;
                }
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            if points > 1 || txt == "." {
                return Err(ErreurNoyau::syntaxe(format!("nombre invalide '{txt}'")));
            }
            let x: f64 = txt
                .parse()
                .map_err(|_| ErreurNoyau::syntaxe(format!("nombre invalide '{txt}'")))?;
            out.push(Tok::Num(x));
            continue;
        }

        return Err(ErreurNoyau::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(x) => format_decimal(*x, 10),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel(nom, n) => format!("{nom}/{n}"),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombres_decimaux() {
        assert_eq!(tokenize("12.5").unwrap(), vec![Tok::Num(12.5)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Tok::Num(0.5)]);
        assert!(tokenize("1.2.3").is_err());
        assert!(tokenize(".").is_err());
    }

    #[test]
    fn puissance_double_etoile() {
        assert_eq!(
            tokenize("2**3").unwrap(),
            vec![Tok::Num(2.0), Tok::Caret, Tok::Num(3.0)]
        );
    }

    #[test]
    fn pi_et_glyphes() {
        assert_eq!(tokenize("PI").unwrap(), vec![Tok::Pi]);
        assert_eq!(tokenize("π").unwrap(), vec![Tok::Pi]);
        assert_eq!(
            tokenize("√4").unwrap(),
            vec![Tok::Ident("sqrt".into()), Tok::Num(4.0)]
        );
    }

    #[test]
    fn casse_conservee() {
        assert_eq!(tokenize("E").unwrap(), vec![Tok::Ident("E".into())]);
        assert_eq!(tokenize("e").unwrap(), vec![Tok::Ident("e".into())]);
    }

    #[test]
    fn caractere_inconnu() {
        let e = tokenize("2$3").unwrap_err();
        assert_eq!(e.ecran(), "Syntax ERROR");
    }

    #[test]
    fn rendu_jetons() {
        let t = tokenize("log(2,8)+1").unwrap();
        assert_eq!(format_tokens(&t), "log ( 2 , 8 ) + 1");
    }
}
