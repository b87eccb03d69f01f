// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' et connu de la table => appel f(a, b, ...) -> Appel(name, n)
// - Ident(name) connu SANS '(' (ex: √2)           => préfixe unaire, lie plus fort que ^
// - autre Ident                                  => atome (constante e ou mémoire)
// - Moins unaire : opérateur préfixe Neg, plus faible que ^ (-2^2 = -4), plus fort que * /
// - Plus unaire : ignoré

use super::erreur::ErreurNoyau;
use super::expr::{Constante, Expr, Fonction};
use super::jetons::Tok;

const PREC_NEG: i32 = 3;
const PREC_PREFIXE: i32 = 5;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => PREC_NEG,
        Tok::Caret => 4,
        Tok::Appel(_, _) => PREC_PREFIXE,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("log"), LPar, Num(2), Virgule, Num(8), RPar]
///   rpn:    [Num(2), Num(8), Appel("log", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // Une entrée par '(' ouverte : Some(nb_arguments) si c’est la parenthèse d’un appel.
    let mut appels: Vec<Option<usize>> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les opérateurs unaires.
    let mut prev_was_value = false;

    let mut it = tokens.iter().cloned().peekable();

    while let Some(tok) = it.next() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) if is_fonction_ident(&name) => {
                if matches!(it.peek(), Some(Tok::LPar)) {
                    // fonction : reste sur la pile jusqu’à sa ')'
                    ops.push(Tok::Ident(name));
                    it.next();
                    ops.push(Tok::LPar);
                    appels.push(Some(1));
                } else {
                    ops.push(Tok::Appel(name, 1));
                }
                prev_was_value = false;
            }

            Tok::Ident(name) => {
                out.push(Tok::Ident(name));
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                appels.push(None);
                prev_was_value = false;
            }

            Tok::Virgule => {
                depile_jusqu_a_parenthese(&mut ops, &mut out)?;
                match appels.last_mut() {
                    Some(Some(n)) if prev_was_value => *n += 1,
                    Some(Some(_)) => return Err(ErreurNoyau::syntaxe("argument manquant")),
                    _ => return Err(ErreurNoyau::syntaxe("virgule hors d’un appel de fonction")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                depile_jusqu_a_parenthese(&mut ops, &mut out)?;
                ops.pop(); // la '('

                match appels.pop() {
                    Some(Some(n)) => {
                        // f() : zéro argument, refusé plus loin par l’arité
                        let n = match (prev_was_value, n) {
                            (true, n) => n,
                            (false, 1) => 0,
                            (false, _) => return Err(ErreurNoyau::syntaxe("argument manquant")),
                        };
                        match ops.pop() {
                            Some(Tok::Ident(name)) => out.push(Tok::Appel(name, n)),
                            _ => return Err(ErreurNoyau::syntaxe("appel de fonction invalide")),
                        }
                    }
                    Some(None) => {
                        if !prev_was_value {
                            return Err(ErreurNoyau::syntaxe("parenthèses vides"));
                        }
                    }
                    None => return Err(ErreurNoyau::syntaxe("parenthèse fermante en trop")),
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                if matches!(tok, Tok::Minus) {
                    // préfixe : rien à dépiler
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    match ops.pop() {
                        Some(op) if doit_pop => out.push(op),
                        Some(op) => {
                            ops.push(op);
                            break;
                        }
                        None => break,
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Appel(_, _) => {
                return Err(ErreurNoyau::syntaxe("jeton interne inattendu"));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurNoyau::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

fn depile_jusqu_a_parenthese(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) -> Result<(), ErreurNoyau> {
    loop {
        match ops.last() {
            Some(Tok::LPar) => return Ok(()),
            Some(_) => {
                if let Some(op) = ops.pop() {
                    out.push(op);
                }
            }
            None => return Err(ErreurNoyau::syntaxe("parenthèse fermante en trop")),
        }
    }
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident("e")     => constante e (minuscule seulement ; "E" est un emplacement mémoire)
/// - Ident(autre)   => Expr::Var(name), résolu à l’évaluation
/// - Appel(f, n)    => f doit être dans la table et accepter n arguments
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurNoyau> {
    let invalide = || ErreurNoyau::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(x) => st.push(Expr::Nombre(x)),
            Tok::Pi => st.push(Expr::Constante(Constante::Pi)),
            Tok::Ident(name) if name == "e" => st.push(Expr::Constante(Constante::E)),
            Tok::Ident(name) => st.push(Expr::Var(name)),

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(e);
            }

            Tok::Appel(name, n) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| ErreurNoyau::evaluation(format!("fonction inconnue '{name}'")))?;
                if !f.arite_valide(n) {
                    return Err(ErreurNoyau::evaluation(format!(
                        "{} n’accepte pas {n} argument(s)",
                        f.nom()
                    )));
                }
                if st.len() < n {
                    return Err(ErreurNoyau::syntaxe("fonction sans argument"));
                }
                let args = st.split_off(st.len() - n);
                st.push(Expr::Appel(f, args));
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ErreurNoyau::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn_txt(s: &str) -> String {
        format_tokens(&to_rpn(&tokenize(s).unwrap()).unwrap())
    }

    fn ast(s: &str) -> Result<Expr, ErreurNoyau> {
        from_rpn(&to_rpn(&tokenize(s)?)?)
    }

    #[test]
    fn priorites() {
        assert_eq!(rpn_txt("1+2*3"), "1 2 3 * +");
        assert_eq!(rpn_txt("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(rpn_txt("(1+2)*3"), "1 2 + 3 *");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(rpn_txt("-2^2"), "2 2 ^ neg");
        assert_eq!(rpn_txt("2*-3"), "2 3 neg *");
        assert_eq!(rpn_txt("-2*3"), "2 neg 3 *");
        assert_eq!(rpn_txt("2^-1"), "2 1 neg ^");
        assert_eq!(rpn_txt("+4"), "4");
    }

    #[test]
    fn appels() {
        assert_eq!(rpn_txt("log(2,8)"), "2 8 log/2");
        assert_eq!(rpn_txt("sin(30)+1"), "30 sin/1 1 +");
        assert_eq!(rpn_txt("√4*2"), "4 sqrt/1 2 *");
        assert_eq!(rpn_txt("log(sin(1),2)"), "1 sin/1 2 log/2");
    }

    #[test]
    fn constante_e_et_memoire() {
        assert_eq!(ast("e").unwrap(), Expr::Constante(Constante::E));
        assert_eq!(ast("E").unwrap(), Expr::Var("E".into()));
    }

    #[test]
    fn erreurs() {
        assert_eq!(ast("(1+2").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("1+2)").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("1,2").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("()").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("2 3").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("*").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(ast("sin(1,2)").unwrap_err().kind(), ErrorKind::Evaluation);
        assert_eq!(ast("sin()").unwrap_err().kind(), ErrorKind::Evaluation);
    }
}
