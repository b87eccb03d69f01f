// src/noyau/expr.rs
//
// AST flottant + évaluation dans un espace de noms FERMÉ.
// - Nombre    : littéral décimal
// - Constante : π, e (rien d’autre n’est “magique”)
// - Var       : emplacement mémoire (A..F, x, y, z, M) ou variable liée (∫, Σ, d/dx)
// - Appel     : fonction de la table `Fonction` uniquement
//
// IMPORTANT (SAFE):
// - aucun nom n’est résolu hors de la table + mémoire : pas d’exécution de code hôte.
// - tout dépassement (NaN / inf) est remonté en erreur de domaine, jamais affiché tel quel.

use std::f64::consts;
use std::fmt;

use super::angle::AngleContext;
use super::erreur::ErreurNoyau;
use super::fonctions;
use super::memoire::MemoireVariables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }
}

/// Table fermée des fonctions reconnues par l’évaluateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Ln,
    Log,
}

impl Fonction {
    /// Nom insensible à la casse ; None si hors table.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        let f = match nom.to_ascii_lowercase().as_str() {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" | "arcsin" => Fonction::Asin,
            "acos" | "arccos" => Fonction::Acos,
            "atan" | "arctan" => Fonction::Atan,
            "sqrt" => Fonction::Sqrt,
            "ln" => Fonction::Ln,
            "log" => Fonction::Log,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
        }
    }

    /// log(x) base 10 ou log(b, x) ; le reste est unaire.
    pub fn arite_valide(self, n: usize) -> bool {
        match self {
            Fonction::Log => n == 1 || n == 2,
            _ => n == 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(Constante),
    Var(String),

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

/// Tout ce dont l’évaluation a besoin : mode d’angle, mémoire, variable liée éventuelle.
#[derive(Clone, Copy)]
pub struct Portee<'a> {
    pub angle: &'a AngleContext,
    pub memoire: &'a dyn MemoireVariables,
    pub liee: Option<(&'a str, f64)>,
}

impl<'a> Portee<'a> {
    pub fn new(angle: &'a AngleContext, memoire: &'a dyn MemoireVariables) -> Self {
        Self {
            angle,
            memoire,
            liee: None,
        }
    }

    /// Même portée, `nom` lié à `valeur` (masque la mémoire).
    pub fn avec(self, nom: &'a str, valeur: f64) -> Self {
        Self {
            liee: Some((nom, valeur)),
            ..self
        }
    }

    fn resout(&self, nom: &str) -> Result<f64, ErreurNoyau> {
        if let Some((n, v)) = self.liee {
            if n == nom {
                return Ok(v);
            }
        }
        self.memoire
            .lire(nom)
            .ok_or_else(|| ErreurNoyau::evaluation(format!("nom inconnu '{nom}'")))
    }
}

impl Expr {
    pub fn evalue(&self, portee: &Portee<'_>) -> Result<f64, ErreurNoyau> {
        use Expr::*;

        let v = match self {
            Nombre(x) => *x,
            Expr::Constante(c) => c.valeur(),
            Var(nom) => portee.resout(nom)?,

            Neg(x) => -x.evalue(portee)?,
            Add(a, b) => a.evalue(portee)? + b.evalue(portee)?,
            Sub(a, b) => a.evalue(portee)? - b.evalue(portee)?,
            Mul(a, b) => a.evalue(portee)? * b.evalue(portee)?,
            Div(a, b) => {
                let num = a.evalue(portee)?;
                let den = b.evalue(portee)?;
                if den == 0.0 {
                    return Err(ErreurNoyau::domaine("division par zéro"));
                }
                num / den
            }
            Pow(a, b) => puissance(a.evalue(portee)?, b.evalue(portee)?)?,

            Appel(f, args) => {
                let mut valeurs = Vec::with_capacity(args.len());
                for a in args {
                    valeurs.push(a.evalue(portee)?);
                }
                fonctions::applique(*f, &valeurs, portee.angle)?
            }
        };

        if v.is_finite() {
            Ok(v)
        } else {
            Err(ErreurNoyau::domaine("dépassement de capacité"))
        }
    }

    /// Vrai si `nom` apparaît comme variable.
    pub fn contient_var(&self, nom: &str) -> bool {
        use Expr::*;
        match self {
            Var(v) => v == nom,
            Nombre(_) | Expr::Constante(_) => false,
            Neg(x) => x.contient_var(nom),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                a.contient_var(nom) || b.contient_var(nom)
            }
            Appel(_, args) => args.iter().any(|a| a.contient_var(nom)),
        }
    }
}

fn puissance(base: f64, exposant: f64) -> Result<f64, ErreurNoyau> {
    if base == 0.0 && exposant < 0.0 {
        return Err(ErreurNoyau::domaine("0 élevé à une puissance négative"));
    }
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(ErreurNoyau::domaine(
            "base négative et exposant non entier",
        ));
    }
    Ok(base.powf(exposant))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(x) => write!(f, "{x}"),
            Expr::Constante(c) => f.write_str(c.symbole()),
            Var(s) => write!(f, "{s}"),
            Neg(x) => write!(f, "-({x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a})^({b})"),
            Appel(fonc, args) => {
                let parts: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", fonc.nom(), parts.join(", "))
            }
        }
    }
}
