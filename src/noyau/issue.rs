// src/noyau/issue.rs
//
// Issues classées des solveurs (ce ne sont pas des erreurs).
// Le texte localisé n’est que de la présentation : la logique branche sur l’enum.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Langue {
    #[default]
    En,
    Vi,
    Fr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Solved(T),
    NoSolution,
    InfiniteSolutions,
    NoRealSolution,
}

impl<T> Outcome<T> {
    pub fn solved(&self) -> Option<&T> {
        match self {
            Outcome::Solved(t) => Some(t),
            _ => None,
        }
    }

    /// Libellé des issues classées ; None pour Solved (le rendu dépend de T).
    pub fn libelle(&self, langue: Langue) -> Option<&'static str> {
        let s = match (self, langue) {
            (Outcome::Solved(_), _) => return None,

            (Outcome::NoSolution, Langue::En) => "No solution!!!",
            (Outcome::NoSolution, Langue::Vi) => "Vô nghiệm",
            (Outcome::NoSolution, Langue::Fr) => "Aucune solution",

            (Outcome::InfiniteSolutions, Langue::En) => "Every Real Solution",
            (Outcome::InfiniteSolutions, Langue::Vi) => "Vô số nghiệm",
            (Outcome::InfiniteSolutions, Langue::Fr) => "Infinité de solutions",

            (Outcome::NoRealSolution, Langue::En) => "No real solution",
            (Outcome::NoRealSolution, Langue::Vi) => "Vô nghiệm thực",
            (Outcome::NoRealSolution, Langue::Fr) => "Pas de solution réelle",
        };
        Some(s)
    }

    /// Même issue, contenu transformé.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Solved(t) => Outcome::Solved(f(t)),
            Outcome::NoSolution => Outcome::NoSolution,
            Outcome::InfiniteSolutions => Outcome::InfiniteSolutions,
            Outcome::NoRealSolution => Outcome::NoRealSolution,
        }
    }
}
