//! Noyau numérique FX-580
//!
//! Organisation interne :
//! - angle.rs, erreur.rs, issue.rs : contexte d’angle, erreurs typées, issues classées
//! - normalise.rs, radical.rs, format.rs : forme “calculatrice” des résultats
//! - pretraitement.rs, jetons.rs, rpn.rs, expr.rs : texte -> AST fermé
//! - trig.rs, fonctions.rs : table de fonctions (angles spéciaux, domaines vérifiés)
//! - eval.rs   : pipeline complet (CAS d’abord, évaluation directe sinon)
//! - cas.rs, memoire.rs : collaborateurs externes (traits)
//! - analyse.rs : replis numériques d/dx, ∫, Σ, Π
//! - polynome.rs, systeme.rs : solveurs
//! - premiers.rs, constantes.rs, reglages.rs

pub mod analyse;
pub mod angle;
pub mod cas;
pub mod constantes;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod issue;
pub mod jetons;
pub mod memoire;
pub mod normalise;
pub mod polynome;
pub mod premiers;
pub mod pretraitement;
pub mod radical;
pub mod reglages;
pub mod rpn;
pub mod systeme;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurNoyau, ErrorKind};
pub use eval::{eval_expression, Evaluateur};
