// src/noyau/memoire.rs
//
// Mémoire de variables (A..F, x, y, z, M)
// La persistance (fichier, etc.) est hors du noyau : on ne fournit qu’un trait
// et une implémentation en RAM.

use std::collections::HashMap;

use super::erreur::ErreurNoyau;

/// Les dix emplacements, sensibles à la casse (E ≠ e : e est la constante).
pub const EMPLACEMENTS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "x", "y", "z", "M"];

pub fn est_emplacement(nom: &str) -> bool {
    EMPLACEMENTS.contains(&nom)
}

pub trait MemoireVariables {
    /// Valeur d’un emplacement (0 s’il n’a jamais été écrit) ; None si le nom n’en est pas un.
    fn lire(&self, nom: &str) -> Option<f64>;

    fn ecrire(&mut self, nom: &str, valeur: f64) -> Result<(), ErreurNoyau>;

    /// Remet tous les emplacements à zéro.
    fn effacer(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct MemoireVive {
    valeurs: HashMap<String, f64>,
}

impl MemoireVariables for MemoireVive {
    fn lire(&self, nom: &str) -> Option<f64> {
        if !est_emplacement(nom) {
            return None;
        }
        Some(self.valeurs.get(nom).copied().unwrap_or(0.0))
    }

    fn ecrire(&mut self, nom: &str, valeur: f64) -> Result<(), ErreurNoyau> {
        if !est_emplacement(nom) {
            return Err(ErreurNoyau::InvalidMode(format!(
                "emplacement mémoire inconnu '{nom}'"
            )));
        }
        if !valeur.is_finite() {
            return Err(ErreurNoyau::domaine("valeur non finie"));
        }
        self.valeurs.insert(nom.to_string(), valeur);
        tracing::debug!(emplacement = nom, valeur, "mémoire écrite");
        Ok(())
    }

    fn effacer(&mut self) {
        self.valeurs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;

    #[test]
    fn emplacements_valides() {
        let mut m = MemoireVive::default();
        assert_eq!(m.lire("A"), Some(0.0));
        m.ecrire("A", 2.5).unwrap();
        m.ecrire("M", -1.0).unwrap();
        assert_eq!(m.lire("A"), Some(2.5));
        assert_eq!(m.lire("M"), Some(-1.0));
        m.effacer();
        assert_eq!(m.lire("A"), Some(0.0));
    }

    #[test]
    fn noms_refuses() {
        let mut m = MemoireVive::default();
        assert_eq!(m.lire("e"), None);
        assert_eq!(m.lire("X"), None);
        assert_eq!(m.ecrire("G", 1.0).unwrap_err().kind(), ErrorKind::InvalidMode);
        assert_eq!(m.ecrire("x", f64::NAN).unwrap_err().kind(), ErrorKind::Domain);
    }
}
