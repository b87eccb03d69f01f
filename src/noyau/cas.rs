// src/noyau/cas.rs
//
// Collaborateur “calcul formel” (CAS) : interface seulement.
// Le noyau ne réimplémente aucune manipulation symbolique ; un moteur externe
// peut être branché sur l’évaluateur, sinon les replis numériques d’analyse.rs servent.

use thiserror::Error;

/// Réponse d’un moteur CAS : valeur numérique (normalisée ensuite) ou forme symbolique.
#[derive(Clone, Debug, PartialEq)]
pub enum Symbolique {
    Valeur(f64),
    Forme(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCas {
    #[error("opération non prise en charge par le moteur")]
    NonPrisEnCharge,

    #[error("analyse refusée : {0}")]
    Analyse(String),

    #[error("échec du moteur : {0}")]
    Echec(String),
}

/// Chaque méthode reçoit l’expression PRÉTRAITÉE.
/// Les implémentations ne couvrent que ce qu’elles savent faire : le reste
/// renvoie NonPrisEnCharge et déclenche le repli.
pub trait Cas {
    fn simplify(&self, expr: &str, algebrique: bool) -> Result<Symbolique, ErreurCas>;

    fn differentiate(&self, _expr: &str, _var: &str) -> Result<Symbolique, ErreurCas> {
        Err(ErreurCas::NonPrisEnCharge)
    }

    fn integrate(
        &self,
        _expr: &str,
        _var: &str,
        _low: f64,
        _high: f64,
    ) -> Result<Symbolique, ErreurCas> {
        Err(ErreurCas::NonPrisEnCharge)
    }

    fn sum(&self, _expr: &str, _var: &str, _low: i64, _high: i64) -> Result<Symbolique, ErreurCas> {
        Err(ErreurCas::NonPrisEnCharge)
    }

    fn product(
        &self,
        _expr: &str,
        _var: &str,
        _low: i64,
        _high: i64,
    ) -> Result<Symbolique, ErreurCas> {
        Err(ErreurCas::NonPrisEnCharge)
    }
}
