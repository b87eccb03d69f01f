// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Domaine     : log(x<=0), √ négatif, tan(90°), division par zéro...
// - ModeInvalide: unité d’angle inconnue, degré de racine invalide, emplacement mémoire inconnu
// - Syntaxe     : expression mal formée après prétraitement
// - Evaluation  : nom inconnu, arité incorrecte
// - NonImplemente : degré 4, dérivée symbolique sans moteur CAS
//
// Les issues “classées” (aucune solution, infinité, pas de racine réelle) ne sont PAS des erreurs :
// voir issue.rs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurNoyau {
    #[error("erreur de domaine : {0}")]
    Domain(String),

    #[error("mode invalide : {0}")]
    InvalidMode(String),

    #[error("erreur de syntaxe : {0}")]
    Parse(String),

    #[error("erreur d’évaluation : {0}")]
    Evaluation(String),

    #[error("non implémenté : {0}")]
    Unimplemented(String),
}

/// Genre d’erreur, sans texte (pour brancher sans comparer des chaînes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Domain,
    InvalidMode,
    Parse,
    Evaluation,
    Unimplemented,
}

impl ErreurNoyau {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErreurNoyau::Domain(_) => ErrorKind::Domain,
            ErreurNoyau::InvalidMode(_) => ErrorKind::InvalidMode,
            ErreurNoyau::Parse(_) => ErrorKind::Parse,
            ErreurNoyau::Evaluation(_) => ErrorKind::Evaluation,
            ErreurNoyau::Unimplemented(_) => ErrorKind::Unimplemented,
        }
    }

    /// Texte de diagnostic seul.
    pub fn detail(&self) -> &str {
        match self {
            ErreurNoyau::Domain(s)
            | ErreurNoyau::InvalidMode(s)
            | ErreurNoyau::Parse(s)
            | ErreurNoyau::Evaluation(s)
            | ErreurNoyau::Unimplemented(s) => s,
        }
    }

    /// Ce que l’écran de la calculatrice affiche.
    pub fn ecran(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Parse => "Syntax ERROR",
            ErrorKind::Domain | ErrorKind::Evaluation => "Math ERROR",
            ErrorKind::InvalidMode => "Argument ERROR",
            ErrorKind::Unimplemented => "Not implemented",
        }
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        ErreurNoyau::Domain(msg.into())
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurNoyau::Parse(msg.into())
    }

    pub(crate) fn evaluation(msg: impl Into<String>) -> Self {
        ErreurNoyau::Evaluation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecran_selon_genre() {
        assert_eq!(ErreurNoyau::syntaxe("x").ecran(), "Syntax ERROR");
        assert_eq!(ErreurNoyau::domaine("ln(0)").ecran(), "Math ERROR");
        assert_eq!(ErreurNoyau::InvalidMode("FOO".into()).ecran(), "Argument ERROR");
        assert_eq!(ErreurNoyau::domaine("ln(0)").kind(), ErrorKind::Domain);
        assert_eq!(ErreurNoyau::evaluation("y").detail(), "y");
    }
}
