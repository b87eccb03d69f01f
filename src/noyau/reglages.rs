// src/noyau/reglages.rs
//
// Réglages de la calculatrice (fichier toml optionnel)
// - fichier absent           -> valeurs par défaut, sans bruit
// - illisible / mal formé    -> warn! + valeurs par défaut
// - champ absent             -> sa valeur par défaut (#[serde(default)])

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::angle::AngleUnit;
use super::eval::Evaluateur;
use super::issue::Langue;
use super::normalise::DisplayMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub angle: AngleUnit,
    pub affichage: DisplayMode,
    /// Racines complexes des équations polynomiales.
    pub complexe: bool,
    pub langue: Langue,
}

impl Reglages {
    pub fn charger(chemin: impl AsRef<Path>) -> Self {
        let chemin = chemin.as_ref();
        if !chemin.exists() {
            return Self::default();
        }
        match fs::read_to_string(chemin) {
            Ok(contenu) => match toml::from_str(&contenu) {
                Ok(r) => {
                    tracing::debug!(fichier = %chemin.display(), "réglages chargés");
                    r
                }
                Err(e) => {
                    tracing::warn!(fichier = %chemin.display(), erreur = %e, "réglages mal formés, valeurs par défaut");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(fichier = %chemin.display(), erreur = %e, "réglages illisibles, valeurs par défaut");
                Self::default()
            }
        }
    }

    pub fn sauver(&self, chemin: impl AsRef<Path>) -> io::Result<()> {
        let contenu = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(chemin, contenu)
    }

    /// Nouvelle session configurée (mémoire vide, sans moteur CAS).
    pub fn evaluateur(&self) -> Evaluateur {
        Evaluateur::new(self.angle, self.affichage)
    }
}
