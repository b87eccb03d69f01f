// src/noyau/angle.rs
//
// Contexte d’angle (DEG / RAD / GRA)
// ----------------------------------
// - Une instance par session (l’évaluateur possède la sienne) : pas d’état global.
// - Lu par toute fonction trig / trig inverse.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::erreur::ErreurNoyau;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    #[serde(rename = "DEG")]
    Degrees,
    #[serde(rename = "RAD")]
    Radians,
    #[serde(rename = "GRA")]
    Gradians,
}

impl AngleUnit {
    pub const TOUTES: [AngleUnit; 3] = [AngleUnit::Degrees, AngleUnit::Radians, AngleUnit::Gradians];

    /// Jeton affiché (et accepté par set_mode).
    pub fn jeton(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "DEG",
            AngleUnit::Radians => "RAD",
            AngleUnit::Gradians => "GRA",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jeton())
    }
}

impl FromStr for AngleUnit {
    type Err = ErreurNoyau;

    /// Insensible à la casse, espaces ignorés aux bords.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEG" => Ok(AngleUnit::Degrees),
            "RAD" => Ok(AngleUnit::Radians),
            "GRA" => Ok(AngleUnit::Gradians),
            _ => Err(ErreurNoyau::InvalidMode(format!(
                "unité d’angle inconnue '{}' (DEG, RAD ou GRA)",
                s.trim()
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AngleContext {
    unite: AngleUnit,
}

impl AngleContext {
    pub fn new(unite: AngleUnit) -> Self {
        Self { unite }
    }

    pub fn unit(&self) -> AngleUnit {
        self.unite
    }

    pub fn set_unit(&mut self, unite: AngleUnit) {
        self.unite = unite;
    }

    /// Change le mode à partir d’un jeton texte ; renvoie la confirmation affichable.
    /// En cas d’échec, le mode courant est conservé.
    pub fn set_mode(&mut self, jeton: &str) -> Result<String, ErreurNoyau> {
        let unite: AngleUnit = jeton.parse()?;
        self.unite = unite;
        tracing::debug!(mode = %unite, "mode d’angle changé");
        Ok(format!("Mode angle : {unite}"))
    }

    /// Unité courante -> radians.
    pub fn to_radians(&self, x: f64) -> f64 {
        match self.unite {
            AngleUnit::Degrees => x.to_radians(),
            AngleUnit::Radians => x,
            AngleUnit::Gradians => x * PI / 200.0,
        }
    }

    /// Radians -> unité courante (résultats des trig inverses).
    pub fn from_radians(&self, v: f64) -> f64 {
        match self.unite {
            AngleUnit::Degrees => v.to_degrees(),
            AngleUnit::Radians => v,
            AngleUnit::Gradians => v * 200.0 / PI,
        }
    }
}
