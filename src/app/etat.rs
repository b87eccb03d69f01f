//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (session du noyau, entrées des onglets,
//! sorties, erreur, démarche) et offrir les actions simples (C/CLR/AC).
//! Aucun parsing ici : l’évaluation passe par vue.rs -> noyau.

use std::path::PathBuf;

use calculatrice_fx580::noyau::erreur::ErreurNoyau;
use calculatrice_fx580::noyau::eval::DemarcheNoyau;
use calculatrice_fx580::noyau::reglages::Reglages;
use calculatrice_fx580::noyau::systeme::Critere;
use calculatrice_fx580::noyau::Evaluateur;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Onglet {
    #[default]
    Calcul,
    Polynome,
    Systeme,
    Operations,
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub pretraite: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub chemin: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            pretraite: d.pretraite,
            jetons: d.jetons,
            rpn: d.rpn,
            arbre: d.arbre,
            chemin: d.chemin.to_string(),
        }
    }
}

/// Entrées de l’onglet Polynôme : coefficients du plus haut degré au terme constant.
#[derive(Clone, Debug)]
pub struct SaisiePolynome {
    pub degre: usize,
    pub coeffs: [f64; 5],
}

impl Default for SaisiePolynome {
    fn default() -> Self {
        Self {
            degre: 2,
            coeffs: [1.0, -3.0, 2.0, 0.0, 0.0],
        }
    }
}

impl SaisiePolynome {
    pub fn actifs(&self) -> &[f64] {
        &self.coeffs[..=self.degre]
    }
}

/// Entrées de l’onglet Système : lignes [a, b, c, d].
#[derive(Clone, Debug)]
pub struct SaisieSysteme {
    pub inconnues: usize,
    pub lignes: [[f64; 4]; 3],
    pub z_min: i64,
    pub z_max: i64,
    pub critere: Critere,
}

impl Default for SaisieSysteme {
    fn default() -> Self {
        Self {
            inconnues: 2,
            lignes: [
                [1.0, 1.0, 3.0, 0.0],
                [2.0, -1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
            ],
            z_min: 0,
            z_max: 10,
            critere: Critere::default(),
        }
    }
}

/// Variable liée et bornes pour d/dx, ∫, Σ, Π (onglet Calcul).
#[derive(Clone, Debug)]
pub struct SaisieAnalyse {
    pub var: String,
    pub bas: f64,
    pub haut: f64,
}

impl Default for SaisieAnalyse {
    fn default() -> Self {
        Self {
            var: "x".to_string(),
            bas: 0.0,
            haut: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SaisieOperations {
    pub x: f64,
    pub y: f64,
    pub n: u64,
    pub constante: String,
}

#[derive(Debug)]
pub struct AppCalc {
    // --- session du noyau (angle, affichage, mémoire) ---
    pub session: Evaluateur,
    pub reglages: Reglages,
    /// Fichier où réécrire les réglages modifiés (absent en wasm32).
    pub fichier_reglages: Option<PathBuf>,

    pub onglet: Onglet,

    // --- onglet Calcul ---
    pub entree: String,
    pub emplacement: String,
    pub analyse: SaisieAnalyse,

    // --- autres onglets ---
    pub polynome: SaisiePolynome,
    pub systeme: SaisieSysteme,
    pub operations: SaisieOperations,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,
    pub detail: String,
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            session: reglages.evaluateur(),
            reglages,
            fichier_reglages: None,
            onglet: Onglet::default(),
            entree: String::new(),
            emplacement: "A".to_string(),
            analyse: SaisieAnalyse::default(),
            polynome: SaisiePolynome::default(),
            systeme: SaisieSysteme::default(),
            operations: SaisieOperations {
                n: 360,
                constante: "c".to_string(),
                ..SaisieOperations::default()
            },
            resultat: String::new(),
            erreur: String::new(),
            detail: String::new(),
            demarche: Demarche::default(),
            focus_entree: true,
        }
    }

    pub fn avec_fichier_reglages(mut self, chemin: impl Into<PathBuf>) -> Self {
        self.fichier_reglages = Some(chemin.into());
        self
    }

    /// Réécrit les réglages courants ; un échec n’interrompt pas la session.
    pub fn enregistre_reglages(&self) {
        let Some(chemin) = &self.fichier_reglages else {
            return;
        };
        match self.reglages.sauver(chemin) {
            Ok(()) => tracing::debug!(fichier = %chemin.display(), "réglages enregistrés"),
            Err(e) => {
                tracing::warn!(fichier = %chemin.display(), erreur = %e, "réglages non enregistrés")
            }
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + mémoire).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.session.memoire_mut().effacer();
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.detail.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Écran : libellé de la calculatrice ; détail : diagnostic du noyau.
    /// Le dernier résultat reste affiché, la démarche est effacée.
    pub fn set_erreur(&mut self, e: &ErreurNoyau) {
        self.erreur = e.ecran().to_string();
        self.detail = e.detail().to_string();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Option<Demarche>) {
        self.erreur.clear();
        self.detail.clear();
        self.resultat = resultat.into();
        self.demarche = demarche.unwrap_or_default();
        self.focus_entree = true;
    }
}
