//! Noyau — évaluation (pipeline réel)
//!
//! prétraitement -> jetons -> RPN -> Expr (espace de noms fermé)
//!        -> étage 1 : moteur CAS (s’il est branché)
//!        -> étage 2 : évaluation directe de l’Expr
//!        -> normalisation d’affichage
//!
//! Déclencheur du repli (étage 2), documenté et testé :
//! - aucun moteur CAS branché, ou
//! - le moteur a renvoyé une erreur (analyse, échec, opération non prise en charge).
//!
//! Σ / Π : bornes non entières refusées (mode invalide) AVANT l’étage 1.
//!
//! L’expression est TOUJOURS analysée par notre grammaire d’abord : une saisie qui
//! sort de l’espace de noms fermé n’atteint jamais le moteur externe.

use std::fmt;

use super::analyse;
use super::angle::{AngleContext, AngleUnit};
use super::cas::{Cas, ErreurCas, Symbolique};
use super::erreur::ErreurNoyau;
use super::expr::{Expr, Fonction, Portee};
use super::jetons::{format_tokens, tokenize};
use super::memoire::{MemoireVariables, MemoireVive};
use super::normalise::{normalize, DisplayMode, NormalizedValue};
use super::pretraitement::preprocess;
use super::rpn::{from_rpn, to_rpn};

/// Chemin réellement suivi par une évaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Chemin {
    Cas,
    #[default]
    Direct,
    /// Repli sur l’évaluation directe, avec la raison.
    Repli(String),
}

impl fmt::Display for Chemin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chemin::Cas => f.write_str("moteur CAS"),
            Chemin::Direct => f.write_str("évaluation directe"),
            Chemin::Repli(raison) => write!(f, "repli direct ({raison})"),
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub pretraite: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub chemin: Chemin,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resultat {
    Nombre { brut: f64, rendu: NormalizedValue },
    /// Forme symbolique rendue par le moteur CAS.
    Forme(String),
}

impl Resultat {
    pub fn brut(&self) -> Option<f64> {
        match self {
            Resultat::Nombre { brut, .. } => Some(*brut),
            Resultat::Forme(_) => None,
        }
    }
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Nombre { rendu, .. } => write!(f, "{rendu}"),
            Resultat::Forme(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Evaluation {
    pub resultat: Resultat,
    pub demarche: DemarcheNoyau,
}

/// Une session de calcul : mode d’angle, mode d’affichage, mémoire, moteur CAS éventuel.
/// Deux sessions ne partagent rien.
pub struct Evaluateur {
    angle: AngleContext,
    affichage: DisplayMode,
    memoire: Box<dyn MemoireVariables>,
    cas: Option<Box<dyn Cas>>,
}

impl fmt::Debug for Evaluateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluateur")
            .field("angle", &self.angle)
            .field("affichage", &self.affichage)
            .field("cas", &self.cas.is_some())
            .finish()
    }
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self::new(AngleUnit::default(), DisplayMode::default())
    }
}

impl Evaluateur {
    pub fn new(unite: AngleUnit, affichage: DisplayMode) -> Self {
        Self {
            angle: AngleContext::new(unite),
            affichage,
            memoire: Box::new(MemoireVive::default()),
            cas: None,
        }
    }

    pub fn avec_cas(mut self, cas: Box<dyn Cas>) -> Self {
        self.cas = Some(cas);
        self
    }

    pub fn avec_memoire(mut self, memoire: Box<dyn MemoireVariables>) -> Self {
        self.memoire = memoire;
        self
    }

    pub fn angle(&self) -> &AngleContext {
        &self.angle
    }

    /// Change le mode d’angle (DEG / RAD / GRA) de CETTE session.
    pub fn set_mode(&mut self, jeton: &str) -> Result<String, ErreurNoyau> {
        self.angle.set_mode(jeton)
    }

    pub fn set_unit(&mut self, unite: AngleUnit) {
        self.angle.set_unit(unite);
    }

    pub fn affichage(&self) -> DisplayMode {
        self.affichage
    }

    pub fn set_affichage(&mut self, mode: DisplayMode) {
        self.affichage = mode;
    }

    pub fn memoire(&self) -> &dyn MemoireVariables {
        self.memoire.as_ref()
    }

    pub fn memoire_mut(&mut self) -> &mut dyn MemoireVariables {
        self.memoire.as_mut()
    }

    fn portee(&self) -> Portee<'_> {
        Portee::new(&self.angle, self.memoire.as_ref())
    }

    fn rendu(&self, brut: f64) -> Resultat {
        Resultat::Nombre {
            brut,
            rendu: normalize(brut, self.affichage),
        }
    }

    /// Prétraitement + analyse dans la grammaire fermée.
    fn analyse(&self, texte: &str) -> Result<(Expr, DemarcheNoyau), ErreurNoyau> {
        let s = texte.trim();
        if s.is_empty() {
            return Err(ErreurNoyau::syntaxe("Entrée vide"));
        }

        let pretraite = preprocess(s);
        let jetons = tokenize(&pretraite)?;
        let rpn = to_rpn(&jetons)?;
        let expr = from_rpn(&rpn)?;

        let d = DemarcheNoyau {
            jetons: format_tokens(&jetons),
            rpn: format_tokens(&rpn),
            arbre: expr.to_string(),
            pretraite,
            chemin: Chemin::Direct,
        };
        Ok((expr, d))
    }

    /// API publique : évalue une expression.
    /// `symbolic_simplify` est transmis au moteur CAS (simplification algébrique).
    pub fn evaluate(&self, texte: &str, symbolic_simplify: bool) -> Result<Evaluation, ErreurNoyau> {
        let (expr, mut demarche) = self.analyse(texte)?;

        // Étage 1 : moteur CAS
        let raison = match &self.cas {
            None => "aucun moteur CAS".to_string(),
            Some(cas) => match cas.simplify(&demarche.pretraite, symbolic_simplify) {
                Ok(sym) => {
                    tracing::debug!(expr = %demarche.pretraite, "évaluation par le moteur CAS");
                    demarche.chemin = Chemin::Cas;
                    let resultat = match sym {
                        Symbolique::Valeur(v) => self.rendu(v),
                        Symbolique::Forme(f) => Resultat::Forme(f),
                    };
                    return Ok(Evaluation { resultat, demarche });
                }
                Err(e) => e.to_string(),
            },
        };

        // Étage 2 : évaluation directe
        tracing::debug!(expr = %demarche.pretraite, raison = %raison, "repli sur l’évaluation directe");
        demarche.chemin = if self.cas.is_some() {
            Chemin::Repli(raison)
        } else {
            Chemin::Direct
        };

        let v = expr.evalue(&self.portee())?;
        Ok(Evaluation {
            resultat: self.rendu(v),
            demarche,
        })
    }

    /// Ce que l’écran affiche : résultat rendu, ou le libellé d’erreur.
    pub fn calc(&self, texte: &str) -> String {
        match self.evaluate(texte, true) {
            Ok(ev) => ev.resultat.to_string(),
            Err(e) => e.ecran().to_string(),
        }
    }

    /// STO : évalue puis range la valeur dans un emplacement mémoire.
    pub fn stocke(&mut self, nom: &str, texte: &str) -> Result<f64, ErreurNoyau> {
        let (expr, _) = self.analyse(texte)?;
        let v = expr.evalue(&self.portee())?;
        self.memoire.ecrire(nom, v)?;
        Ok(v)
    }

    /* ------------------------ Analyse : d/dx, ∫, Σ, Π ------------------------ */

    /// d/d`var` de l’expression ; en `point` si fourni.
    /// Sans point, seule une dérivée symbolique (moteur CAS) a un sens.
    pub fn differentiate(
        &self,
        texte: &str,
        var: &str,
        point: Option<f64>,
    ) -> Result<Resultat, ErreurNoyau> {
        verifie_variable(var)?;
        let (expr, d) = self.analyse(texte)?;

        if let Some(cas) = &self.cas {
            match cas.differentiate(&d.pretraite, var) {
                Ok(Symbolique::Valeur(v)) => return Ok(self.rendu(v)),
                Ok(Symbolique::Forme(f)) => match point {
                    None => return Ok(Resultat::Forme(f)),
                    Some(p) => match self.valeur_en(&f, var, p) {
                        Ok(v) => return Ok(self.rendu(v)),
                        Err(e) => tracing::debug!(erreur = %e, "forme CAS non évaluable"),
                    },
                },
                Err(e) => tracing::debug!(erreur = %e, "dérivée : repli numérique"),
            }
        }

        // expression constante en `var`
        if !expr.contient_var(var) {
            return Ok(self.rendu(0.0));
        }

        let Some(p) = point else {
            return Err(ErreurNoyau::Unimplemented(
                "dérivée symbolique sans moteur CAS".into(),
            ));
        };
        let portee = self.portee();
        let v = analyse::derivee(|x| expr.evalue(&portee.avec(var, x)), p)?;
        Ok(self.rendu(v))
    }

    pub fn integrate(
        &self,
        texte: &str,
        var: &str,
        low: f64,
        high: f64,
    ) -> Result<Resultat, ErreurNoyau> {
        verifie_variable(var)?;
        let (expr, d) = self.analyse(texte)?;

        if let Some(cas) = &self.cas {
            let r = cas.integrate(&d.pretraite, var, low, high);
            if let Some(v) = self.valeur_cas(r) {
                return Ok(self.rendu(v));
            }
        }

        let portee = self.portee();
        let v = analyse::integrale(|x| expr.evalue(&portee.avec(var, x)), low, high)?;
        Ok(self.rendu(v))
    }

    pub fn sum(&self, texte: &str, var: &str, low: f64, high: f64) -> Result<Resultat, ErreurNoyau> {
        self.serie(texte, var, low, high, Serie::Somme)
    }

    pub fn product(
        &self,
        texte: &str,
        var: &str,
        low: f64,
        high: f64,
    ) -> Result<Resultat, ErreurNoyau> {
        self.serie(texte, var, low, high, Serie::Produit)
    }

    fn serie(
        &self,
        texte: &str,
        var: &str,
        low: f64,
        high: f64,
        genre: Serie,
    ) -> Result<Resultat, ErreurNoyau> {
        verifie_variable(var)?;
        let (expr, d) = self.analyse(texte)?;
        let (lo, hi) = analyse::bornes_entieres(low, high)?;

        if let Some(cas) = &self.cas {
            let r = match genre {
                Serie::Somme => cas.sum(&d.pretraite, var, lo, hi),
                Serie::Produit => cas.product(&d.pretraite, var, lo, hi),
            };
            if let Some(v) = self.valeur_cas(r) {
                return Ok(self.rendu(v));
            }
        }

        let portee = self.portee();
        let f = |i: f64| expr.evalue(&portee.avec(var, i));
        let v = match genre {
            Serie::Somme => analyse::somme(f, low, high)?,
            Serie::Produit => analyse::produit(f, low, high)?,
        };
        Ok(self.rendu(v))
    }

    /// Réponse CAS exploitable numériquement, sinon None (=> repli).
    fn valeur_cas(&self, r: Result<Symbolique, ErreurCas>) -> Option<f64> {
        match r {
            Ok(Symbolique::Valeur(v)) if v.is_finite() => Some(v),
            Ok(Symbolique::Valeur(_)) => None,
            Ok(Symbolique::Forme(f)) => match self.valeur_constante(&f) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::debug!(forme = %f, erreur = %e, "forme CAS non évaluable : repli");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(erreur = %e, "moteur CAS : repli numérique");
                None
            }
        }
    }

    fn valeur_constante(&self, texte: &str) -> Result<f64, ErreurNoyau> {
        let (expr, _) = self.analyse(texte)?;
        expr.evalue(&self.portee())
    }

    fn valeur_en(&self, texte: &str, var: &str, x: f64) -> Result<f64, ErreurNoyau> {
        let (expr, _) = self.analyse(texte)?;
        expr.evalue(&self.portee().avec(var, x))
    }
}

#[derive(Clone, Copy)]
enum Serie {
    Somme,
    Produit,
}

/// Nom de variable liée : identifiant simple, ni fonction ni constante.
fn verifie_variable(var: &str) -> Result<(), ErreurNoyau> {
    let mut chars = var.chars();
    let ident = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    let reserve = var == "e" || var.eq_ignore_ascii_case("pi") || Fonction::depuis_nom(var).is_some();
    if !ident || reserve {
        return Err(ErreurNoyau::InvalidMode(format!("variable invalide '{var}'")));
    }
    Ok(())
}

/// Raccourci sans session : DEG, mémoire vide, pas de moteur CAS.
pub fn eval_expression(texte: &str, mode: DisplayMode) -> Result<Evaluation, ErreurNoyau> {
    Evaluateur::new(AngleUnit::Degrees, mode).evaluate(texte, true)
}
